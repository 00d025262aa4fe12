// # notion-ip-core
//
// Core library for recording the caller's external IPv4 address in Notion.
//
// ## Architecture Overview
//
// - **AddressSource**: Trait for learning the external IPv4 address
// - **Recorder**: Trait for writing that address into a Notion page
// - **Engine**: Runs one resolve → record pass and reports the outcome
// - **AppConfig**: Environment-style configuration and validation
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core types are separate from HTTP implementations
// 2. **No Local State**: Notion is the only system of record
// 3. **One Pass Per Run**: Scheduling belongs to cron/systemd, not this crate

pub mod address;
pub mod config;
pub mod engine;
pub mod error;
pub mod traits;

// Re-export core types for convenience
pub use address::{IpRecord, Ipv4Address, is_ipv4_shape};
pub use config::{AppConfig, NotionConfig, RecorderMode, ResolverConfig};
pub use engine::{Engine, RunReport};
pub use error::{Error, Result};
pub use traits::{AddressSource, IpService, RecordOutcome, Recorder};
