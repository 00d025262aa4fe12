//! Core traits for notion-ip
//!
//! - [`AddressSource`]: Learn the external IPv4 address
//! - [`Recorder`]: Write the address into Notion

pub mod address_source;
pub mod recorder;

pub use address_source::{AddressSource, IpService};
pub use recorder::{RecordOutcome, Recorder};
