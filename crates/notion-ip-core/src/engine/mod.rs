//! Core run engine
//!
//! The Engine is responsible for one pass of:
//! - Resolving the external address via an [`AddressSource`]
//! - Handing it to a [`Recorder`], which applies its own write policy
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   Ipv4Address   ┌──────────────┐   RecordOutcome
//! │ AddressSource │ ──────────────▶ │   Recorder   │ ──────────────▶ RunReport
//! └───────────────┘                 └──────────────┘
//! ```
//!
//! The engine holds no state between runs. Notion is the only durable store.

use crate::address::Ipv4Address;
use crate::error::Result;
use crate::traits::{AddressSource, RecordOutcome, Recorder};
use tracing::{Instrument, Span, error, info, info_span};

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The address that was resolved
    pub address: Ipv4Address,
    /// What the recorder did with it
    pub outcome: RecordOutcome,
}

/// Single-pass engine
///
/// ## Lifecycle
///
/// 1. Create with [`Engine::new()`]
/// 2. Call [`Engine::run_once()`] once per process invocation
pub struct Engine {
    source: Box<dyn AddressSource>,
    recorder: Box<dyn Recorder>,
    span: Span,
}

impl Engine {
    pub fn new(source: Box<dyn AddressSource>, recorder: Box<dyn Recorder>) -> Self {
        let span = info_span!("engine", recorder = recorder.recorder_name());
        Self {
            source,
            recorder,
            span,
        }
    }

    /// Log under `span` instead of the default engine span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Resolve the address and record it.
    ///
    /// # Returns
    ///
    /// - `Ok(RunReport)`: Address resolved and recorded (or left unchanged)
    /// - `Err(Error)`: Resolver exhausted or the Notion write failed
    pub async fn run_once(&self) -> Result<RunReport> {
        self.run_inner().instrument(self.span.clone()).await
    }

    async fn run_inner(&self) -> Result<RunReport> {
        let address = match self.source.resolve().await {
            Ok(address) => address,
            Err(e) => {
                error!(source = self.source.source_name(), error = %e, "Failed to retrieve external IPv4 address");
                return Err(e);
            }
        };
        info!(ip = %address, "Retrieved external IPv4 address");

        let outcome = match self.recorder.record(&address).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(ip = %address, error = %e, "Failed to record IP in Notion");
                return Err(e);
            }
        };

        match &outcome {
            RecordOutcome::Appended { previous } => {
                info!(ip = %address, previous = ?previous.as_ref().map(Ipv4Address::as_str), "New IP appended to Notion");
            }
            RecordOutcome::Unchanged => {
                info!(ip = %address, "IP has not changed. No update needed");
            }
            RecordOutcome::Overwritten => {
                info!(ip = %address, "Notion page title updated");
            }
            RecordOutcome::DryRun { .. } => {
                info!(ip = %address, "Dry run complete, Notion left untouched");
            }
        }

        Ok(RunReport { address, outcome })
    }
}
