// # Recorder Trait
//
// Defines the interface for writing a resolved address into Notion.
//
// ## Implementations
//
// - `AppendRecorder`: appends a timestamped paragraph when the address changed
// - `OverwriteRecorder`: sets the page title on every run
//
// Both live in the `notion-ip-recorder` crate and are selected through
// [`RecorderMode`](crate::config::RecorderMode).

use async_trait::async_trait;

use crate::address::Ipv4Address;

/// What a recorder did with an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new paragraph block was appended
    Appended {
        /// The last recorded address, if one could be read
        previous: Option<Ipv4Address>,
    },
    /// The last recorded address already matches; nothing was written
    Unchanged,
    /// The page property was overwritten
    Overwritten,
    /// Dry-run mode: the write was logged but not sent
    DryRun {
        /// JSON payload that would have been sent
        payload: String,
    },
}

impl RecordOutcome {
    /// Whether Notion was modified by this run
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Appended { .. } | Self::Overwritten)
    }
}

/// Trait for Notion recorder implementations
///
/// Recorders own their write policy: the append variant compares with the
/// last recorded address, the overwrite variant does not. A read failure is
/// never fatal to a recorder; a write failure always is.
#[async_trait]
pub trait Recorder: Send + Sync {
    /// Record `ip` according to this recorder's policy
    async fn record(&self, ip: &Ipv4Address) -> Result<RecordOutcome, crate::Error>;

    /// Recorder name (for logging/debugging)
    fn recorder_name(&self) -> &'static str;
}
