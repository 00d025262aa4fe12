// # Append recorder
//
// Keeps a running log on the page: each change of address adds a paragraph
// `"<ip> (Updated: <RFC3339>)"`.
//
// Policy:
// - latest recorded IP equals the new one → no write
// - different IP → append
// - latest unknown (read failed, nothing recorded yet) → append

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local};
use notion_ip_core::{IpRecord, Ipv4Address, RecordOutcome, Recorder, Result};
use tracing::{Instrument, Span, info, info_span, warn};

use crate::client::NotionClient;
use crate::model::AppendChildren;

/// Clock used to timestamp new records
pub type Clock = fn() -> DateTime<FixedOffset>;

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Last recorded address from a `fetch_latest` result.
///
/// Recoverable read errors mean the previous state is unknown (`None`);
/// anything fatal is passed on.
fn previous_address(latest: Result<IpRecord>) -> Result<Option<Ipv4Address>> {
    match latest {
        Ok(latest) => {
            info!(latest_ip = %latest.ip, updated = %latest.updated, "Fetched the latest IP from Notion");
            Ok(Some(latest.ip))
        }
        Err(e) if !e.is_fatal() => {
            warn!(error = %e, "Failed to fetch the latest IP from Notion, appending anyway");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Appends a timestamped paragraph when the address changed
#[derive(Debug)]
pub struct AppendRecorder {
    client: NotionClient,
    dry_run: bool,
    clock: Clock,
    span: Span,
}

impl AppendRecorder {
    pub fn new(client: NotionClient, dry_run: bool) -> Self {
        let span = info_span!("recorder", mode = "append", page_id = client.page_id());
        Self {
            client,
            dry_run,
            clock: local_now,
            span,
        }
    }

    /// Timestamp records with `clock` instead of local time
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Log under `span` instead of the default recorder span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    async fn record_inner(&self, ip: &Ipv4Address) -> Result<RecordOutcome> {
        let previous = previous_address(self.client.fetch_latest().await)?;

        if previous.as_ref() == Some(ip) {
            return Ok(RecordOutcome::Unchanged);
        }

        let record = IpRecord::new(ip.clone(), (self.clock)());

        if self.dry_run {
            let payload = serde_json::to_string(&AppendChildren::paragraph(record.to_content()))?;
            info!(%payload, "[DRY-RUN] Would append paragraph to Notion page");
            return Ok(RecordOutcome::DryRun { payload });
        }

        self.client.append(&record).await?;
        Ok(RecordOutcome::Appended { previous })
    }
}

#[async_trait]
impl Recorder for AppendRecorder {
    async fn record(&self, ip: &Ipv4Address) -> Result<RecordOutcome> {
        self.record_inner(ip).instrument(self.span.clone()).await
    }

    fn recorder_name(&self) -> &'static str {
        "append"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notion_ip_core::Error;

    fn record(ip: &str) -> IpRecord {
        IpRecord::parse(&format!("{ip} (Updated: 2024-03-01T11:30:00Z)")).unwrap()
    }

    #[test]
    fn recorded_address_is_previous() {
        let previous = previous_address(Ok(record("1.2.3.4"))).unwrap();
        assert_eq!(previous, Ipv4Address::parse("1.2.3.4"));
    }

    #[test]
    fn read_errors_mean_unknown_previous() {
        assert_eq!(previous_address(Err(Error::notion_read("status 500"))).unwrap(), None);
        assert_eq!(previous_address(Err(Error::not_found("no record"))).unwrap(), None);
    }

    #[test]
    fn fatal_errors_are_passed_on() {
        let err = previous_address(Err(Error::config("NOTION_PAGE_ID cannot be empty"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
    }
}
