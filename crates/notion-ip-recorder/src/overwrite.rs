// # Overwrite recorder
//
// Sets the page title to `"Current IP: <ip>"` on every run, regardless of
// its previous value. No read is performed.

use async_trait::async_trait;
use notion_ip_core::{Ipv4Address, RecordOutcome, Recorder, Result};
use tracing::{Instrument, Span, info, info_span};

use crate::client::NotionClient;
use crate::model::PageUpdate;

/// Title text written for `ip`
pub fn title_content(ip: &Ipv4Address) -> String {
    format!("Current IP: {ip}")
}

/// Overwrites the page title property unconditionally
#[derive(Debug)]
pub struct OverwriteRecorder {
    client: NotionClient,
    dry_run: bool,
    span: Span,
}

impl OverwriteRecorder {
    pub fn new(client: NotionClient, dry_run: bool) -> Self {
        let span = info_span!("recorder", mode = "overwrite", page_id = client.page_id());
        Self {
            client,
            dry_run,
            span,
        }
    }

    /// Log under `span` instead of the default recorder span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    async fn record_inner(&self, ip: &Ipv4Address) -> Result<RecordOutcome> {
        let content = title_content(ip);

        if self.dry_run {
            let payload =
                serde_json::to_string(&PageUpdate::title(self.client.title_property(), &content))?;
            info!(%payload, "[DRY-RUN] Would update Notion page title");
            return Ok(RecordOutcome::DryRun { payload });
        }

        self.client.update_title(&content).await?;
        Ok(RecordOutcome::Overwritten)
    }
}

#[async_trait]
impl Recorder for OverwriteRecorder {
    async fn record(&self, ip: &Ipv4Address) -> Result<RecordOutcome> {
        self.record_inner(ip).instrument(self.span.clone()).await
    }

    fn recorder_name(&self) -> &'static str {
        "overwrite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_text() {
        let ip = Ipv4Address::parse("9.9.9.9").unwrap();
        assert_eq!(title_content(&ip), "Current IP: 9.9.9.9");
    }
}
