// # Notion Recorders
//
// This crate provides the two Notion recorder implementations for notion-ip
// and the client they share.
//
// - [`AppendRecorder`]: append `"<ip> (Updated: <RFC3339>)"` when the address changed
// - [`OverwriteRecorder`]: set the page title to `"Current IP: <ip>"` every run
//
// ## Security Requirements
//
// - The integration token NEVER appears in logs or `Debug` output
// - The token is provided via environment variables only
//
// ## API Reference
//
// - Notion API, version 2022-06-28: https://developers.notion.com/reference
// - Retrieve block children: GET `/blocks/:id/children`
// - Append block children: PATCH `/blocks/:id/children`
// - Update page properties: PATCH `/pages/:id`

pub mod append;
pub mod client;
pub mod model;
pub mod overwrite;

pub use append::AppendRecorder;
pub use client::{NOTION_VERSION, NotionClient};
pub use overwrite::OverwriteRecorder;

use notion_ip_core::{AppConfig, Recorder, RecorderMode, Result};

/// Create the recorder selected by `config.mode`
pub fn build_recorder(config: &AppConfig) -> Result<Box<dyn Recorder>> {
    let client = NotionClient::new(&config.notion)?;

    if config.dry_run {
        tracing::warn!("Recorder running in DRY-RUN mode - no changes will be made");
    }

    Ok(match config.mode {
        RecorderMode::Append => Box::new(AppendRecorder::new(client, config.dry_run)),
        RecorderMode::Overwrite => Box::new(OverwriteRecorder::new(client, config.dry_run)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notion_ip_core::{NotionConfig, ResolverConfig};

    fn config(mode: RecorderMode) -> AppConfig {
        AppConfig {
            resolver: ResolverConfig::default(),
            notion: NotionConfig::new("secret_abc", "page-1"),
            mode,
            dry_run: false,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn mode_selects_recorder() {
        let append = build_recorder(&config(RecorderMode::Append)).unwrap();
        let overwrite = build_recorder(&config(RecorderMode::Overwrite)).unwrap();

        assert_eq!(append.recorder_name(), "append");
        assert_eq!(overwrite.recorder_name(), "overwrite");
    }

    #[test]
    fn empty_token_is_rejected() {
        let mut cfg = config(RecorderMode::Append);
        cfg.notion.token.clear();
        assert!(build_recorder(&cfg).is_err());
    }
}
