// # notion-ip
//
// Resolves the external IPv4 address once and records it in a Notion page.
// Meant to be invoked periodically by cron or a systemd timer.
//
// The binary is a thin integration layer: it reads configuration, sets up
// logging, builds the resolver and the recorder, and runs one engine pass.
//
// ## Configuration
//
// All configuration is done via environment variables. A `.env` file in the
// working directory is loaded first when present.
//
// ### Required
// - `NOTION_TOKEN`: Notion integration token
// - `NOTION_PAGE_ID`: Page to record into
//
// ### Optional
// - `IP_SERVICES`: Comma-separated IP-echo URLs (default: api.ipify.org, ipv4.icanhazip.com)
// - `NOTION_RECORD_MODE`: `append` (default) or `overwrite`
// - `NOTION_TITLE_PROPERTY`: Property set in overwrite mode (default: `Title`)
// - `NOTION_API_URL`: API base (default: `https://api.notion.com/v1`)
// - `IP_SERVICE_TIMEOUT_SECS`: Resolver timeout (default: 5)
// - `NOTION_TIMEOUT_SECS`: Notion timeout (default: 10)
// - `NOTION_IP_MODE`: `live` (default) or `dry-run`
// - `NOTION_IP_LOG_LEVEL`: trace, debug, info (default), warn, error
//
// ## Example
//
// ```bash
// export NOTION_TOKEN=secret_xxx
// export NOTION_PAGE_ID=0123456789abcdef0123456789abcdef
//
// notion-ip
// ```

use anyhow::Result;
use notion_ip_core::{AppConfig, Engine, Error, RunReport};
use notion_ip_http::HttpAddressResolver;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Address recorded, or already up to date
/// - 1: Configuration or startup error
/// - 2: Runtime error (resolver exhausted, Notion write failed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotionIpExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<NotionIpExitCode> for ExitCode {
    fn from(code: NotionIpExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = match load_config(|key| std::env::var(key).ok()) {
        Ok(cfg) => cfg,
        Err(code) => return code.into(),
    };

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return NotionIpExitCode::ConfigError.into();
    }

    if !dotenv_loaded {
        warn!("No .env file found. Relying on environment variables");
    }

    info!(
        mode = %config.mode,
        dry_run = config.dry_run,
        services = config.resolver.services.len(),
        "Configuration loaded"
    );

    let engine = match build_engine(&config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Startup error: {e:#}");
            return NotionIpExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return NotionIpExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(engine.run_once());
    if let Ok(report) = &result {
        info!(ip = %report.address, wrote = report.outcome.wrote(), "Run complete");
    }
    exit_code_for(&result).into()
}

/// Read configuration through `lookup`, printing the error on failure
fn load_config<F>(lookup: F) -> std::result::Result<AppConfig, NotionIpExitCode>
where
    F: Fn(&str) -> Option<String>,
{
    AppConfig::from_lookup(lookup).map_err(|e| {
        eprintln!("{e}");
        NotionIpExitCode::ConfigError
    })
}

/// Map a run result to the process exit code.
///
/// The engine has already logged failures with context.
fn exit_code_for(result: &notion_ip_core::Result<RunReport>) -> NotionIpExitCode {
    match result {
        Ok(_) => NotionIpExitCode::Success,
        Err(Error::Config(_)) => NotionIpExitCode::ConfigError,
        Err(e) if e.is_fatal() => NotionIpExitCode::RuntimeError,
        // Read-side errors are absorbed by the recorders
        Err(_) => NotionIpExitCode::Success,
    }
}

/// Wire the resolver and the configured recorder into an engine
fn build_engine(config: &AppConfig) -> Result<Engine> {
    let resolver = HttpAddressResolver::from_config(&config.resolver)?;
    let recorder = notion_ip_recorder::build_recorder(config)?;

    Ok(Engine::new(Box::new(resolver), recorder))
}
