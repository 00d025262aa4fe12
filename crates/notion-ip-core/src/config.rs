//! Configuration types for notion-ip
//!
//! Configuration comes from environment-style key/value pairs. Parsing goes
//! through [`AppConfig::from_lookup`] so it can be exercised without touching
//! the process environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::traits::IpService;

/// Default IP-echo services, tried in order
pub const DEFAULT_IP_SERVICES: &[&str] = &["https://api.ipify.org", "https://ipv4.icanhazip.com"];

/// Default Notion API base URL
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com/v1";

/// Default page property overwritten by the overwrite recorder
pub const DEFAULT_TITLE_PROPERTY: &str = "Title";

const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 5;
const DEFAULT_NOTION_TIMEOUT_SECS: u64 = 10;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// IP-echo resolver settings
    pub resolver: ResolverConfig,

    /// Notion API settings
    pub notion: NotionConfig,

    /// Which recorder variant to run
    #[serde(default)]
    pub mode: RecorderMode,

    /// Perform reads but skip writes
    #[serde(default)]
    pub dry_run: bool,

    /// Log level name (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, crate::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let (token, page_id) = match (get("NOTION_TOKEN"), get("NOTION_PAGE_ID")) {
            (Some(token), Some(page_id)) => (token, page_id),
            _ => {
                return Err(crate::Error::config(
                    "NOTION_TOKEN and NOTION_PAGE_ID must be set in environment variables",
                ));
            }
        };

        let services = match get("IP_SERVICES") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_IP_SERVICES.iter().map(|s| s.to_string()).collect(),
        };

        let mode = match get("NOTION_RECORD_MODE") {
            Some(mode) => mode.parse()?,
            None => RecorderMode::default(),
        };

        let dry_run = match get("NOTION_IP_MODE") {
            Some(m) => match m.to_lowercase().as_str() {
                "dry-run" => true,
                "live" => false,
                other => {
                    return Err(crate::Error::config(format!(
                        "NOTION_IP_MODE '{other}' is not valid. Valid modes: live, dry-run"
                    )));
                }
            },
            None => false,
        };

        let config = Self {
            resolver: ResolverConfig {
                services,
                timeout_secs: parse_secs(
                    "IP_SERVICE_TIMEOUT_SECS",
                    get("IP_SERVICE_TIMEOUT_SECS"),
                    DEFAULT_RESOLVER_TIMEOUT_SECS,
                )?,
            },
            notion: NotionConfig {
                token,
                page_id,
                api_url: get("NOTION_API_URL")
                    .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_string()),
                title_property: get("NOTION_TITLE_PROPERTY")
                    .unwrap_or_else(|| DEFAULT_TITLE_PROPERTY.to_string()),
                timeout_secs: parse_secs(
                    "NOTION_TIMEOUT_SECS",
                    get("NOTION_TIMEOUT_SECS"),
                    DEFAULT_NOTION_TIMEOUT_SECS,
                )?,
            },
            mode,
            dry_run,
            log_level: get("NOTION_IP_LOG_LEVEL").unwrap_or_else(default_log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.resolver.validate()?;
        self.notion.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(crate::Error::config(format!(
                "NOTION_IP_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ))),
        }
    }
}

/// IP-echo resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Service URLs, tried in order
    pub services: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_resolver_timeout_secs")]
    pub timeout_secs: u64,
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.services.is_empty() {
            return Err(crate::Error::config("IP_SERVICES must list at least one URL"));
        }
        for url in &self.services {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(crate::Error::config(format!(
                    "IP service URL must use HTTP or HTTPS scheme. Got: {url}"
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("IP_SERVICE_TIMEOUT_SECS must be > 0"));
        }
        Ok(())
    }

    pub fn ip_services(&self) -> Vec<IpService> {
        self.services.iter().map(IpService::new).collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            services: DEFAULT_IP_SERVICES.iter().map(|s| s.to_string()).collect(),
            timeout_secs: DEFAULT_RESOLVER_TIMEOUT_SECS,
        }
    }
}

/// Notion API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token. Never logged.
    pub token: String,

    /// Target page ID
    pub page_id: String,

    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Page property set by the overwrite recorder
    #[serde(default = "default_title_property")]
    pub title_property: String,

    /// Request timeout in seconds
    #[serde(default = "default_notion_timeout_secs")]
    pub timeout_secs: u64,
}

impl NotionConfig {
    /// Create a configuration with default endpoint, property and timeout
    pub fn new(token: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            page_id: page_id.into(),
            api_url: default_api_url(),
            title_property: default_title_property(),
            timeout_secs: DEFAULT_NOTION_TIMEOUT_SECS,
        }
    }

    /// Point the client at a different API base
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Overwrite a different page property
    pub fn with_title_property(mut self, property: impl Into<String>) -> Self {
        self.title_property = property.into();
        self
    }

    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.token.is_empty() {
            return Err(crate::Error::config("NOTION_TOKEN cannot be empty"));
        }
        if self.page_id.is_empty() {
            return Err(crate::Error::config("NOTION_PAGE_ID cannot be empty"));
        }
        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "NOTION_API_URL must use HTTP or HTTPS scheme. Got: {}",
                self.api_url
            )));
        }
        if self.title_property.is_empty() {
            return Err(crate::Error::config("NOTION_TITLE_PROPERTY cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("NOTION_TIMEOUT_SECS must be > 0"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Keeps the token out of logs
impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("token", &"<REDACTED>")
            .field("page_id", &self.page_id)
            .field("api_url", &self.api_url)
            .field("title_property", &self.title_property)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Recorder variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecorderMode {
    /// Append a timestamped paragraph when the address changed
    #[default]
    Append,
    /// Overwrite the page title on every run
    Overwrite,
}

impl RecorderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecorderMode::Append => "append",
            RecorderMode::Overwrite => "overwrite",
        }
    }
}

impl FromStr for RecorderMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" => Ok(RecorderMode::Append),
            "overwrite" => Ok(RecorderMode::Overwrite),
            other => Err(crate::Error::config(format!(
                "NOTION_RECORD_MODE '{other}' is not supported. \
                Supported modes: append, overwrite"
            ))),
        }
    }
}

impl fmt::Display for RecorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_secs(key: &str, value: Option<String>, default: u64) -> Result<u64, crate::Error> {
    match value {
        Some(v) => v
            .parse()
            .map_err(|_| crate::Error::config(format!("{key} must be a whole number of seconds. Got: {v}"))),
        None => Ok(default),
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_resolver_timeout_secs() -> u64 {
    DEFAULT_RESOLVER_TIMEOUT_SECS
}

fn default_notion_timeout_secs() -> u64 {
    DEFAULT_NOTION_TIMEOUT_SECS
}

fn default_api_url() -> String {
    DEFAULT_NOTION_API_URL.to_string()
}

fn default_title_property() -> String {
    DEFAULT_TITLE_PROPERTY.to_string()
}
