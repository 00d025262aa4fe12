// # HTTP Address Resolver
//
// This crate provides an HTTP-based address source for notion-ip.
//
// ## Architecture
//
// Queries an ordered list of IP-echo services (e.g. api.ipify.org,
// ipv4.icanhazip.com) with a plain GET and returns the first body that
// looks like an IPv4 address. A failing service is logged and skipped;
// there is no retry and no backoff.

use notion_ip_core::traits::{AddressSource, IpService};
use notion_ip_core::{Error, Ipv4Address, ResolverConfig, Result};

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{Instrument, Span, error, info, info_span};

/// Default per-request timeout for IP-echo services
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves the external IPv4 address from IP-echo services
#[derive(Debug)]
pub struct HttpAddressResolver {
    /// Services, tried in order
    services: Vec<IpService>,

    /// HTTP client (carries the per-request timeout)
    client: reqwest::Client,

    /// Span all resolver events are recorded under
    span: Span,
}

impl HttpAddressResolver {
    /// Create a new resolver
    ///
    /// # Parameters
    ///
    /// - `services`: Endpoints to try, in order
    /// - `timeout`: Per-request timeout
    pub fn new(services: Vec<IpService>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            services,
            client,
            span: info_span!("resolver"),
        })
    }

    /// Create from resolver configuration
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Self::new(config.ip_services(), config.timeout())
    }

    /// Log under `span` instead of the default resolver span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn services(&self) -> &[IpService] {
        &self.services
    }

    /// Try each service in order, returning the first valid address
    async fn resolve_inner(&self) -> Result<Ipv4Address> {
        for service in &self.services {
            info!(service = %service.url, "Attempting to fetch IPv4 address");

            if let Some(ip) = self.query(service).await {
                info!(service = %service.url, ip = %ip, "Successfully retrieved IPv4 address");
                return Ok(ip);
            }
        }

        Err(Error::resolver_exhausted(format!(
            "no service succeeded ({} tried)",
            self.services.len()
        )))
    }

    /// Query a single service. Every failure is logged and mapped to `None`.
    async fn query(&self, service: &IpService) -> Option<Ipv4Address> {
        let response = match self.client.get(&service.url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(service = %service.url, error = %e, "Failed to make request");
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            error!(service = %service.url, status_code = status.as_u16(), "Non-OK HTTP status");
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(service = %service.url, error = %e, "Failed to read response body");
                return None;
            }
        };

        let ip = Ipv4Address::parse(&body);
        if ip.is_none() {
            error!(service = %service.url, ip = body.trim(), "Invalid IPv4 address format");
        }
        ip
    }
}

#[async_trait::async_trait]
impl AddressSource for HttpAddressResolver {
    async fn resolve(&self) -> Result<Ipv4Address> {
        self.resolve_inner().instrument(self.span.clone()).await
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
