// # Address Source Trait
//
// Defines the interface for learning the caller's external IPv4 address.
//
// ## Implementations
//
// - HTTP IP-echo services: `notion-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use notion_ip_core::AddressSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* AddressSource implementation */;
//     let ip = source.resolve().await?;
//     println!("external address: {ip}");
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::address::Ipv4Address;

/// A single IP-echo endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpService {
    pub url: String,
}

impl IpService {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Trait for address source implementations
///
/// A source makes one resolution pass per call. It may try several
/// endpoints internally, but it never retries with backoff and never
/// caches a result between calls.
#[async_trait]
pub trait AddressSource: Send + Sync {
    /// Resolve the current external IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Address)`: The first valid address obtained
    /// - `Err(Error::ResolverExhausted)`: If no endpoint produced one
    async fn resolve(&self) -> Result<Ipv4Address, crate::Error>;

    /// Name used in logs
    fn source_name(&self) -> &'static str;
}
