//! Address and record text types
//!
//! [`Ipv4Address`] is the value handed from the resolver to the recorder.
//! [`IpRecord`] is the text form an address takes inside a Notion
//! paragraph block: `"<ip> (Updated: <RFC3339 timestamp>)"`.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

const UPDATED_MARKER: &str = " (Updated: ";

/// Basic IPv4 shape check: exactly four dot-separated, non-empty segments.
///
/// Segment contents and ranges are not inspected.
pub fn is_ipv4_shape(s: &str) -> bool {
    let mut segments = 0;
    for part in s.split('.') {
        if part.is_empty() {
            return false;
        }
        segments += 1;
    }
    segments == 4
}

/// An IPv4 address in dot-decimal shape, as returned by an IP-echo service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv4Address(String);

impl Ipv4Address {
    /// Parse a raw service body, trimming surrounding whitespace first
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        is_ipv4_shape(trimmed).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ipv4Address {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("not an IPv4 address: {value:?}"))
    }
}

impl From<Ipv4Address> for String {
    fn from(addr: Ipv4Address) -> Self {
        addr.0
    }
}

impl PartialEq<str> for Ipv4Address {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Ipv4Address {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An address together with the time it was recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRecord {
    pub ip: Ipv4Address,
    pub updated: DateTime<FixedOffset>,
}

impl IpRecord {
    pub fn new(ip: Ipv4Address, updated: DateTime<FixedOffset>) -> Self {
        Self { ip, updated }
    }

    /// Paragraph text for this record
    pub fn to_content(&self) -> String {
        format!(
            "{}{}{})",
            self.ip,
            UPDATED_MARKER,
            self.updated.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }

    /// Parse paragraph text back into a record.
    ///
    /// Returns `None` unless the text is exactly
    /// `"<ip> (Updated: <RFC3339>)"` with an IPv4-shaped ip.
    pub fn parse(content: &str) -> Option<Self> {
        let inner = content.trim().strip_suffix(')')?;
        let (ip, timestamp) = inner.split_once(UPDATED_MARKER)?;
        let ip = Ipv4Address::parse(ip)?;
        let updated = DateTime::parse_from_rfc3339(timestamp).ok()?;
        Some(Self { ip, updated })
    }
}

impl fmt::Display for IpRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_accepts_four_non_empty_segments() {
        assert!(is_ipv4_shape("1.2.3.4"));
        assert!(is_ipv4_shape("203.0.113.77"));
        // Only the shape is checked, not the octet range
        assert!(is_ipv4_shape("999.a.b.c"));
    }

    #[test]
    fn shape_rejects_malformed_bodies() {
        for body in ["", "1.2.3", "1..3.4", "1.2.3.4.5", ".1.2.3", "1.2.3.", "<html>"] {
            assert!(!is_ipv4_shape(body), "{body:?} should be rejected");
        }
    }

    #[test]
    fn parse_trims_whitespace() {
        let addr = Ipv4Address::parse("  5.6.7.8\n").unwrap();
        assert_eq!(addr.as_str(), "5.6.7.8");
        assert!(Ipv4Address::parse(" \n").is_none());
    }

    #[test]
    fn record_content_format() {
        let updated = DateTime::parse_from_rfc3339("2024-03-01T12:30:00+01:00").unwrap();
        let record = IpRecord::new(Ipv4Address::parse("5.6.7.8").unwrap(), updated);
        assert_eq!(
            record.to_content(),
            "5.6.7.8 (Updated: 2024-03-01T12:30:00+01:00)"
        );
    }

    #[test]
    fn record_parses_its_own_content() {
        let parsed = IpRecord::parse("1.2.3.4 (Updated: 2024-03-01T11:30:00Z)").unwrap();
        assert_eq!(parsed.ip, "1.2.3.4");
        assert_eq!(parsed.updated.timestamp(), 1_709_292_600);
    }

    #[test]
    fn record_rejects_other_paragraphs() {
        for text in [
            "",
            "Some notes about the server",
            "1.2.3.4",
            "1.2.3 (Updated: 2024-03-01T11:30:00Z)",
            "1.2.3.4 (Updated: yesterday)",
            "1.2.3.4 (Updated: 2024-03-01T11:30:00Z",
        ] {
            assert!(IpRecord::parse(text).is_none(), "{text:?} should not parse");
        }
    }
}
