use crate::error::GeolocatorError;

use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

/// Normalized IP address or domain name, the key of every cached lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Lower-cases and trims the input. IP addresses are rendered in canonical form,
    /// so "::FFFF:10.0.0.1" and "10.0.0.1" are the same identifier.
    pub fn new(input: &str) -> Result<Self, GeolocatorError> {
        let cleaned = input.trim().to_lowercase();
        if cleaned.is_empty() {
            return Err(GeolocatorError::InvalidParameter(
                "IP/domain must not be empty".into(),
            ));
        }
        if let Ok(ip) = cleaned.parse::<IpAddr>() {
            return Ok(Self(ip.to_canonical_ip().to_string()));
        }
        if !cleaned.chars().all(is_hostname_char) {
            return Err(GeolocatorError::InvalidParameter(format!(
                r#""{cleaned}" is neither an IP address nor a domain name"#
            )));
        }
        Ok(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Underscores are not valid in hostnames but do appear in real DNS names.
fn is_hostname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<&str> for Identifier {
    type Error = GeolocatorError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

// Remove after IpAddr::to_canonical stabilizes
// https://github.com/rust-lang/rust/issues/27709
trait CanonicalIpAddr {
    fn to_canonical_ip(&self) -> Self;
}

impl CanonicalIpAddr for IpAddr {
    fn to_canonical_ip(&self) -> Self {
        match self {
            IpAddr::V4(v4) => IpAddr::V4(*v4),
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => IpAddr::V4(v4),
                None => IpAddr::V6(*v6),
            },
        }
    }
}
