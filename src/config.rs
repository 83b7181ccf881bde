use crate::non_zero_duration::NonZeroDuration;
use crate::precision::Precision;
use crate::timeouts::Timeouts;

use hyper::http::uri::InvalidUri;
use hyper::http::Uri;
use lazy_static::lazy_static;
use serde::Deserialize;
use std::path::Path;

lazy_static! {
    static ref CITY_PRIMARY: Uri = "http://api.ipinfodb.com/v3/ip-city/".parse().unwrap();
    static ref CITY_BACKUP: Uri = "http://backup.ipinfodb.com/v3/ip-city/".parse().unwrap();
    static ref COUNTRY_PRIMARY: Uri = "http://api.ipinfodb.com/v3/ip-country/".parse().unwrap();
    static ref COUNTRY_BACKUP: Uri = "http://backup.ipinfodb.com/v3/ip-country/".parse().unwrap();
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    #[serde(default)]
    pub precision: Precision,
    #[serde(default = "Timeouts::default_timeout")]
    pub connect_timeout: NonZeroDuration,
    #[serde(default = "Timeouts::default_timeout")]
    pub transfer_timeout: NonZeroDuration,
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            precision: Precision::default(),
            connect_timeout: Timeouts::default_timeout(),
            transfer_timeout: Timeouts::default_timeout(),
            endpoints: Endpoints::default(),
        }
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts::new(self.connect_timeout, self.transfer_timeout)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Endpoints {
    #[serde(default = "EndpointPair::default_city")]
    pub city: EndpointPair,
    #[serde(default = "EndpointPair::default_country")]
    pub country: EndpointPair,
}

impl Endpoints {
    pub fn get(&self, precision: Precision) -> &EndpointPair {
        match precision {
            Precision::City => &self.city,
            Precision::Country => &self.country,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            city: EndpointPair::default_city(),
            country: EndpointPair::default_country(),
        }
    }
}

/// Two equivalent API hosts, the backup is asked only after the primary fails.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "EndpointPairConfig")]
pub struct EndpointPair {
    pub primary: Uri,
    pub backup: Option<Uri>,
}

#[derive(Deserialize)]
struct EndpointPairConfig {
    #[serde(with = "http_serde::uri")]
    primary: Uri,
    #[serde(default)]
    backup: Option<String>,
}

impl TryFrom<EndpointPairConfig> for EndpointPair {
    type Error = InvalidUri;

    fn try_from(value: EndpointPairConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            primary: value.primary,
            backup: value.backup.as_deref().map(str::parse).transpose()?,
        })
    }
}

impl EndpointPair {
    pub fn new(primary: Uri, backup: Option<Uri>) -> Self {
        Self { primary, backup }
    }

    fn default_city() -> Self {
        Self::new(CITY_PRIMARY.clone(), Some(CITY_BACKUP.clone()))
    }

    fn default_country() -> Self {
        Self::new(COUNTRY_PRIMARY.clone(), Some(COUNTRY_BACKUP.clone()))
    }
}

pub fn parse_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let toml_string = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&toml_string)?;
    Ok(config)
}
