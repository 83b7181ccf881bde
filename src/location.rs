use crate::fetch::ApiResponse;
use crate::identifier::Identifier;
use crate::precision::Precision;

use serde::Serialize;
use std::fmt;

/// One resolved location. For [`Precision::Country`] only the country fields are set.
///
/// Note: for the USA, "region" is the state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    identifier: Identifier,
    ip_address: Option<String>,
    precision: Precision,
    country_code: Option<String>,
    country_name: Option<String>,
    region: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    time_zone: Option<String>,
}

impl Location {
    pub fn from_response(identifier: Identifier, response: ApiResponse, precision: Precision) -> Self {
        let ApiResponse {
            ip_address,
            country_code,
            country_name,
            region_name,
            city_name,
            zip_code,
            latitude,
            longitude,
            time_zone,
            ..
        } = response;
        let mut location = Self {
            identifier,
            ip_address,
            precision,
            country_code,
            country_name,
            region: None,
            city: None,
            postal_code: None,
            latitude: None,
            longitude: None,
            time_zone: None,
        };
        if precision == Precision::City {
            location.region = region_name;
            location.city = city_name;
            location.postal_code = zip_code;
            location.latitude = latitude;
            location.longitude = longitude;
            location.time_zone = time_zone;
        }
        location
    }

    /// The IP/domain this location was requested for.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The IP address reported by the provider, the resolved one for domains.
    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn country_name(&self) -> Option<&str> {
        self.country_name.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// UTC offset as reported by the provider, e.g. "-05:00".
    pub fn time_zone(&self) -> Option<&str> {
        self.time_zone.as_deref()
    }

    /// Formatted like "Ann Arbor, Michigan, United States", missing parts are skipped.
    pub fn friendly_name(&self) -> String {
        let parts: Vec<&str> = match self.precision {
            Precision::Country => vec![self.country_name()],
            Precision::City => vec![self.city(), self.region(), self.country_name()],
        }
        .into_iter()
        .flatten()
        .collect();
        parts.join(", ")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.friendly_name())
    }
}
