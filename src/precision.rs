use crate::error::GeolocatorError;

use serde::{Deserialize, Serialize};

/// Granularity of lookup results. Country data is a subset of city data.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Precision {
    #[default]
    City,
    Country,
}

impl<'a> TryFrom<&'a str> for Precision {
    type Error = GeolocatorError;

    fn try_from(s: &'a str) -> Result<Self, GeolocatorError> {
        match s.trim() {
            "City" | "city" => Ok(Self::City),
            "Country" | "country" => Ok(Self::Country),
            other => Err(GeolocatorError::InvalidParameter(format!(
                r#"precision "{other}" is unknown, expected "city" or "country""#
            ))),
        }
    }
}

impl TryFrom<String> for Precision {
    type Error = GeolocatorError;

    fn try_from(s: String) -> Result<Self, GeolocatorError> {
        s.as_str().try_into()
    }
}

impl TryFrom<u8> for Precision {
    type Error = GeolocatorError;

    fn try_from(value: u8) -> Result<Self, GeolocatorError> {
        match value {
            1 => Ok(Self::City),
            2 => Ok(Self::Country),
            _ => Err(GeolocatorError::InvalidParameter(format!(
                "precision {value} is unknown"
            ))),
        }
    }
}

impl From<Precision> for &'static str {
    fn from(precision: Precision) -> Self {
        match precision {
            Precision::City => "city",
            Precision::Country => "country",
        }
    }
}
