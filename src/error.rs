use crate::identifier::Identifier;

use hyper::StatusCode;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeolocatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(r#"API returned error: "{message}""#)]
    ApiStatus { message: String },
    #[error(r#"IP/domain "{0}" was not found in the Geolocator"#)]
    UnknownIdentifier(Identifier),
    #[error("Geolocator has no IPs/domains")]
    NoIdentifiers,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Hyper(#[from] hyper::Error),
    #[error(transparent)]
    Http(#[from] hyper::http::Error),
    #[error("Request did not complete in {0:?}")]
    Timeout(Duration),
    #[error("Non-success status code: {0}")]
    NonSuccess(StatusCode),
    #[error("Cannot decode API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Cannot start HTTP runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl From<StatusCode> for TransportError {
    fn from(status_code: StatusCode) -> Self {
        TransportError::NonSuccess(status_code)
    }
}
