pub use response::ApiResponse;
pub use transport::{Fetch, HyperTransport, Transport};

mod response;
#[cfg(test)]
pub(crate) mod scripted;
mod transport;

use crate::error::{GeolocatorError, TransportError};
use crate::identifier::Identifier;

use hyper::http::uri::Scheme;
use hyper::http::Uri;
use url::form_urlencoded;

/// Builds `<endpoint>?ip=<identifier>&format=json&key=<api_key>`.
pub fn compose_query_uri(
    endpoint: &Uri,
    identifier: &Identifier,
    api_key: &str,
) -> Result<Uri, hyper::http::Error> {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("ip", identifier.as_str())
        .append_pair("format", "json")
        .append_pair("key", api_key)
        .finish();
    let path_and_query = format!("{path}?{query}", path = endpoint.path());
    // A scheme without authority fails to build, so relative endpoints are rejected
    let mut builder = Uri::builder()
        .scheme(endpoint.scheme().cloned().unwrap_or(Scheme::HTTP))
        .path_and_query(path_and_query);
    if let Some(authority) = endpoint.authority() {
        builder = builder.authority(authority.clone());
    }
    builder.build()
}

/// Single request to one endpoint, no retries.
pub fn fetch_response(
    transport: &Transport,
    endpoint: &Uri,
    identifier: &Identifier,
    api_key: &str,
) -> Result<ApiResponse, GeolocatorError> {
    let uri = compose_query_uri(endpoint, identifier, api_key).map_err(TransportError::from)?;
    log::debug!(r#"requesting "{identifier}" from {endpoint}"#);
    let body = transport.get(uri)?;
    let response: ApiResponse = serde_json::from_slice(&body).map_err(TransportError::from)?;
    if !response.is_ok() {
        return Err(GeolocatorError::ApiStatus {
            message: response.status_message,
        });
    }
    Ok(response)
}
