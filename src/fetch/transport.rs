#[cfg(test)]
use super::scripted::ScriptedTransport;
use crate::error::TransportError;
use crate::timeouts::Timeouts;

use enum_dispatch::enum_dispatch;
use hyper::body::{Body, Bytes};
use hyper::client::{Client, HttpConnector};
use hyper::header::LOCATION;
use hyper::http::Uri;
use hyper::Response;
use hyper_tls::HttpsConnector;

const MAX_REDIRECTS: usize = 8;

/// HTTP capability behind every lookup. Requests are sequential and blocking.
#[enum_dispatch]
pub enum Transport {
    Hyper(HyperTransport),
    #[cfg(test)]
    Scripted(ScriptedTransport),
}

#[enum_dispatch(Transport)]
pub trait Fetch {
    /// Returns the body of a successful (2xx) response.
    fn get(&self, uri: Uri) -> Result<Bytes, TransportError>;
    fn set_timeouts(&mut self, timeouts: Timeouts);
}

/// Keeps one hyper client, so keep-alive connections are reused between lookups, and a
/// current-thread runtime to drive it. Must not be used from inside another tokio runtime.
pub struct HyperTransport {
    runtime: tokio::runtime::Runtime,
    client: Client<HttpsConnector<HttpConnector>, Body>,
    timeouts: Timeouts,
}

impl HyperTransport {
    pub fn new(timeouts: Timeouts) -> Result<Self, TransportError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            runtime,
            client: Self::client(timeouts),
            timeouts,
        })
    }

    fn client(timeouts: Timeouts) -> Client<HttpsConnector<HttpConnector>, Body> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(timeouts.connect()));
        let https = HttpsConnector::new_with_connector(http);
        Client::builder().build::<_, Body>(https)
    }

    async fn request(&self, mut uri: Uri) -> Result<Bytes, TransportError> {
        let mut redirects = 0;
        let response = loop {
            let response = self.client.get(uri.clone()).await?;
            let status = response.status();
            if status.is_success() {
                break response;
            }
            if !status.is_redirection() || redirects == MAX_REDIRECTS {
                return Err(status.into());
            }
            uri = redirect_target(&uri, &response).ok_or(status)?;
            redirects += 1;
            log::debug!("following {status} redirect to {uri}");
        };
        Ok(hyper::body::to_bytes(response.into_body()).await?)
    }
}

/// Absolute `Location` as is, relative one against the current scheme and authority.
fn redirect_target(current: &Uri, response: &Response<Body>) -> Option<Uri> {
    let location: Uri = response
        .headers()
        .get(LOCATION)?
        .to_str()
        .ok()?
        .parse()
        .ok()?;
    if location.authority().is_some() {
        return Some(location);
    }
    let mut parts = location.into_parts();
    parts.scheme = current.scheme().cloned();
    parts.authority = current.authority().cloned();
    Uri::from_parts(parts).ok()
}

impl Fetch for HyperTransport {
    fn get(&self, uri: Uri) -> Result<Bytes, TransportError> {
        let transfer_timeout = self.timeouts.transfer();
        self.runtime.block_on(async {
            tokio::time::timeout(transfer_timeout, self.request(uri))
                .await
                .unwrap_or_else(|_| Err(TransportError::Timeout(transfer_timeout)))
        })
    }

    fn set_timeouts(&mut self, timeouts: Timeouts) {
        if self.timeouts != timeouts {
            self.client = Self::client(timeouts);
            self.timeouts = timeouts;
        }
    }
}
