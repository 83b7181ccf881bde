use super::Fetch;
use crate::error::TransportError;
use crate::timeouts::Timeouts;

use hyper::body::Bytes;
use hyper::http::Uri;
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&Uri) -> Result<Bytes, TransportError> + Send>;

/// In-memory transport answering from a closure and recording every requested URI.
pub struct ScriptedTransport {
    responder: Responder,
    requests: Arc<Mutex<Vec<Uri>>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Uri) -> Result<Bytes, TransportError> + Send + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Shared log of requests, stays readable after the transport is moved away.
    pub fn requests(&self) -> Arc<Mutex<Vec<Uri>>> {
        Arc::clone(&self.requests)
    }
}

impl Fetch for ScriptedTransport {
    fn get(&self, uri: Uri) -> Result<Bytes, TransportError> {
        self.requests.lock().unwrap().push(uri.clone());
        (self.responder)(&uri)
    }

    fn set_timeouts(&mut self, _timeouts: Timeouts) {}
}
