#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use price_source::sources::fmp::{FmpConfig, FmpSource};
use price_source::transport::{QuoteTransport, TransportError, TransportResponse};
use secrecy::SecretString;

/// Scripted transport: answers every request with one canned response and
/// records the URLs it was asked for.
pub struct StubTransport {
    status: u16,
    body: String,
    requests: Arc<Mutex<Vec<String>>>, // shared so tests can inspect after the move
}

impl StubTransport {
    pub fn ok(body: &str) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle onto the recorded URLs; stays valid after the transport moves
    /// into a source.
    pub fn requests(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl QuoteTransport for StubTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(TransportResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Transport that fails every request, as if the network were down.
pub struct DownTransport;

#[async_trait]
impl QuoteTransport for DownTransport {
    async fn get(&self, _url: &str) -> Result<TransportResponse, TransportError> {
        Err(TransportError::Unavailable("connection refused".to_string()))
    }
}

pub fn test_config() -> FmpConfig {
    FmpConfig::new(SecretString::new("test-key".into()))
}

/// Source wired to a scripted transport, plus the URL log.
pub fn source_with_transport(stub: StubTransport) -> (FmpSource, Arc<Mutex<Vec<String>>>) {
    let requests = stub.requests();
    let source = FmpSource::with_transport(test_config(), Box::new(stub));
    (source, requests)
}

/// Source whose provider always answers 200 with `body`.
pub fn source_with_body(body: &str) -> (FmpSource, Arc<Mutex<Vec<String>>>) {
    source_with_transport(StubTransport::ok(body))
}
