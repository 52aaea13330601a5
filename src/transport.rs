//! Transport seam between price sources and the network.
//!
//! Sources issue plain `GET` requests and consume the raw status and body;
//! everything HTTP-specific (connection pooling, TLS, timeouts) lives behind
//! the [`QuoteTransport`] trait. Production code uses [`HttpTransport`];
//! tests substitute scripted implementations.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Errors a transport can report for a single exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or its body could not be read. The
    /// originating URL is stripped before wrapping, so rendering this
    /// variant never reveals the `apikey` query parameter.
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The transport cannot reach the provider for a non-HTTP reason. This is
    /// the variant non-HTTP transports (stubs, custom plumbing) report.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        // Request URLs carry the API key, and reqwest renders the URL in
        // its messages; strip it before the error can reach a log line.
        TransportError::Request(error.without_url())
    }
}

/// The raw outcome of one completed exchange: status code plus body text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, undecoded.
    pub body: String,
}

impl TransportResponse {
    /// Whether the status code is in the success range (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal request surface a price source needs from the network.
///
/// Implementations must be cheap to call repeatedly; sources hold one
/// transport for their whole lifetime and issue one `get` per operation.
#[async_trait]
pub trait QuoteTransport: Send + Sync {
    /// Performs one `GET` against `url` and returns the raw outcome.
    ///
    /// A non-success status is not an error at this layer; callers decide
    /// what to make of it.
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// Production transport over a shared [`reqwest::Client`].
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the underlying HTTP client.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl QuoteTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
