use async_trait::async_trait;
use chrono::{DateTime, Utc};
use snafu::ResultExt;
use tracing::{debug, warn};

use crate::models::price_point::PricePoint;
use crate::models::request::QuoteRequest;
use crate::sources::{
    ClientBuildSnafu, ParseSnafu, PriceSource, SourceError, SourceInitError,
};
use crate::transport::{HttpTransport, QuoteTransport};

use super::config::FmpConfig;
use super::normalize::{eod_point, quote_point};
use super::query::ProviderQuery;
use super::response::{EodRecord, decode_eod_records, decode_quotes};

/// [`PriceSource`] implementation for the FMP REST API.
///
/// Stateless between calls: each operation issues exactly one request over
/// the transport and never retries. The instance can be shared across tasks.
pub struct FmpSource {
    config: FmpConfig,
    transport: Box<dyn QuoteTransport>,
}

impl FmpSource {
    /// Creates a source that talks to the provider over HTTPS.
    pub fn new(config: FmpConfig) -> Result<Self, SourceInitError> {
        let transport = HttpTransport::new().context(ClientBuildSnafu)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    /// Creates a source configured from the environment.
    ///
    /// Reads the API key from the `FMP_API_KEY` environment variable and
    /// fails fast when it is absent.
    pub fn from_env() -> Result<Self, SourceInitError> {
        Self::new(FmpConfig::from_env()?)
    }

    /// Creates a source over a caller-supplied transport. This is how tests
    /// script provider behavior, and how hosts plug in their own plumbing.
    pub fn with_transport(config: FmpConfig, transport: Box<dyn QuoteTransport>) -> Self {
        Self { config, transport }
    }

    /// One provider round trip. Transport failures and non-success statuses
    /// come back as `None`: the provider holds no rows for non-trading days,
    /// and callers treat "unreachable" and "no rows" the same way.
    async fn fetch_body(&self, query: &ProviderQuery) -> Option<String> {
        let url = query.url(&self.config);
        debug!(symbol = %query.symbol, scope = %query.scope(), "requesting quotes");
        match self.transport.get(&url).await {
            Ok(response) if response.is_success() => Some(response.body),
            Ok(response) => {
                warn!(
                    symbol = %query.symbol,
                    scope = %query.scope(),
                    status = response.status,
                    "provider returned non-success status, treating as no data"
                );
                None
            }
            Err(error) => {
                warn!(
                    symbol = %query.symbol,
                    scope = %query.scope(),
                    error = %error,
                    "transport failed, treating as no data"
                );
                None
            }
        }
    }

    /// Fetches and decodes an end-of-day response. `Ok(None)` means no data;
    /// a body that decodes to something other than a record array is a
    /// parse error.
    async fn fetch_eod_records(
        &self,
        query: &ProviderQuery,
    ) -> Result<Option<Vec<EodRecord>>, SourceError> {
        let Some(body) = self.fetch_body(query).await else {
            return Ok(None);
        };
        let records = decode_eod_records(&body).map_err(|error| {
            ParseSnafu {
                symbol: query.symbol.as_str(),
                scope: query.scope(),
                detail: format!("body is not an end-of-day array: {error}"),
            }
            .build()
        })?;
        Ok(Some(records))
    }
}

#[async_trait]
impl PriceSource for FmpSource {
    async fn get_latest_price(&self, symbol: &str) -> Result<Option<PricePoint>, SourceError> {
        let request = QuoteRequest::Latest {
            symbol: symbol.to_string(),
        };
        let query = ProviderQuery::for_request(&request);
        let scope = query.scope();

        let Some(body) = self.fetch_body(&query).await else {
            return Ok(None);
        };
        let records = decode_quotes(&body).map_err(|error| {
            ParseSnafu {
                symbol,
                scope,
                detail: format!("body is not a quote array: {error}"),
            }
            .build()
        })?;

        match records.first() {
            Some(record) => Ok(Some(quote_point(symbol, scope, record)?)),
            None => Ok(None),
        }
    }

    async fn get_historical_price(
        &self,
        symbol: &str,
        time: DateTime<Utc>,
    ) -> Result<Option<PricePoint>, SourceError> {
        let request = QuoteRequest::NearDate {
            symbol: symbol.to_string(),
            time,
        };
        let query = ProviderQuery::for_request(&request);
        let scope = query.scope();

        let Some(records) = self.fetch_eod_records(&query).await? else {
            return Ok(None);
        };

        // Rows arrive newest-first, so the first one is the closest trading
        // day, favoring the most recent day at or before `time`.
        match records.first() {
            Some(record) => Ok(Some(eod_point(symbol, scope, record)?)),
            None => Ok(None),
        }
    }

    async fn get_price_series(
        &self,
        symbol: &str,
        time_begin: DateTime<Utc>,
        time_end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>, SourceError> {
        let request = QuoteRequest::Series {
            symbol: symbol.to_string(),
            begin: time_begin,
            end: time_end,
        };
        let query = ProviderQuery::for_request(&request);
        let scope = query.scope();

        let Some(records) = self.fetch_eod_records(&query).await? else {
            return Ok(Vec::new());
        };

        let mut points = records
            .iter()
            .map(|record| eod_point(symbol, scope, record))
            .collect::<Result<Vec<_>, _>>()?;
        points.sort_by_key(|point| point.timestamp);
        Ok(points)
    }
}
