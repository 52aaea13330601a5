use chrono::{Duration, NaiveDate};
use secrecy::ExposeSecret;

use crate::models::request::QuoteRequest;
use crate::sources::QueryScope;

use super::config::FmpConfig;

/// Days of lookback when resolving a quote near an instant. The provider has
/// no rows for non-trading days, so the window must span enough calendar
/// days to contain at least one trading day.
const NEAR_LOOKBACK_DAYS: i64 = 5;

/// Days of lookahead past the instant, tolerating timezone skew around
/// midnight.
const NEAR_LOOKAHEAD_DAYS: i64 = 1;

/// The provider endpoint a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// `quote`: the most recent quote for a symbol.
    Quote,
    /// `historical-price-eod/light`: end-of-day closes between two dates,
    /// returned newest-first.
    HistoricalEodLight,
}

impl EndpointKind {
    fn path(self) -> &'static str {
        match self {
            EndpointKind::Quote => "quote",
            EndpointKind::HistoricalEodLight => "historical-price-eod/light",
        }
    }
}

/// A fully determined provider query, ready to be rendered as a request URL.
///
/// Symbols pass through verbatim; the provider defines the accepted ticker
/// grammar and this crate does not second-guess it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderQuery {
    pub endpoint: EndpointKind,
    pub symbol: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ProviderQuery {
    /// Maps a retrieval request onto the endpoint and calendar window that
    /// serve it. The mapping is total: every request variant produces
    /// exactly one query.
    ///
    /// Near-date requests widen to `[time - 5 days, time + 1 day]`, both
    /// ends as calendar dates with the time of day discarded. The endpoint
    /// answers newest-first, so the first row of a widened window is the
    /// most recent trading day in it, favoring the closest day at or before
    /// `time` (the one-day lookahead tolerates timezone skew around
    /// midnight). A window end that would leave the representable time
    /// range falls back to the instant's own date.
    pub fn for_request(request: &QuoteRequest) -> Self {
        match request {
            QuoteRequest::Latest { symbol } => Self {
                endpoint: EndpointKind::Quote,
                symbol: symbol.clone(),
                from: None,
                to: None,
            },
            QuoteRequest::NearDate { symbol, time } => Self {
                endpoint: EndpointKind::HistoricalEodLight,
                symbol: symbol.clone(),
                from: Some(
                    time.checked_sub_signed(Duration::days(NEAR_LOOKBACK_DAYS))
                        .unwrap_or(*time)
                        .date_naive(),
                ),
                to: Some(
                    time.checked_add_signed(Duration::days(NEAR_LOOKAHEAD_DAYS))
                        .unwrap_or(*time)
                        .date_naive(),
                ),
            },
            QuoteRequest::Series { symbol, begin, end } => Self {
                endpoint: EndpointKind::HistoricalEodLight,
                symbol: symbol.clone(),
                from: Some(begin.date_naive()),
                to: Some(end.date_naive()),
            },
        }
    }

    /// The time scope this query covers, for diagnostics.
    pub fn scope(&self) -> QueryScope {
        match (self.from, self.to) {
            (Some(from), Some(to)) => QueryScope::Window { from, to },
            _ => QueryScope::Latest,
        }
    }

    /// Renders the complete request URL against `config`'s API root.
    ///
    /// This is the only place the API key is exposed; the rendered URL must
    /// therefore never be logged.
    pub fn url(&self, config: &FmpConfig) -> String {
        let mut url = format!(
            "{}{}?symbol={}",
            config.base_url(),
            self.endpoint.path(),
            self.symbol
        );
        if let (Some(from), Some(to)) = (self.from, self.to) {
            url.push_str(&format!("&from={from}&to={to}"));
        }
        url.push_str(&format!("&apikey={}", config.api_key().expose_secret()));
        url
    }
}
