use chrono::{DateTime, Utc};

/// The retrieval modes a [`PriceSource`](crate::sources::PriceSource) supports.
///
/// Each variant carries exactly the fields its provider query needs. Values
/// are built by source implementations and consumed immediately by their
/// query builders; they are never persisted or sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteRequest {
    /// The most recent available quote for `symbol`.
    Latest {
        /// Ticker symbol, passed to the provider verbatim.
        symbol: String,
    },

    /// The quote closest to `time`, biased toward the nearest trading day at
    /// or before it.
    NearDate {
        /// Ticker symbol, passed to the provider verbatim.
        symbol: String,
        /// The instant of interest (UTC).
        time: DateTime<Utc>,
    },

    /// Every quote between `begin` and `end`, inclusive.
    ///
    /// `begin <= end` is the caller's contract and is not re-validated; an
    /// inverted window reaches the provider verbatim and comes back empty.
    Series {
        /// Ticker symbol, passed to the provider verbatim.
        symbol: String,
        /// Start of the range (inclusive, UTC).
        begin: DateTime<Utc>,
        /// End of the range (inclusive, UTC).
        end: DateTime<Utc>,
    },
}
