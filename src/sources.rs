//! Source abstraction for price quotation providers.
//!
//! This module defines the [`PriceSource`] trait, which serves as a unified
//! interface for fetching price quotes from any quotation vendor (e.g.
//! Financial Modeling Prep).
//!
//! Each concrete source implementation (such as [`fmp::FmpSource`]) should
//! implement [`PriceSource`] to handle vendor-specific query construction,
//! response decoding and normalization.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn PriceSource`) so hosts can register sources interchangeably at
//! runtime.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use chrono::{DateTime, Utc};
//! use price_source::models::price_point::PricePoint;
//! use price_source::sources::{PriceSource, SourceError};
//!
//! struct MySource;
//!
//! #[async_trait]
//! impl PriceSource for MySource {
//!     async fn get_latest_price(
//!         &self,
//!         _symbol: &str,
//!     ) -> Result<Option<PricePoint>, SourceError> {
//!         Ok(None)
//!     }
//!
//!     async fn get_historical_price(
//!         &self,
//!         _symbol: &str,
//!         _time: DateTime<Utc>,
//!     ) -> Result<Option<PricePoint>, SourceError> {
//!         Ok(None)
//!     }
//!
//!     async fn get_price_series(
//!         &self,
//!         _symbol: &str,
//!         _time_begin: DateTime<Utc>,
//!         _time_end: DateTime<Utc>,
//!     ) -> Result<Vec<PricePoint>, SourceError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod fmp;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use snafu::{Backtrace, Snafu};

use crate::models::price_point::PricePoint;

/// Trait for fetching normalized price quotes from a quotation provider.
///
/// Implement this trait for each concrete vendor. All three operations
/// perform exactly one provider round trip, hold no state between calls and
/// never retry. "No data" is an expected outcome for any symbol and any date
/// range, so the single-quote operations return `Option` and the series
/// operation may return an empty vector.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches the most recent available quote for `symbol`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(point))` - The latest quote the provider holds.
    /// * `Ok(None)` - The provider had no data or could not be reached.
    /// * `Err(SourceError)` - The provider answered, but unusably.
    async fn get_latest_price(&self, symbol: &str) -> Result<Option<PricePoint>, SourceError>;

    /// Fetches the quote closest to `time`, preferring the nearest trading
    /// day at or before it.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(point))` - The closest quote within the provider's window.
    /// * `Ok(None)` - No data near `time`, or the provider was unreachable.
    /// * `Err(SourceError)` - The provider answered, but unusably.
    async fn get_historical_price(
        &self,
        symbol: &str,
        time: DateTime<Utc>,
    ) -> Result<Option<PricePoint>, SourceError>;

    /// Fetches every quote between `time_begin` and `time_end`, inclusive,
    /// sorted ascending by timestamp.
    ///
    /// An empty vector is a valid answer: the range may contain no trading
    /// days, or the provider may have been unreachable.
    async fn get_price_series(
        &self,
        symbol: &str,
        time_begin: DateTime<Utc>,
        time_end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>, SourceError>;
}

/// The time scope one retrieval covered, echoed in diagnostics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryScope {
    /// The most recent available quote.
    Latest,
    /// Quotes between two calendar dates, inclusive.
    Window {
        /// First day of the window.
        from: NaiveDate,
        /// Last day of the window.
        to: NaiveDate,
    },
}

impl fmt::Display for QueryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryScope::Latest => write!(f, "latest"),
            QueryScope::Window { from, to } => write!(f, "between {from} and {to}"),
        }
    }
}

/// Errors that can occur during the creation of a source instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SourceInitError {
    /// The credential environment variable is not set.
    #[snafu(display("Missing environment variable: {name}"))]
    MissingEnvVar { name: String, backtrace: Backtrace },

    /// Failed to build the HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors a [`PriceSource`] operation can surface.
///
/// Transport failures are deliberately absent: an unreachable provider or a
/// non-success status is reported as "no data", not as an error. The only
/// hard failure is a provider that answered successfully with a body this
/// crate cannot make sense of.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SourceError {
    /// The provider's response body, or a record within it, was unusable.
    #[snafu(display("Malformed quote response for {symbol} ({scope}): {detail}"))]
    Parse {
        symbol: String,
        scope: QueryScope,
        detail: String,
        backtrace: Backtrace,
    },
}
