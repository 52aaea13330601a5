//! Canonical in-memory representation of a single price quote.
//!
//! This struct is the standard output for all [`PriceSource`](crate::sources::PriceSource)
//! implementations, regardless of vendor or instrument kind (currency pairs,
//! equities, crypto, etc.).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single price observation for one instrument at one point in time.
///
/// This struct is vendor-agnostic. The price is an exact decimal built from
/// the provider's own textual rendering of the value, never an intermediate
/// binary float.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// The quoted price, exactly as stated by the provider.
    pub price: Decimal,

    /// The instant this quote applies to (UTC). End-of-day quotes are pinned
    /// to midnight UTC of their trading day.
    pub timestamp: DateTime<Utc>,

    /// The currency the price is quoted in. Not all providers supply this.
    pub quote_currency: Option<String>,
}
