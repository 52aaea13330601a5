//! Price source backed by the Financial Modeling Prep (FMP) REST API.
//!
//! Currency pairs use six-letter tickers such as `"EURUSD"`; equities use
//! their exchange tickers. API reference:
//! <https://site.financialmodelingprep.com/developer/docs/stable>
//!
//! Timestamps are UTC throughout. End-of-day records carry only a trading
//! day, which this source pins to midnight UTC of that day.

pub mod config;
mod normalize;
mod query;
mod response;
mod source;

pub use config::FmpConfig;
pub use source::FmpSource;
