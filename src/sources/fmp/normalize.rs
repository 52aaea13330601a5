//! Conversion of raw provider records into [`PricePoint`]s.
//!
//! What this module provides:
//! - [`quote_point`]: Convert a `quote` record (epoch seconds + price) into
//!   the canonical value object.
//! - [`eod_point`]: Convert a `historical-price-eod/light` record
//!   (`YYYY-MM-DD` trading day + price) into the canonical value object.
//!
//! Notes:
//! - Prices arrive as JSON strings or numbers. The decimal is always built
//!   from the value's text form (numbers are rendered to text first), so the
//!   provider's stated precision survives exactly. Plain and scientific
//!   notation are accepted; anything else is a parse error naming the value.
//! - End-of-day records carry only a trading day; it is pinned to midnight
//!   UTC of that day.
//! - Every error carries the symbol and the queried scope, so a failure can
//!   be traced without replaying the request.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::price_point::PricePoint;
use crate::sources::{ParseSnafu, QueryScope, SourceError};

use super::response::{EodRecord, QuoteRecord};

/// `quote` record -> canonical price point.
pub fn quote_point(
    symbol: &str,
    scope: QueryScope,
    record: &QuoteRecord,
) -> Result<PricePoint, SourceError> {
    let timestamp = epoch_instant(symbol, scope, record.timestamp.as_ref())?;
    let price = decimal_price(symbol, scope, record.price.as_ref())?;
    Ok(PricePoint {
        price,
        timestamp,
        quote_currency: None,
    })
}

/// End-of-day record -> canonical price point, pinned to midnight UTC.
pub fn eod_point(
    symbol: &str,
    scope: QueryScope,
    record: &EodRecord,
) -> Result<PricePoint, SourceError> {
    let timestamp = trading_day_instant(symbol, scope, record.date.as_ref())?;
    let price = decimal_price(symbol, scope, record.price.as_ref())?;
    Ok(PricePoint {
        price,
        timestamp,
        quote_currency: None,
    })
}

/// Integral epoch seconds -> UTC instant.
fn epoch_instant(
    symbol: &str,
    scope: QueryScope,
    value: Option<&Value>,
) -> Result<DateTime<Utc>, SourceError> {
    let value = value.ok_or_else(|| missing_field(symbol, scope, "timestamp"))?;
    let seconds = value.as_i64().ok_or_else(|| {
        ParseSnafu {
            symbol,
            scope,
            detail: format!("invalid timestamp {value}"),
        }
        .build()
    })?;
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        ParseSnafu {
            symbol,
            scope,
            detail: format!("timestamp {seconds} out of range"),
        }
        .build()
    })
}

/// `"YYYY-MM-DD"` trading day -> midnight UTC of that day.
fn trading_day_instant(
    symbol: &str,
    scope: QueryScope,
    value: Option<&Value>,
) -> Result<DateTime<Utc>, SourceError> {
    let value = value.ok_or_else(|| missing_field(symbol, scope, "date"))?;
    let date = value
        .as_str()
        .and_then(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
        .ok_or_else(|| {
            ParseSnafu {
                symbol,
                scope,
                detail: format!("invalid trading-day date {value}"),
            }
            .build()
        })?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// String-or-number price -> exact decimal via the value's text form.
fn decimal_price(
    symbol: &str,
    scope: QueryScope,
    value: Option<&Value>,
) -> Result<Decimal, SourceError> {
    let value = value.ok_or_else(|| missing_field(symbol, scope, "price"))?;
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => {
            return ParseSnafu {
                symbol,
                scope,
                detail: format!("invalid price {value}"),
            }
            .fail();
        }
    };
    parse_decimal(&text).ok_or_else(|| {
        ParseSnafu {
            symbol,
            scope,
            detail: format!("invalid price {value}"),
        }
        .build()
    })
}

/// Plain decimal notation first, scientific (`1e2`) as the fallback.
fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn missing_field(symbol: &str, scope: QueryScope, field: &str) -> SourceError {
    ParseSnafu {
        symbol,
        scope,
        detail: format!("missing {field} field"),
    }
    .build()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn quote_record(timestamp: Value, price: Value) -> QuoteRecord {
        QuoteRecord {
            timestamp: Some(timestamp),
            price: Some(price),
        }
    }

    fn eod_record(date: Value, price: Value) -> EodRecord {
        EodRecord {
            date: Some(date),
            price: Some(price),
        }
    }

    fn dec(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    #[test]
    fn quote_record_with_epoch_and_number_price() {
        let record = quote_record(json!(1718064000), json!(1.0754));
        let point = quote_point("EURUSD", QueryScope::Latest, &record).unwrap();

        assert_eq!(point.price, dec("1.0754"));
        assert_eq!(point.timestamp.timestamp(), 1718064000);
        assert_eq!(point.quote_currency, None);
    }

    #[test]
    fn eod_record_pins_midnight_utc() {
        let record = eod_record(json!("2024-06-10"), json!("1.0750"));
        let point = eod_point("EURUSD", QueryScope::Latest, &record).unwrap();

        assert_eq!(point.price, dec("1.0750"));
        assert_eq!(
            point.timestamp,
            Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn string_prices_keep_exact_precision() {
        let record = eod_record(json!("2024-06-10"), json!("123.4567"));
        let point = eod_point("X", QueryScope::Latest, &record).unwrap();
        assert_eq!(point.price, dec("123.4567"));
    }

    #[test]
    fn string_prices_tolerate_surrounding_whitespace() {
        let record = eod_record(json!("2024-06-10"), json!(" 1.0750 "));
        let point = eod_point("X", QueryScope::Latest, &record).unwrap();
        assert_eq!(point.price, dec("1.0750"));
    }

    #[test]
    fn scientific_notation_is_accepted() {
        let record = eod_record(json!("2024-06-10"), json!("1e2"));
        let point = eod_point("X", QueryScope::Latest, &record).unwrap();
        assert_eq!(point.price, dec("100"));
    }

    #[test]
    fn unusable_prices_are_parse_errors_naming_the_value() {
        for bad in [json!("N/A"), json!(""), json!(true), json!({})] {
            let record = eod_record(json!("2024-06-10"), bad.clone());
            let err = eod_point("EURUSD", QueryScope::Latest, &record).unwrap_err();
            let message = err.to_string();
            assert!(message.contains("EURUSD"), "missing symbol: {message}");
            assert!(message.contains("price"), "missing field name: {message}");
        }
    }

    #[test]
    fn missing_price_is_a_parse_error() {
        let record = EodRecord {
            date: Some(json!("2024-06-10")),
            price: None,
        };
        let err = eod_point("EURUSD", QueryScope::Latest, &record).unwrap_err();
        assert!(err.to_string().contains("missing price field"));
    }

    #[test]
    fn fractional_epoch_values_are_rejected() {
        let record = quote_record(json!(1718064000.5), json!(1.0754));
        let err = quote_point("EURUSD", QueryScope::Latest, &record).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn textual_epoch_values_are_rejected() {
        let record = quote_record(json!("1718064000"), json!(1.0754));
        let err = quote_point("EURUSD", QueryScope::Latest, &record).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for bad in [json!("June 10, 2024"), json!("2024/06/10"), json!(20240610)] {
            let record = eod_record(bad, json!("1.0750"));
            let err = eod_point("EURUSD", QueryScope::Latest, &record).unwrap_err();
            assert!(err.to_string().contains("invalid trading-day date"));
        }
    }

    #[test]
    fn negative_epochs_map_before_1970() {
        let record = quote_record(json!(-86400), json!("1.0"));
        let point = quote_point("X", QueryScope::Latest, &record).unwrap();
        assert_eq!(
            point.timestamp,
            Utc.with_ymd_and_hms(1969, 12, 31, 0, 0, 0).unwrap()
        );
    }

    proptest! {
        #[test]
        fn epoch_seconds_round_trip(seconds in -4_102_444_800i64..=4_102_444_800i64) {
            let record = quote_record(json!(seconds), json!("1.0"));
            let point = quote_point("X", QueryScope::Latest, &record).unwrap();
            prop_assert_eq!(point.timestamp.timestamp(), seconds);
        }

        #[test]
        fn decimal_text_round_trip(mantissa in -1_000_000_000i64..=1_000_000_000i64, scale in 0u32..=9) {
            // whatever decimal text the provider states comes back out unchanged
            let stated = Decimal::new(mantissa, scale);
            let record = eod_record(json!("2024-06-10"), json!(stated.to_string()));
            let point = eod_point("X", QueryScope::Latest, &record).unwrap();
            prop_assert_eq!(point.price, stated);
            prop_assert_eq!(point.price.to_string(), stated.to_string());
        }
    }
}
