use serde::Deserialize;
use serde_json::Value;

/// One element of a `quote` endpoint response.
///
/// Only the fields this crate consumes are modeled; the provider sends many
/// more, which serde discards. The consumed fields stay loosely typed so the
/// normalizer can report exactly which value was unusable instead of failing
/// the whole body.
#[derive(Deserialize, Debug)]
pub struct QuoteRecord {
    pub timestamp: Option<Value>,
    pub price: Option<Value>,
}

/// One element of a `historical-price-eod/light` response.
#[derive(Deserialize, Debug)]
pub struct EodRecord {
    pub date: Option<Value>,
    pub price: Option<Value>,
}

/// Decodes a latest-quote body into its record sequence.
///
/// Both provider endpoints answer with a JSON array of objects; any other
/// shape is a decode error for the caller to escalate.
pub fn decode_quotes(body: &str) -> Result<Vec<QuoteRecord>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Decodes an end-of-day history body into its record sequence.
pub fn decode_eod_records(body: &str) -> Result<Vec<EodRecord>, serde_json::Error> {
    serde_json::from_str(body)
}
