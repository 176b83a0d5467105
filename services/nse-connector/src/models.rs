//! Quote payload extraction for the NSE derivatives API
//!
//! The feed is messy: strikes arrive as whitespace-padded strings, numeric
//! fields occasionally go missing, and a handful of rows per response are
//! simply malformed. Extraction is deliberately lenient (LenientFieldParsing):
//! every field falls back to its zero value, and a bad row never fails the
//! batch it arrived in.

use serde_json::Value;
use services_common::DerivativeRecord;

/// Build one record from one element of the response `data` array
///
/// Missing or mistyped fields degrade to their defaults instead of erroring.
pub fn record_from_value(item: &Value) -> DerivativeRecord {
    DerivativeRecord {
        instrument_type: str_field(item, "instrumentType"),
        option_type: str_field(item, "optionType"),
        strike_price: strike_field(item),
        expiry_date: str_field(item, "expiryDate"),
        last_price: item["lastPrice"].as_f64().unwrap_or(0.0),
        volume: item["totalTradedVolume"].as_u64().unwrap_or(0),
        open_interest: item["openInterest"].as_u64().unwrap_or(0),
        underlying_value: item["underlyingValue"].as_f64().unwrap_or(0.0),
    }
}

/// Extract every record from a full API response
pub fn records_from_response(body: &Value) -> Vec<DerivativeRecord> {
    body["data"]
        .as_array()
        .map(|items| items.iter().map(record_from_value).collect())
        .unwrap_or_default()
}

/// Spot price of the underlying: `underlyingValue` is repeated on every
/// row, so the first record carries it; 0.0 signals "unavailable"
pub fn underlying_value(records: &[DerivativeRecord]) -> f64 {
    records.first().map_or(0.0, |r| r.underlying_value)
}

fn str_field(item: &Value, key: &str) -> String {
    item[key].as_str().unwrap_or_default().to_string()
}

/// The feed usually sends strikes as padded strings but has been seen
/// emitting plain numbers; accept both
fn strike_field(item: &Value) -> String {
    match &item["strikePrice"] {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
