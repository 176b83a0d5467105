//! Canonical derivative quote types shared across services

use serde::{Deserialize, Serialize};

/// Option type for derivatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option - right to buy the underlying at strike price
    Call,
    /// Put option - right to sell the underlying at strike price
    Put,
}

impl OptionType {
    /// Parse the NSE feed tag ("CE" for calls, "PE" for puts)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "CE" => Some(Self::Call),
            "PE" => Some(Self::Put),
            _ => None,
        }
    }

    /// Feed tag for this option type
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }
}

/// One raw derivative row as returned by the NSE quote API
///
/// Fields mirror the `getSymbolDerivativesData` payload. Every field
/// defaults to its zero value when missing or malformed in the feed
/// (LenientFieldParsing) - a bad row degrades, it never aborts a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DerivativeRecord {
    /// Instrument classification tag ("OPTSTK" marks stock options)
    pub instrument_type: String,
    /// Option type tag ("CE" or "PE"), empty for futures
    pub option_type: String,
    /// Strike price as the feed sends it: a string, often padded
    /// with whitespace (e.g. "     120.00")
    pub strike_price: String,
    /// Expiry date in `DD-Mon-YYYY` form (e.g. "30-Dec-2025")
    pub expiry_date: String,
    /// Last traded premium
    pub last_price: f64,
    /// Total traded volume for the contract
    pub volume: u64,
    /// Open interest for the contract
    pub open_interest: u64,
    /// Spot price of the underlying stock
    pub underlying_value: f64,
}

/// Normalized option quote for one contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Underlying stock symbol (e.g. "PNB")
    pub symbol: String,
    /// Full expiry date (e.g. "30-Dec-2025")
    pub expiry_date: String,
    /// Three-letter expiry month extracted from the date (e.g. "Dec")
    pub expiry_month: String,
    /// Call or Put
    pub option_type: OptionType,
    /// Strike price, always >= 0
    pub strike: f64,
    /// Last traded premium
    pub last_price: f64,
    /// Total traded volume
    pub volume: u64,
    /// Open interest
    pub open_interest: u64,
    /// Spot price of the underlying
    pub underlying_value: f64,
}

impl OptionEntry {
    /// Short expiry form used in reports: the day and month tokens
    /// of the full date ("30-Dec-2025" -> "30-Dec"). A date without a
    /// delimiter passes through as-is (LenientFieldParsing).
    pub fn expiry_short(&self) -> String {
        let mut parts = self.expiry_date.splitn(3, '-');
        match (parts.next(), parts.next()) {
            (Some(day), Some(month)) => format!("{day}-{month}"),
            _ => self.expiry_date.clone(),
        }
    }
}
