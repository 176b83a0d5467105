//! Common error types for the screener services

use thiserror::Error;

/// Screener error taxonomy
///
/// Per-record malformation is never an error (bad fields degrade to zero
/// under LenientFieldParsing); these variants cover the failures that are
/// surfaced to callers.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Evaluator received an input that would poison its arithmetic
    /// (zero/negative spot price, zero lot size)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Data source failed for one symbol; the caller skips the symbol
    /// and continues with the rest of the batch
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Symbol absent from the lot-size table (not available for F&O
    /// trading, or missing from the NSE lot-size CSV)
    #[error("Lot size not found for symbol '{0}'")]
    LotSizeNotFound(String),

    /// Lot-size cache could not be read, written or refreshed
    #[error("Lot-size cache error: {0}")]
    Cache(String),

    /// Preference file could not be read or written
    #[error("Config error: {0}")]
    Config(String),
}
