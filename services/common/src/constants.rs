//! Shared constants for the screener services

/// Three-letter expiry month tokens as the NSE feed spells them
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fixed-point scale for strike bucketing (2 decimal places, paise)
pub const STRIKE_SCALE: f64 = 100.0;

/// Lower bound of the at-the-money band as a fraction of spot
pub const DEFAULT_ATM_LOWER: f64 = 0.98;

/// Upper bound of the at-the-money band as a fraction of spot
pub const DEFAULT_ATM_UPPER: f64 = 1.05;

/// Margin fraction required to sell an option leg (0.25 = 25%)
pub const DEFAULT_MARGIN: f64 = 0.25;

/// Lot-size cache files older than this are discarded
pub const LOT_CACHE_MAX_AGE_DAYS: i64 = 7;
