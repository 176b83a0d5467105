//! Strategy evaluators
//!
//! Each evaluator is a pure function from one quote snapshot plus
//! configuration to a list of opportunity records. Monetary outputs mix
//! two numeric treatments on purpose: display premiums, ROI and safety
//! levels round to 2 decimals, while rupee investment and profit figures
//! truncate toward zero - the original screen always floored those, and
//! changing it would shift every displayed profit.

mod covered_call;
mod straddle;

pub use covered_call::{CoveredCallOpportunity, evaluate_covered_call};
pub use straddle::{StraddleOpportunity, evaluate_short_straddle};

use services_common::ScreenerError;

/// Round to 2 decimal places, half away from zero
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reject inputs that would put a zero denominator or NaN into the
/// metrics; both evaluators fail fast here before touching any entry
pub(crate) fn validate_position_inputs(
    symbol: &str,
    current_price: f64,
    lot_size: u32,
) -> Result<(), ScreenerError> {
    if current_price <= 0.0 || !current_price.is_finite() {
        return Err(ScreenerError::InvalidInput(format!(
            "{symbol}: current price must be positive, got {current_price}"
        )));
    }
    if lot_size == 0 {
        return Err(ScreenerError::InvalidInput(format!(
            "{symbol}: lot size must be positive"
        )));
    }
    Ok(())
}
