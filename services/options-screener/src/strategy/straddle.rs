//! Short straddle evaluation
//!
//! Sell a call and a put at the same strike. The position keeps the full
//! combined premium while the spot expires inside
//! `[strike - combined, strike + combined]`; margin is posted on both
//! naked legs, so the capital base is twice the single-leg margin.

use serde::Serialize;
use services_common::{OptionEntry, ScreenerError};

use crate::chain::group_by_strike;
use crate::strategy::{round2, validate_position_inputs};

/// One qualifying short-straddle opportunity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StraddleOpportunity {
    /// Underlying stock symbol
    pub symbol: String,
    /// Spot price at evaluation time
    pub current_price: f64,
    /// Strike shared by both legs
    pub strike: f64,
    /// Short expiry form ("30-Dec")
    pub expiry: String,
    /// Call leg premium
    pub call_premium: f64,
    /// Put leg premium
    pub put_premium: f64,
    /// Combined premium collected per share
    pub combined_premium: f64,
    /// Margin capital deployed, truncated to whole rupees
    pub investment: i64,
    /// Premium collected on the full lot, truncated to whole rupees
    pub max_profit: i64,
    /// Max profit as a percentage of investment
    pub max_roi_pct: f64,
    /// Lower breakeven: strike minus combined premium
    pub short_safety: f64,
    /// Upper breakeven: strike plus combined premium
    pub long_safety: f64,
    /// Call leg traded volume
    pub call_volume: u64,
    /// Put leg traded volume
    pub put_volume: u64,
}

/// Evaluate short-straddle opportunities over one quote snapshot
///
/// Per month, entries are bucketed by strike; a strike qualifies when it
/// lies inside `[atm_lower * price, atm_upper * price]`, both legs are
/// quoted, and neither premium is zero. Strikes missing a leg or quoting
/// a zero premium are skipped silently - absence of a tradable pair is
/// not an error.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_short_straddle(
    symbol: &str,
    current_price: f64,
    lot_size: u32,
    options: &[OptionEntry],
    months: &[String],
    atm_lower: f64,
    atm_upper: f64,
    margin: f64,
) -> Result<Vec<StraddleOpportunity>, ScreenerError> {
    validate_position_inputs(symbol, current_price, lot_size)?;

    let lot = f64::from(lot_size);
    let mut opportunities = Vec::new();

    for month in months {
        let groups = group_by_strike(
            options.iter().filter(|entry| entry.expiry_month == *month),
        );

        // Deterministic emission order regardless of map iteration
        let mut keys: Vec<i64> = groups.keys().copied().collect();
        keys.sort_unstable();

        for key in keys {
            let group = &groups[&key];
            let strike = group.strike;

            if strike < atm_lower * current_price || strike > atm_upper * current_price {
                continue;
            }

            // Cannot straddle with one leg missing
            let (Some(call), Some(put)) = (&group.call, &group.put) else {
                continue;
            };

            // A zero last price means no liquid quote on that leg
            if call.last_price == 0.0 || put.last_price == 0.0 {
                continue;
            }

            let combined = call.last_price + put.last_price;
            // Margin on both naked legs
            let investment = margin * 2.0 * lot * current_price;
            let max_profit = combined * lot;
            let max_roi = max_profit / investment * 100.0;

            opportunities.push(StraddleOpportunity {
                symbol: symbol.to_string(),
                current_price,
                strike,
                expiry: call.expiry_short(),
                call_premium: call.last_price,
                put_premium: put.last_price,
                combined_premium: round2(combined),
                investment: investment as i64,
                max_profit: max_profit as i64,
                max_roi_pct: round2(max_roi),
                short_safety: round2(strike - combined),
                long_safety: round2(strike + combined),
                call_volume: call.volume,
                put_volume: put.volume,
            });
        }
    }

    Ok(opportunities)
}
