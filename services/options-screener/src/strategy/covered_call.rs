//! Covered call evaluation
//!
//! Sell a call against margin-financed stock. Only calls at or above the
//! money qualify (a small 0.1% tolerance below spot keeps the true ATM
//! strike in play). Profit assumes the stock is called away at strike:
//! upside to strike, plus the premium, minus a 1% holding cost on the
//! margined capital. The safety point folds a 0.3% entry-friction charge
//! into the breakeven.

use serde::Serialize;
use services_common::{OptionEntry, OptionType, ScreenerError};

use crate::strategy::{round2, validate_position_inputs};

/// Fraction of spot a strike may sit below and still count as ATM
const ATM_TOLERANCE: f64 = 0.999;
/// Holding cost charged on the margined investment
const HOLDING_COST_RATE: f64 = 0.01;
/// Buy-side transaction friction folded into the breakeven
const ENTRY_FRICTION_RATE: f64 = 0.003;

/// One qualifying covered-call opportunity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoveredCallOpportunity {
    /// Underlying stock symbol
    pub symbol: String,
    /// Spot price at evaluation time
    pub current_price: f64,
    /// Strike of the sold call
    pub strike: f64,
    /// Short expiry form ("30-Dec")
    pub expiry: String,
    /// Premium collected per share
    pub call_premium: f64,
    /// Margin-financed stock cost, truncated to whole rupees
    pub investment: i64,
    /// Profit if called away at strike, net of holding cost, truncated
    pub max_profit: i64,
    /// Max profit as a percentage of investment
    pub max_roi_pct: f64,
    /// Breakeven spot price after entry friction
    pub safety_point: f64,
    /// Premium cushion over friction, as a percentage of spot
    pub safety_pct: f64,
    /// Call traded volume
    pub call_volume: u64,
}

/// Evaluate covered-call opportunities over one quote snapshot
///
/// Walks call entries month by month in source order; a call qualifies
/// when its strike lies inside `[0.999 * price, atm_upper * price]` and
/// its premium is non-zero.
pub fn evaluate_covered_call(
    symbol: &str,
    current_price: f64,
    lot_size: u32,
    options: &[OptionEntry],
    months: &[String],
    atm_upper: f64,
    margin: f64,
) -> Result<Vec<CoveredCallOpportunity>, ScreenerError> {
    validate_position_inputs(symbol, current_price, lot_size)?;

    let lot = f64::from(lot_size);
    let mut opportunities = Vec::new();

    for month in months {
        for entry in options {
            if entry.expiry_month != *month || entry.option_type != OptionType::Call {
                continue;
            }

            let strike = entry.strike;
            if strike < ATM_TOLERANCE * current_price || strike > atm_upper * current_price {
                continue;
            }

            let premium = entry.last_price;
            if premium == 0.0 {
                continue;
            }

            let investment = margin * lot * current_price;
            let interest = round2(HOLDING_COST_RATE * investment);
            // Stock rises to strike, premium is kept, holding cost is paid
            let gross_profit = (strike - current_price + premium) * lot - interest;
            let investment_rupees = investment as i64;

            opportunities.push(CoveredCallOpportunity {
                symbol: symbol.to_string(),
                current_price,
                strike,
                expiry: entry.expiry_short(),
                call_premium: premium,
                investment: investment_rupees,
                max_profit: gross_profit as i64,
                max_roi_pct: round2(100.0 * gross_profit / investment_rupees as f64),
                safety_point: round2((1.0 + ENTRY_FRICTION_RATE) * current_price - premium),
                safety_pct: round2(
                    (premium - ENTRY_FRICTION_RATE * current_price) / current_price * 100.0,
                ),
                call_volume: entry.volume,
            });
        }
    }

    Ok(opportunities)
}
