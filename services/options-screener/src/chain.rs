//! Option chain normalization and strike bucketing

use rustc_hash::FxHashMap;
use services_common::{DerivativeRecord, OptionEntry, OptionType, STRIKE_SCALE};

/// Instrument tag marking stock options in the derivatives feed
const STOCK_OPTION_TAG: &str = "OPTSTK";

/// Call/put pair observed at one strike
///
/// Built fresh per evaluation pass and discarded once metrics are derived.
#[derive(Debug, Clone, Default)]
pub struct StrikeGroup {
    /// Strike price shared by both legs
    pub strike: f64,
    /// Call leg, when the chain quotes one at this strike
    pub call: Option<OptionEntry>,
    /// Put leg, when the chain quotes one at this strike
    pub put: Option<OptionEntry>,
}

/// Normalize raw derivative rows into typed option entries
///
/// Keeps stock options only (futures and index rows are dropped). When
/// `month_filter` is non-empty, rows whose expiry month differs are
/// skipped; the comparison is case-sensitive against the feed's 3-letter
/// spelling. Field handling is lenient: a padded, empty or unparsable
/// strike becomes 0 and no row ever raises.
pub fn parse_options(
    symbol: &str,
    records: &[DerivativeRecord],
    month_filter: Option<&str>,
) -> Vec<OptionEntry> {
    let mut entries = Vec::new();

    for record in records {
        if record.instrument_type != STOCK_OPTION_TAG {
            continue;
        }

        let Some(option_type) = OptionType::from_tag(&record.option_type) else {
            continue;
        };

        let month = expiry_month(&record.expiry_date);
        if let Some(filter) = month_filter {
            if !filter.is_empty() && month != filter {
                continue;
            }
        }

        entries.push(OptionEntry {
            symbol: symbol.to_string(),
            expiry_date: record.expiry_date.clone(),
            expiry_month: month.to_string(),
            option_type,
            strike: lenient_strike(&record.strike_price),
            last_price: record.last_price,
            volume: record.volume,
            open_interest: record.open_interest,
            underlying_value: record.underlying_value,
        });
    }

    entries
}

/// Bucket entries by strike into call/put pairs
///
/// Keys are paise fixed-point strikes so float strikes can index a map.
/// Duplicate (strike, type) pairs overwrite the slot in source order -
/// last write wins.
pub fn group_by_strike<'a, I>(entries: I) -> FxHashMap<i64, StrikeGroup>
where
    I: IntoIterator<Item = &'a OptionEntry>,
{
    let mut groups: FxHashMap<i64, StrikeGroup> = FxHashMap::default();

    for entry in entries {
        let group = groups.entry(strike_key(entry.strike)).or_default();
        group.strike = entry.strike;
        match entry.option_type {
            OptionType::Call => group.call = Some(entry.clone()),
            OptionType::Put => group.put = Some(entry.clone()),
        }
    }

    groups
}

/// Fixed-point map key for a strike price (2 decimal places)
pub fn strike_key(strike: f64) -> i64 {
    (strike * STRIKE_SCALE).round() as i64
}

/// Month token of an expiry date: the text between the first and second
/// `-` ("30-Dec-2025" -> "Dec"), empty when the date has no delimiter
pub fn expiry_month(expiry_date: &str) -> &str {
    expiry_date.split('-').nth(1).unwrap_or("")
}

/// Strike strings arrive whitespace-padded; empty or unparsable values
/// degrade to 0 and negative garbage is clamped (LenientFieldParsing)
fn lenient_strike(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0).max(0.0)
}
