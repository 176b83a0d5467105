//! Opportunity ranking and terminal rendering

use clap::ValueEnum;
use colored::Colorize;

use crate::strategy::{CoveredCallOpportunity, StraddleOpportunity};

/// Sort order for opportunity tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    /// Most profitable first
    Roi,
    /// Symbol then strike, ascending
    Normal,
}

impl SortBy {
    /// Map the persisted preference string onto a sort order
    pub fn from_preference(value: &str) -> Self {
        match value {
            "Normal" => Self::Normal,
            _ => Self::Roi,
        }
    }
}

/// Aggregate view of one opportunity table
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSummary {
    /// Number of opportunities found
    pub count: usize,
    /// Mean max ROI %
    pub avg_roi: f64,
    /// Best max ROI %
    pub max_roi: f64,
    /// Mean investment in rupees
    pub avg_investment: f64,
}

fn summarize(rois: &[f64], investments: &[i64]) -> Option<ScanSummary> {
    if rois.is_empty() {
        return None;
    }
    let count = rois.len();
    Some(ScanSummary {
        count,
        avg_roi: rois.iter().sum::<f64>() / count as f64,
        max_roi: rois.iter().copied().fold(f64::MIN, f64::max),
        avg_investment: investments.iter().sum::<i64>() as f64 / count as f64,
    })
}

/// Summarize a straddle table; `None` when it is empty
pub fn summarize_straddles(opportunities: &[StraddleOpportunity]) -> Option<ScanSummary> {
    let rois: Vec<f64> = opportunities.iter().map(|o| o.max_roi_pct).collect();
    let investments: Vec<i64> = opportunities.iter().map(|o| o.investment).collect();
    summarize(&rois, &investments)
}

/// Summarize a covered-call table; `None` when it is empty
pub fn summarize_covered_calls(opportunities: &[CoveredCallOpportunity]) -> Option<ScanSummary> {
    let rois: Vec<f64> = opportunities.iter().map(|o| o.max_roi_pct).collect();
    let investments: Vec<i64> = opportunities.iter().map(|o| o.investment).collect();
    summarize(&rois, &investments)
}

/// Order straddle opportunities in place
pub fn sort_straddles(opportunities: &mut [StraddleOpportunity], sort_by: SortBy) {
    match sort_by {
        SortBy::Roi => {
            opportunities.sort_by(|a, b| b.max_roi_pct.total_cmp(&a.max_roi_pct));
        }
        SortBy::Normal => {
            opportunities
                .sort_by(|a, b| (&a.symbol, a.strike).partial_cmp(&(&b.symbol, b.strike)).unwrap_or(std::cmp::Ordering::Equal));
        }
    }
}

/// Order covered-call opportunities in place
pub fn sort_covered_calls(opportunities: &mut [CoveredCallOpportunity], sort_by: SortBy) {
    match sort_by {
        SortBy::Roi => {
            opportunities.sort_by(|a, b| b.max_roi_pct.total_cmp(&a.max_roi_pct));
        }
        SortBy::Normal => {
            opportunities
                .sort_by(|a, b| (&a.symbol, a.strike).partial_cmp(&(&b.symbol, b.strike)).unwrap_or(std::cmp::Ordering::Equal));
        }
    }
}

/// Render the straddle table for the terminal
pub fn render_straddles(opportunities: &[StraddleOpportunity]) -> String {
    let mut out = String::new();
    // Pad before styling: ANSI escapes would count toward cell widths
    let header = format!(
        "{:<11} {:>9} {:>9} {:>8} {:>7} {:>7} {:>7} {:>11} {:>10} {:>8} {:>10} {:>10} {:>9} {:>9}",
        "Symbol",
        "Current",
        "Strike",
        "Expiry",
        "CALL",
        "PUT",
        "C+P",
        "Invest",
        "Profit",
        "ROI%",
        "ShortSafe",
        "LongSafe",
        "CALL Vol",
        "PUT Vol",
    );
    out.push_str(&header.bold().to_string());
    out.push('\n');

    for o in opportunities {
        out.push_str(&format!(
            "{:<11} {:>9.2} {:>9.2} {:>8} {:>7.2} {:>7.2} {:>7.2} {:>11} {:>10} {:>8.2} {:>10.2} {:>10.2} {:>9} {:>9}\n",
            o.symbol,
            o.current_price,
            o.strike,
            o.expiry,
            o.call_premium,
            o.put_premium,
            o.combined_premium,
            o.investment,
            o.max_profit,
            o.max_roi_pct,
            o.short_safety,
            o.long_safety,
            o.call_volume,
            o.put_volume,
        ));
    }

    out
}

/// Render the covered-call table for the terminal
pub fn render_covered_calls(opportunities: &[CoveredCallOpportunity]) -> String {
    let mut out = String::new();
    let header = format!(
        "{:<11} {:>9} {:>9} {:>8} {:>7} {:>11} {:>10} {:>8} {:>10} {:>8} {:>9}",
        "Symbol",
        "Current",
        "Strike",
        "Expiry",
        "CALL",
        "Invest",
        "Profit",
        "ROI%",
        "SafetyPt",
        "Safety%",
        "CALL Vol",
    );
    out.push_str(&header.bold().to_string());
    out.push('\n');

    for o in opportunities {
        out.push_str(&format!(
            "{:<11} {:>9.2} {:>9.2} {:>8} {:>7.2} {:>11} {:>10} {:>8.2} {:>10.2} {:>8.2} {:>9}\n",
            o.symbol,
            o.current_price,
            o.strike,
            o.expiry,
            o.call_premium,
            o.investment,
            o.max_profit,
            o.max_roi_pct,
            o.safety_point,
            o.safety_pct,
            o.call_volume,
        ));
    }

    out
}

/// One-line summary under a table
pub fn render_summary(summary: &ScanSummary) -> String {
    format!(
        "{} opportunities | avg ROI {:.2}% | max ROI {:.2}% | avg investment {:.0}",
        summary.count, summary.avg_roi, summary.max_roi, summary.avg_investment
    )
}
