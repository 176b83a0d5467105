//! Opportunity sorting, summaries and table rendering

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;

use options_screener::report::{
    SortBy, render_covered_calls, render_straddles, sort_covered_calls, sort_straddles,
    summarize_covered_calls, summarize_straddles,
};
use options_screener::{CoveredCallOpportunity, StraddleOpportunity};

fn straddle(symbol: &str, strike: f64, roi: f64, investment: i64) -> StraddleOpportunity {
    StraddleOpportunity {
        symbol: symbol.to_string(),
        current_price: 120.0,
        strike,
        expiry: "30-Dec".to_string(),
        call_premium: 3.5,
        put_premium: 3.2,
        combined_premium: 6.7,
        investment,
        max_profit: 53_600,
        max_roi_pct: roi,
        short_safety: strike - 6.7,
        long_safety: strike + 6.7,
        call_volume: 2_500,
        put_volume: 2_100,
    }
}

fn covered_call(symbol: &str, strike: f64, roi: f64, investment: i64) -> CoveredCallOpportunity {
    CoveredCallOpportunity {
        symbol: symbol.to_string(),
        current_price: 120.0,
        strike,
        expiry: "30-Dec".to_string(),
        call_premium: 3.0,
        investment,
        max_profit: 61_600,
        max_roi_pct: roi,
        safety_point: 117.36,
        safety_pct: 2.2,
        call_volume: 1_800,
    }
}

#[test]
fn roi_sort_puts_the_best_opportunity_first() {
    let mut rows = vec![
        straddle("PNB", 120.0, 11.17, 480_000),
        straddle("BHEL", 240.0, 14.02, 150_000),
        straddle("NTPC", 360.0, 9.55, 300_000),
    ];

    sort_straddles(&mut rows, SortBy::Roi);

    let rois: Vec<f64> = rows.iter().map(|o| o.max_roi_pct).collect();
    assert_eq!(rois, vec![14.02, 11.17, 9.55]);
}

#[test]
fn normal_sort_orders_by_symbol_then_strike() {
    let mut rows = vec![
        straddle("PNB", 122.5, 11.17, 480_000),
        straddle("BHEL", 240.0, 14.02, 150_000),
        straddle("PNB", 120.0, 9.55, 480_000),
    ];

    sort_straddles(&mut rows, SortBy::Normal);

    let keys: Vec<(&str, f64)> = rows.iter().map(|o| (o.symbol.as_str(), o.strike)).collect();
    assert_eq!(
        keys,
        vec![("BHEL", 240.0), ("PNB", 120.0), ("PNB", 122.5)]
    );
}

#[test]
fn covered_call_roi_sort_is_descending() {
    let mut rows = vec![
        covered_call("PNB", 125.0, 25.67, 240_000),
        covered_call("IOC", 150.0, 31.10, 200_000),
    ];

    sort_covered_calls(&mut rows, SortBy::Roi);

    assert_eq!(rows[0].symbol, "IOC");
    assert_eq!(rows[1].symbol, "PNB");
}

#[test]
fn straddle_summary_averages_roi_and_investment() {
    let rows = vec![
        straddle("PNB", 120.0, 10.0, 400_000),
        straddle("BHEL", 240.0, 14.0, 200_000),
    ];

    let summary = summarize_straddles(&rows).unwrap();

    assert_eq!(summary.count, 2);
    assert_relative_eq!(summary.avg_roi, 12.0);
    assert_relative_eq!(summary.max_roi, 14.0);
    assert_relative_eq!(summary.avg_investment, 300_000.0);
}

#[test]
fn empty_tables_have_no_summary() {
    assert!(summarize_straddles(&[]).is_none());
    assert!(summarize_covered_calls(&[]).is_none());
}

#[test]
fn rendered_straddle_table_carries_the_key_figures() {
    let rows = vec![straddle("PNB", 120.0, 11.17, 480_000)];

    let table = render_straddles(&rows);

    assert!(table.contains("PNB"));
    assert!(table.contains("30-Dec"));
    assert!(table.contains("480000"));
    assert!(table.contains("11.17"));
}

#[test]
fn bold_headers_stay_aligned_with_data_rows() {
    // ANSI styling must wrap the padded header, not its individual cells
    colored::control::set_override(true);
    let straddle_table = render_straddles(&[straddle("PNB", 120.0, 11.17, 480_000)]);
    let covered_table = render_covered_calls(&[covered_call("PNB", 125.0, 25.67, 240_000)]);
    colored::control::unset_override();

    for table in [straddle_table, covered_table] {
        let mut lines = table.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();

        let visible = header.replace("\u{1b}[1m", "").replace("\u{1b}[0m", "");
        assert_eq!(visible.len(), row.len());
        // Left column keeps its padding under the styling
        assert!(visible.starts_with("Symbol      "));
    }
}

#[test]
fn rendered_covered_call_table_carries_the_key_figures() {
    let rows = vec![covered_call("PNB", 125.0, 25.67, 240_000)];

    let table = render_covered_calls(&rows);

    assert!(table.contains("PNB"));
    assert!(table.contains("240000"));
    assert!(table.contains("25.67"));
    assert!(table.contains("117.36"));
}
