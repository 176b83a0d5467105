//! Option-chain aggregation and options-selling strategy metrics
//!
//! Takes the raw derivative rows the NSE connector fetches, normalizes
//! them into typed option entries grouped by expiry month and strike, and
//! derives investment / profit / ROI / safety figures for two
//! premium-selling strategies:
//!
//! - **Short straddle** - sell a call and a put at the same strike;
//!   profitable while the spot stays inside the collected-premium band.
//! - **Covered call** - sell a call against margin-financed stock;
//!   profitable while the spot stays above the premium-cushioned entry.
//!
//! Both evaluators are pure functions over one fetch snapshot: no I/O, no
//! shared state, bit-identical output for identical input.

pub mod chain;
pub mod report;
pub mod strategy;

pub use chain::{StrikeGroup, group_by_strike, parse_options};
pub use report::SortBy;
pub use strategy::{
    CoveredCallOpportunity, StraddleOpportunity, evaluate_covered_call, evaluate_short_straddle,
};
