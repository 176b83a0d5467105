//! NSE market data connector
//!
//! Fetches live stock derivative quotes straight from the NSE quote API
//! and maintains a local cache of the F&O lot-size CSV. The quote API sits
//! behind cookie gating, so the client bootstraps a browser-like session
//! against the NSE homepage before issuing data calls.

pub mod client;
pub mod lots;
pub mod models;

pub use client::NseClient;
pub use lots::LotSizeStore;
