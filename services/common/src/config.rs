//! Screener preferences with JSON persistence

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{DEFAULT_ATM_LOWER, DEFAULT_ATM_UPPER, DEFAULT_MARGIN};
use crate::errors::ScreenerError;

/// Persisted screener preferences
///
/// Every field carries a serde default so a hand-edited or partial file
/// still loads; an unreadable or corrupt file falls back to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Stocks to scan on each pass
    #[serde(default = "default_stock_list")]
    pub stock_list: Vec<String>,

    /// Expiry months to consider (3-letter tokens, e.g. "Dec")
    #[serde(default = "default_months")]
    pub chosen_months: Vec<String>,

    /// Sort order for the opportunity tables ("ROI" or "Normal")
    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    /// Lower bound of the ATM band as a fraction of spot
    #[serde(default = "default_atm_lower")]
    pub atm_range_lower: f64,

    /// Upper bound of the ATM band as a fraction of spot
    #[serde(default = "default_atm_upper")]
    pub atm_range_upper: f64,

    /// Margin fraction required to sell one leg
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Re-run the scan on a fixed interval
    #[serde(default)]
    pub auto_refresh: bool,
}

fn default_stock_list() -> Vec<String> {
    ["PNB", "BHEL", "NTPC", "BEL", "IOC", "TATASTEEL"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_months() -> Vec<String> {
    vec!["Dec".to_string()]
}

fn default_sort_by() -> String {
    "ROI".to_string()
}

fn default_atm_lower() -> f64 {
    DEFAULT_ATM_LOWER
}

fn default_atm_upper() -> f64 {
    DEFAULT_ATM_UPPER
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            stock_list: default_stock_list(),
            chosen_months: default_months(),
            sort_by: default_sort_by(),
            atm_range_lower: DEFAULT_ATM_LOWER,
            atm_range_upper: DEFAULT_ATM_UPPER,
            margin: DEFAULT_MARGIN,
            auto_refresh: false,
        }
    }
}

impl Preferences {
    /// Load preferences from a JSON file, falling back to defaults when
    /// the file is missing or unparsable
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!("Ignoring corrupt preference file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist preferences as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), ScreenerError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| ScreenerError::Config(format!("create {}: {e}", dir.display())))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ScreenerError::Config(format!("serialize preferences: {e}")))?;
        fs::write(path, json)
            .map_err(|e| ScreenerError::Config(format!("write {}: {e}", path.display())))
    }
}
