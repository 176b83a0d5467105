//! F&O lot-size table with a dated CSV cache
//!
//! NSE publishes contract lot sizes as a CSV in its archives. The file
//! changes rarely, so it is cached on disk as `fo_mktlots_YYYY-MM-DD.csv`
//! and re-downloaded only when no cache younger than
//! [`LOT_CACHE_MAX_AGE_DAYS`] exists.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use rustc_hash::FxHashMap;
use services_common::{ScreenerError, LOT_CACHE_MAX_AGE_DAYS};
use tracing::{debug, info, warn};

use crate::client::NseClient;

const CACHE_PREFIX: &str = "fo_mktlots_";
const CACHE_SUFFIX: &str = ".csv";
const CACHE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Column 1 of the lot-size CSV is the symbol
const SYMBOL_COLUMN: usize = 1;
/// Columns 2 onward hold per-month lot sizes
const FIRST_MONTH_COLUMN: usize = 2;

/// In-memory lot-size lookup backed by the cached NSE CSV
#[derive(Debug)]
pub struct LotSizeStore {
    sizes: FxHashMap<String, u32>,
}

impl LotSizeStore {
    /// Load lot sizes, preferring a fresh cache file over a download
    ///
    /// Fails with `ScreenerError::Cache` when no usable cache exists and
    /// the download cannot be completed - the screener cannot size any
    /// position without this table.
    pub async fn load(client: &NseClient, cache_dir: &Path) -> Result<Self, ScreenerError> {
        let today = Local::now().date_naive();

        let path = match usable_cache_file(cache_dir, today) {
            Some(path) => {
                info!("Using cached lot sizes: {}", path.display());
                path
            }
            None => download_to_cache(client, cache_dir, today).await?,
        };

        let sizes = parse_lot_csv(&path)?;
        if sizes.is_empty() {
            return Err(ScreenerError::Cache(format!(
                "no lot sizes parsed from {}",
                path.display()
            )));
        }

        info!("Loaded {} lot sizes", sizes.len());
        Ok(Self { sizes })
    }

    /// Lot size for a symbol
    pub fn get(&self, symbol: &str) -> Result<u32, ScreenerError> {
        self.sizes
            .get(symbol)
            .copied()
            .ok_or_else(|| ScreenerError::LotSizeNotFound(symbol.to_string()))
    }

    /// Number of symbols in the table
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// True when the table holds no symbols
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Newest cache file younger than the TTL, today's file preferred
fn usable_cache_file(cache_dir: &Path, today: NaiveDate) -> Option<PathBuf> {
    let todays = cache_dir.join(cache_file_name(today));
    if todays.exists() {
        return Some(todays);
    }

    let entries = fs::read_dir(cache_dir).ok()?;
    let mut candidates: Vec<(NaiveDate, PathBuf)> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let date = cache_file_date(&path)?;
            let age = (today - date).num_days();
            (0..=LOT_CACHE_MAX_AGE_DAYS).contains(&age).then_some((date, path))
        })
        .collect();

    candidates.sort_by_key(|(date, _)| *date);
    candidates.pop().map(|(_, path)| path)
}

async fn download_to_cache(
    client: &NseClient,
    cache_dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf, ScreenerError> {
    info!("Downloading lot sizes from NSE...");
    let csv = client.lot_csv().await?;

    fs::create_dir_all(cache_dir)
        .map_err(|e| ScreenerError::Cache(format!("create {}: {e}", cache_dir.display())))?;

    let path = cache_dir.join(cache_file_name(today));
    fs::write(&path, csv)
        .map_err(|e| ScreenerError::Cache(format!("write {}: {e}", path.display())))?;
    info!("Lot sizes cached: {}", path.display());

    cleanup_stale(cache_dir, today);
    Ok(path)
}

/// Drop cache files older than the TTL after a successful download
fn cleanup_stale(cache_dir: &Path, today: NaiveDate) {
    let Ok(entries) = fs::read_dir(cache_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(date) = cache_file_date(&path) else {
            continue;
        };
        if (today - date).num_days() > LOT_CACHE_MAX_AGE_DAYS {
            match fs::remove_file(&path) {
                Ok(()) => debug!("Cleaned old cache: {}", path.display()),
                Err(e) => warn!("Could not remove old cache {}: {e}", path.display()),
            }
        }
    }
}

fn cache_file_name(date: NaiveDate) -> String {
    format!("{CACHE_PREFIX}{}{CACHE_SUFFIX}", date.format(CACHE_DATE_FORMAT))
}

fn cache_file_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let date = name.strip_prefix(CACHE_PREFIX)?.strip_suffix(CACHE_SUFFIX)?;
    NaiveDate::parse_from_str(date, CACHE_DATE_FORMAT).ok()
}

/// Parse the archive CSV: symbol in column 1, the first non-empty
/// all-digit month column supplies the lot size
fn parse_lot_csv(path: &Path) -> Result<FxHashMap<String, u32>, ScreenerError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ScreenerError::Cache(format!("open {}: {e}", path.display())))?;

    let mut sizes = FxHashMap::default();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                // Ragged or mangled rows are dropped, not fatal
                debug!("Skipping malformed lot-size row: {e}");
                continue;
            }
        };

        let Some(symbol) = record.get(SYMBOL_COLUMN) else {
            continue;
        };
        if symbol.is_empty() || symbol == "Symbol" {
            continue;
        }

        let lot_size = (FIRST_MONTH_COLUMN..record.len())
            .filter_map(|idx| record.get(idx))
            .filter(|value| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
            .find_map(|value| value.parse::<u32>().ok());

        // Zero is not a usable lot size
        if let Some(lot_size) = lot_size.filter(|&size| size > 0) {
            sizes.insert(symbol.to_string(), lot_size);
        }
    }

    Ok(sizes)
}
