//! Session-bootstrapped HTTP client for the NSE quote API

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use serde_json::Value;
use services_common::{DerivativeRecord, ScreenerError};
use tracing::{debug, warn};

use crate::models;

const NSE_HOME_URL: &str = "https://www.nseindia.com";
const NSE_QUOTE_URL: &str = "https://www.nseindia.com/api/NextApi/apiClient/GetQuoteApi";
const NSE_LOT_CSV_URL: &str = "https://nsearchives.nseindia.com/content/fo/fo_mktlots.csv";

const REQUEST_TIMEOUT_SECS: u64 = 10;
const BOOTSTRAP_SETTLE_MS: u64 = 300;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// NSE market data client
///
/// The quote API rejects bare requests; it expects the cookies a browser
/// picks up on the NSE homepage plus browser-like headers. `connect` runs
/// that bootstrap once and the cookie store carries the session afterwards.
pub struct NseClient {
    http: reqwest::Client,
    home_url: String,
    quote_url: String,
    lot_csv_url: String,
}

impl NseClient {
    /// Create a client against the production NSE endpoints
    pub fn new() -> Result<Self, ScreenerError> {
        Self::with_endpoints(NSE_HOME_URL, NSE_QUOTE_URL, NSE_LOT_CSV_URL)
    }

    /// Create a client against explicit endpoints (test servers)
    pub fn with_endpoints(
        home_url: &str,
        quote_url: &str,
        lot_csv_url: &str,
    ) -> Result<Self, ScreenerError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.nseindia.com/"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| ScreenerError::Fetch(format!("build HTTP client: {e}")))?;

        Ok(Self {
            http,
            home_url: home_url.to_string(),
            quote_url: quote_url.to_string(),
            lot_csv_url: lot_csv_url.to_string(),
        })
    }

    /// Bootstrap the session by visiting the NSE homepage
    ///
    /// A failed bootstrap is only a warning - the data calls may still
    /// succeed if a previous session cookie is alive.
    pub async fn connect(&self) {
        match self.http.get(&self.home_url).send().await {
            Ok(response) => {
                debug!("Session bootstrap returned {}", response.status());
                // Let the cookie settle before hammering the quote API
                tokio::time::sleep(Duration::from_millis(BOOTSTRAP_SETTLE_MS)).await;
            }
            Err(e) => warn!("Could not initialize NSE session: {e}"),
        }
    }

    /// Fetch all derivative records for a symbol
    ///
    /// A network or status failure surfaces as `ScreenerError::Fetch` for
    /// this symbol only; callers skip the symbol and continue the batch.
    pub async fn derivatives(&self, symbol: &str) -> Result<Vec<DerivativeRecord>, ScreenerError> {
        let url = format!(
            "{}?functionName=getSymbolDerivativesData&symbol={symbol}",
            self.quote_url
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ScreenerError::Fetch(format!("{symbol}: {e}")))?;

        if !response.status().is_success() {
            return Err(ScreenerError::Fetch(format!(
                "{symbol}: status {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ScreenerError::Fetch(format!("{symbol}: invalid JSON: {e}")))?;

        let records = models::records_from_response(&body);
        debug!("Fetched {} derivative records for {symbol}", records.len());
        Ok(records)
    }

    /// Current spot price of a symbol, 0.0 when unavailable
    pub async fn spot_price(&self, symbol: &str) -> Result<f64, ScreenerError> {
        let records = self.derivatives(symbol).await?;
        Ok(models::underlying_value(&records))
    }

    /// Download the raw F&O lot-size CSV from the NSE archives
    pub async fn lot_csv(&self) -> Result<String, ScreenerError> {
        let response = self
            .http
            .get(&self.lot_csv_url)
            .send()
            .await
            .map_err(|e| ScreenerError::Fetch(format!("lot-size CSV: {e}")))?;

        if !response.status().is_success() {
            return Err(ScreenerError::Fetch(format!(
                "lot-size CSV: status {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ScreenerError::Fetch(format!("lot-size CSV: {e}")))
    }
}
