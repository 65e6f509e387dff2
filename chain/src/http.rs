//! HTTP-backed access policy client.
//!
//! The subnet operators publish a blacklist of miner hotkeys as a JSON
//! array at a well-known URL. The client fetches the full list on every
//! query; the participation loop only asks once per blacklist cadence, so
//! there is no caching here.

use std::time::Duration;

use aegis_types::Hotkey;

use crate::client::AccessPolicyClient;
use crate::error::ChainError;

/// Request timeout for blacklist fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the remote hotkey blacklist over HTTPS.
pub struct HttpBlacklistClient {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpBlacklistClient {
    pub fn new(url: impl Into<String>) -> Result<Self, ChainError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| ChainError::Transient(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AccessPolicyClient for HttpBlacklistClient {
    fn is_blacklisted(&self, hotkey: &Hotkey) -> Result<bool, ChainError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| ChainError::Transient(format!("blacklist fetch failed: {e}")))?;

        let blacklist = parse_blacklist(&body)?;
        Ok(blacklist.iter().any(|entry| entry == hotkey.as_str()))
    }
}

/// Parse the published blacklist body: a JSON array of hotkey strings.
fn parse_blacklist(body: &str) -> Result<Vec<String>, ChainError> {
    serde_json::from_str(body)
        .map_err(|e| ChainError::Malformed(format!("blacklist is not a JSON string array: {e}")))
}
