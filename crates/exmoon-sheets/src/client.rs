//! HTTP client for the Google Sheets v4 `values` API.
//!
//! Reads catalog rows and appends Club sign-ups. No call is retried; every
//! failure is returned to the caller for that attempt.

use std::time::Duration;

use exmoon_core::{Lead, Product};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Response, Url};

use crate::error::{ClientError, FetchError, SubmissionError};
use crate::normalize::normalize_row;
use crate::types::{AppendBody, SheetRow, ValueRange};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Characters escaped inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Client for the Sheets `values` endpoints, authenticated with an API key.
///
/// Use [`SheetsClient::new`] for production or [`SheetsClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SheetsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SheetsClient {
    /// Creates a client pointed at the production Sheets API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let trimmed = base_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: trimmed.to_owned(),
        })
    }

    /// Fetches the catalog range and normalizes every row.
    ///
    /// Rows are returned as-is: empty ids, zero stock and duplicates are
    /// still present.
    ///
    /// # Errors
    ///
    /// See [`SheetsClient::fetch_rows`].
    pub async fn fetch_products(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<Product>, FetchError> {
        let rows = self.fetch_rows(sheet_id, range).await?;
        Ok(rows.iter().map(normalize_row).collect())
    }

    /// Fetches the raw rows of `range`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] if the API answers with a non-2xx status.
    /// - [`FetchError::EmptyResult`] if the response is not a JSON object or
    ///   has no `values` field.
    /// - [`FetchError::Connectivity`] on network failure, timeout or a body
    ///   that is not valid JSON.
    pub async fn fetch_rows(&self, sheet_id: &str, range: &str) -> Result<Vec<SheetRow>, FetchError> {
        let url = self
            .values_url(sheet_id, range, &[])
            .map_err(|reason| FetchError::Connectivity { reason })?;

        tracing::debug!(sheet_id, range, "fetching catalog range");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Connectivity {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(sheet_id, status = status.as_u16(), "catalog fetch rejected");
            return Err(FetchError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            });
        }

        let body = read_body(response)
            .await
            .map_err(|reason| FetchError::Connectivity { reason })?;
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Connectivity {
                reason: format!("invalid JSON from values endpoint: {e}"),
            })?;
        if !json.is_object() {
            return Err(FetchError::EmptyResult);
        }
        let parsed: ValueRange =
            serde_json::from_value(json).map_err(|e| FetchError::Connectivity {
                reason: format!("unexpected shape from values endpoint: {e}"),
            })?;

        let values = parsed.values.ok_or(FetchError::EmptyResult)?;
        tracing::info!(sheet_id, range, rows = values.len(), "catalog range fetched");

        Ok(values
            .iter()
            .map(|cells| SheetRow::from_cells(cells))
            .collect())
    }

    /// Appends `lead` as one row at the end of `range`.
    ///
    /// # Errors
    ///
    /// - [`SubmissionError::Http`] if the API answers with a non-2xx status.
    /// - [`SubmissionError::Connectivity`] on network failure or timeout.
    pub async fn append_lead(
        &self,
        sheet_id: &str,
        range: &str,
        lead: &Lead,
    ) -> Result<(), SubmissionError> {
        let target = format!("{range}:append");
        let url = self
            .values_url(sheet_id, &target, &[("valueInputOption", "USER_ENTERED")])
            .map_err(|reason| SubmissionError::Connectivity { reason })?;

        let body = AppendBody {
            values: [lead.to_row()],
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SubmissionError::Connectivity {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(sheet_id, range, status = status.as_u16(), "lead append rejected");
            return Err(SubmissionError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            });
        }

        tracing::info!(sheet_id, range, "lead appended");
        Ok(())
    }

    /// Builds `{base}/v4/spreadsheets/{sheet_id}/values/{target}` with the
    /// API key and any extra query parameters percent-encoded.
    fn values_url(
        &self,
        sheet_id: &str,
        target: &str,
        extra: &[(&str, &str)],
    ) -> Result<Url, String> {
        let raw = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url,
            utf8_percent_encode(sheet_id, PATH_SEGMENT),
            utf8_percent_encode(target, PATH_SEGMENT),
        );
        let mut url = Url::parse(&raw).map_err(|e| format!("invalid request URL: {e}"))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }
}

async fn read_body(response: Response) -> Result<String, String> {
    response.text().await.map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
