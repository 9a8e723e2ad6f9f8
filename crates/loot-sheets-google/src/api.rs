//! Sheets API v4 transport.
//!
//! Only the two calls the bot needs: `values:batchGet` and a single-range
//! `values.update`. [`SheetsApi`] is the seam the fetcher and updater are
//! written against; [`HttpSheetsApi`] is the authorized HTTP implementation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use loot_sheets_core::RawRange;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::credential::Credential;
use crate::error::SheetsApiError;

type ApiResult<T> = std::result::Result<T, SheetsApiError>;

/// How written values are interpreted by the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueInputOption {
    /// Stored exactly as given
    Raw,
    /// Parsed as if typed into the UI (numbers, dates, formulas)
    #[default]
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

impl fmt::Display for ValueInputOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement of a values update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_cells: Option<u32>,
}

#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// Read several ranges in one request; values come back in request order.
    async fn batch_get(&self, spreadsheet_id: &str, ranges: &[String]) -> ApiResult<Vec<RawRange>>;

    /// Overwrite the cells of `range` with `values`.
    async fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        input: ValueInputOption,
        values: RawRange,
    ) -> ApiResult<UpdateAck>;
}

/// Google's Sheets API root
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Transport settings for [`HttpSheetsApi`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// API root; `None` means [`DEFAULT_BASE_URL`].
    pub base_url: Option<Url>,
    /// Per-request timeout. Default: 30 seconds.
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpConfig {
    /// The configured API root, or the default one
    pub fn resolved_base_url(&self) -> ApiResult<Url> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| {
                SheetsApiError::Response(format!("invalid base url {DEFAULT_BASE_URL}: {e}"))
            }),
        }
    }
}

/// Sheets API over HTTPS, authorized with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpSheetsApi {
    http: reqwest::Client,
    base_url: Url,
    credential: Credential,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    value_ranges: Vec<ValueRange>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: RawRange,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl HttpSheetsApi {
    pub fn new(credential: Credential, config: HttpConfig) -> ApiResult<Self> {
        let base_url = config.resolved_base_url()?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url,
            credential,
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/v4/spreadsheets/{id}/values/...` with each segment escaped
    fn values_url(&self, spreadsheet_id: &str, tail: &str) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SheetsApiError::Response(format!("invalid base url {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id, tail]);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<String> {
        let resp = request.bearer_auth(&self.credential.access_token).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(SheetsApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        serde_json::Value::Bool(true) => "TRUE".to_string(),
        serde_json::Value::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetsApi for HttpSheetsApi {
    async fn batch_get(&self, spreadsheet_id: &str, ranges: &[String]) -> ApiResult<Vec<RawRange>> {
        let mut url = self.values_url(spreadsheet_id, "values:batchGet")?;
        {
            let mut query = url.query_pairs_mut();
            for range in ranges {
                query.append_pair("ranges", range);
            }
            query.append_pair("majorDimension", "ROWS");
        }

        tracing::debug!("GET {url}");
        let body = self.send(self.http.get(url)).await?;
        let parsed: BatchGetResponse = serde_json::from_str(&body)
            .map_err(|e| SheetsApiError::Response(format!("malformed batchGet response: {e}")))?;

        Ok(parsed
            .value_ranges
            .into_iter()
            .map(|vr| {
                vr.values
                    .into_iter()
                    .map(|row| row.into_iter().map(cell_to_string).collect())
                    .collect()
            })
            .collect())
    }

    async fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        input: ValueInputOption,
        values: RawRange,
    ) -> ApiResult<UpdateAck> {
        let mut url = self.values_url(spreadsheet_id, "values")?;
        url.path_segments_mut()
            .map_err(|_| SheetsApiError::Response(format!("invalid base url {}", self.base_url)))?
            .push(range);
        url.query_pairs_mut()
            .append_pair("valueInputOption", input.as_str());

        let body = UpdateBody {
            range,
            major_dimension: "ROWS",
            values,
        };

        tracing::debug!("PUT {url}");
        let body = self.send(self.http.put(url).json(&body)).await?;
        serde_json::from_str(&body)
            .map_err(|e| SheetsApiError::Response(format!("malformed update response: {e}")))
    }
}
