//! `lootsheets.json` loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use loot_sheets_core::RangeSet;
use loot_sheets_google::{FileCredentialStore, HttpConfig};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// OAuth client registration downloaded from the Google console
    pub client_secrets: PathBuf,
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
    pub spreadsheet_id: String,
    pub ranges: RangeSet,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_token_path() -> PathBuf {
    PathBuf::from(FileCredentialStore::DEFAULT_PATH)
}

impl Config {
    /// Read and validate a config file. Relative paths inside it are taken
    /// relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let mut config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config '{}'", path.display()))?;

        if config.spreadsheet_id.trim().is_empty() {
            anyhow::bail!("Invalid config '{}': spreadsheet_id is empty", path.display());
        }

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.client_secrets = base.join(&config.client_secrets);
        config.token_path = base.join(&config.token_path);
        Ok(config)
    }

    pub fn http_config(&self) -> Result<HttpConfig> {
        let mut http = HttpConfig::default();
        if let Some(base) = &self.api_base_url {
            let url = Url::parse(base).with_context(|| format!("Invalid api_base_url '{base}'"))?;
            http.base_url = Some(url);
        }
        if let Some(secs) = self.request_timeout_secs {
            http.timeout = Duration::from_secs(secs);
        }
        Ok(http)
    }
}
