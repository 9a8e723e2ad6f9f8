//! # loot-sheets-google
//!
//! Google Sheets backend for loot-sheets: OAuth2 credentials, one-round-trip
//! batch reads and single-cell writes addressed by player and boss name.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────┐  Credential  ┌───────────────┐
//! │ CredentialManager │─────────────>│ HttpSheetsApi │ (SheetsApi)
//! │  store + OAuth +  │              └───────┬───────┘
//! │  CodeProvider     │                      │
//! └───────────────────┘                      v
//!                              ┌────────────────────────────┐
//!                              │ SheetsController           │
//!                              │  BatchFetcher  -> snapshot │
//!                              │  CellUpdater   <- snapshot │
//!                              └────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use loot_sheets_core::RangeSet;
//! use loot_sheets_google::{
//!     ClientSecrets, CredentialManager, FileCredentialStore, HttpConfig, HttpSheetsApi,
//!     OAuthClient, SheetsController, StdinCodeProvider,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let secrets = ClientSecrets::from_file("credentials.json")?;
//! let manager = CredentialManager::new(
//!     FileCredentialStore::default(),
//!     OAuthClient::new(secrets)?,
//!     StdinCodeProvider,
//! );
//! let api = HttpSheetsApi::new(manager.authorize().await?, HttpConfig::default())?;
//!
//! let ranges = RangeSet::parse("Permissions!A:D", "Loot!A1:Z60", "Options!A:B", "Aliases!A:F")?;
//! let controller = SheetsController::new(api, "1AbC...", ranges);
//! controller.refresh().await?;
//! controller.set_status("Alice", "Onyxia", "won").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod code_provider;
pub mod controller;
pub mod credential;
pub mod error;
pub mod fetch;
pub mod oauth;
pub mod store;
pub mod update;

#[cfg(test)]
mod test_server;
#[cfg(test)]
mod test_support;

pub use api::{HttpConfig, DEFAULT_BASE_URL, HttpSheetsApi, SheetsApi, UpdateAck, ValueInputOption};
pub use auth::CredentialManager;
pub use code_provider::{
    ChannelCodeProvider, CodeChannel, CodeProvider, FnCodeProvider, StdinCodeProvider,
};
pub use controller::SheetsController;
pub use credential::{ClientSecrets, Credential, SPREADSHEETS_SCOPE};
pub use error::{Error, Result, SheetsApiError};
pub use fetch::BatchFetcher;
pub use oauth::{CodeExchange, OAuthClient};
pub use store::{CredentialStore, FileCredentialStore, StoreError};
pub use update::{CellUpdater, CellWrite};
