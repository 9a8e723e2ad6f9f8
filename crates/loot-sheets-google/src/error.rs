//! Error types for the Sheets layer.

use loot_sheets_core::MissingCoordinate;
use thiserror::Error;

/// Failures reported by a [`SheetsApi`](crate::api::SheetsApi) transport.
#[derive(Debug, Error)]
pub enum SheetsApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Response(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid client secrets: {0}")]
    ClientSecrets(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("No authorization code: {0}")]
    CodeUnavailable(String),

    #[error("Authorization code exchange failed: {0}")]
    CredentialExchange(String),

    #[error("Failed to persist credential: {0}")]
    CredentialPersist(#[source] std::io::Error),

    #[error("Batch fetch failed: {0}")]
    Fetch(#[source] SheetsApiError),

    #[error("Cannot resolve {missing} for player '{entity}' and boss '{category}'")]
    AddressResolution {
        entity: String,
        category: String,
        missing: MissingCoordinate,
    },

    #[error("Write to {range} failed: {source}")]
    Write {
        range: String,
        #[source]
        source: SheetsApiError,
    },

    #[error("No document snapshot loaded yet; fetch first")]
    NotLoaded,
}

pub type Result<T> = std::result::Result<T, Error>;
