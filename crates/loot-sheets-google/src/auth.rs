//! Credential lifecycle: load, else acquire interactively, then persist.

use chrono::Utc;

use crate::code_provider::CodeProvider;
use crate::credential::Credential;
use crate::error::{Error, Result};
use crate::oauth::CodeExchange;
use crate::store::CredentialStore;

/// Owns the OAuth2 credential lifecycle.
///
/// There is no refresh or rotation: a credential is loaded once at startup
/// or granted once through the code flow.
pub struct CredentialManager {
    store: Box<dyn CredentialStore>,
    exchange: Box<dyn CodeExchange>,
    codes: Box<dyn CodeProvider>,
}

impl CredentialManager {
    pub fn new(
        store: impl CredentialStore + 'static,
        exchange: impl CodeExchange + 'static,
        codes: impl CodeProvider + 'static,
    ) -> Self {
        Self {
            store: Box::new(store),
            exchange: Box::new(exchange),
            codes: Box::new(codes),
        }
    }

    /// Read the persisted credential.
    ///
    /// A missing or unreadable credential is not an error here; it only
    /// means the caller has to run [`acquire_interactive`](Self::acquire_interactive).
    pub fn load(&self) -> Option<Credential> {
        match self.store.load() {
            Ok(credential) => {
                if credential.is_expired_at(Utc::now()) {
                    tracing::warn!(
                        "Stored credential expired at {:?}; requests may be rejected until it is re-authorized",
                        credential.expires_at()
                    );
                }
                Some(credential)
            }
            Err(e) => {
                tracing::warn!("Could not load stored credential ({e}); starting authorization");
                None
            }
        }
    }

    /// Run the authorization-code flow once.
    ///
    /// Waits on the code provider for a single code and exchanges it. A
    /// failed exchange is returned as is, without retrying. A failure to
    /// persist the new credential is only logged: the credential is still
    /// returned and usable for this session.
    pub async fn acquire_interactive(&self) -> Result<Credential> {
        let auth_url = self.exchange.authorization_url()?;
        tracing::info!("Authorization required");

        let code = self.codes.authorization_code(&auth_url).await?;
        let credential = self.exchange.exchange_code(&code).await?;

        if let Err(e) = self.store.save(&credential) {
            let err = Error::CredentialPersist(e);
            tracing::error!("{err}; the next start will ask for authorization again");
        }

        Ok(credential)
    }

    /// Stored credential if there is one, else a freshly granted one.
    pub async fn authorize(&self) -> Result<Credential> {
        match self.load() {
            Some(credential) => Ok(credential),
            None => self.acquire_interactive().await,
        }
    }

    /// Ignore any stored credential and grant a new one.
    pub async fn reauthorize(&self) -> Result<Credential> {
        self.acquire_interactive().await
    }
}
