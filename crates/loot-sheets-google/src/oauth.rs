//! OAuth2 authorization-code flow against Google's endpoints.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use url::Url;

use crate::credential::{
    ClientSecrets, Credential, TokenErrorResponse, TokenResponse, SPREADSHEETS_SCOPE,
};
use crate::error::{Error, Result};

/// The two halves of the code flow the credential manager depends on.
#[async_trait]
pub trait CodeExchange: Send + Sync {
    /// URL the user opens to grant access.
    fn authorization_url(&self) -> Result<Url>;

    /// Trade a one-time authorization code for a credential.
    async fn exchange_code(&self, code: &str) -> Result<Credential>;
}

/// OAuth client for an installed application.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    secrets: ClientSecrets,
    http: reqwest::Client,
}

impl OAuthClient {
    pub fn new(secrets: ClientSecrets) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self { secrets, http })
    }

    pub fn secrets(&self) -> &ClientSecrets {
        &self.secrets
    }
}

#[async_trait]
impl CodeExchange for OAuthClient {
    fn authorization_url(&self) -> Result<Url> {
        Url::parse_with_params(
            &self.secrets.auth_uri,
            &[
                ("access_type", "offline"),
                ("scope", SPREADSHEETS_SCOPE),
                ("response_type", "code"),
                ("client_id", self.secrets.client_id.as_str()),
                ("redirect_uri", self.secrets.redirect_uri()),
            ],
        )
        .map_err(|e| Error::ClientSecrets(format!("invalid auth_uri: {e}")))
    }

    async fn exchange_code(&self, code: &str) -> Result<Credential> {
        let params = [
            ("code", code),
            ("client_id", self.secrets.client_id.as_str()),
            ("client_secret", self.secrets.client_secret.as_str()),
            ("redirect_uri", self.secrets.redirect_uri()),
            ("grant_type", "authorization_code"),
        ];

        tracing::debug!("Exchanging authorization code at {}", self.secrets.token_uri);
        let resp = self
            .http
            .post(&self.secrets.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::CredentialExchange(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::CredentialExchange(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(desc) => format!("{}: {desc}", err.error),
                    None => err.error,
                },
                Err(_) => body,
            };
            return Err(Error::CredentialExchange(format!("{status}: {message}")));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::CredentialExchange(format!("malformed token response: {e}")))?;
        Ok(token.into_credential(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{respond_once, Canned};

    fn secrets(token_uri: &str) -> ClientSecrets {
        ClientSecrets {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uris: vec!["urn:ietf:wg:oauth:2.0:oob".to_string()],
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: token_uri.to_string(),
        }
    }

    #[test]
    fn test_authorization_url() {
        let client = OAuthClient::new(secrets("https://oauth2.googleapis.com/token")).unwrap();
        let url = client.authorization_url().unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert!(pairs.contains(&("access_type".into(), "offline".into())));
        assert!(pairs.contains(&("scope".into(), SPREADSHEETS_SCOPE.into())));
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&("client_id".into(), "client".into())));
        assert!(pairs.contains(&("redirect_uri".into(), "urn:ietf:wg:oauth:2.0:oob".into())));
    }

    #[test]
    fn test_client_build_failure_is_not_an_exchange_error() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = Error::HttpClient(source);
        assert!(err.to_string().starts_with("Failed to build HTTP client"), "{err}");
        assert!(std::error::Error::source(&err).is_some());
        assert!(!matches!(err, Error::CredentialExchange(_)));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let (base, request) = respond_once(Canned::json(
            200,
            r#"{"access_token":"ya29","refresh_token":"1//r","expires_in":3599,"token_type":"Bearer","scope":"s"}"#,
        ))
        .await;
        let client = OAuthClient::new(secrets(&format!("{base}token"))).unwrap();

        let cred = client.exchange_code("4/abc").await.unwrap();
        assert_eq!(cred.access_token, "ya29");
        assert_eq!(cred.refresh_token.as_deref(), Some("1//r"));
        assert!(cred.expiry_date.is_some());

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /token "));
        assert!(request.contains("grant_type=authorization_code"));
        assert!(request.contains("code=4%2Fabc"));
        assert!(request.contains("client_secret=secret"));
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let (base, _request) = respond_once(Canned::json(
            400,
            r#"{"error":"invalid_grant","error_description":"Malformed auth code."}"#,
        ))
        .await;
        let client = OAuthClient::new(secrets(&format!("{base}token"))).unwrap();

        let err = client.exchange_code("bad").await.unwrap_err();
        match err {
            Error::CredentialExchange(msg) => {
                assert!(msg.contains("invalid_grant"), "{msg}");
                assert!(msg.contains("Malformed auth code."), "{msg}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
