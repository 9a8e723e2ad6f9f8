//! Sources of the one-time authorization code.
//!
//! Interactive acquisition needs the user to open the authorization URL and
//! hand back the code Google shows them. Where that code comes from depends
//! on the host: a terminal, a chat DM to an admin, a test.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use url::Url;

use crate::error::{Error, Result};

#[async_trait]
pub trait CodeProvider: Send + Sync {
    /// Present `auth_url` and wait for exactly one authorization code.
    async fn authorization_code(&self, auth_url: &Url) -> Result<String>;
}

fn clean_code(raw: &str) -> Result<String> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(Error::CodeUnavailable("empty authorization code".into()));
    }
    Ok(code.to_string())
}

/// Prints the URL to stderr and reads one line from stdin.
#[derive(Debug, Default, Clone)]
pub struct StdinCodeProvider;

#[async_trait]
impl CodeProvider for StdinCodeProvider {
    async fn authorization_code(&self, auth_url: &Url) -> Result<String> {
        eprintln!("Authorize this app by visiting this url:\n{auth_url}");
        eprint!("Enter code: ");

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| Error::CodeUnavailable(format!("failed to read stdin: {e}")))?;
        if read == 0 {
            return Err(Error::CodeUnavailable("stdin closed".into()));
        }
        clean_code(&line)
    }
}

/// Host side of a [`ChannelCodeProvider`].
#[derive(Debug)]
pub struct CodeChannel {
    /// Authorization URLs to show the user, one per acquisition attempt
    pub urls: mpsc::UnboundedReceiver<Url>,
    /// Where the host sends the code once it has it
    pub codes: mpsc::Sender<String>,
}

/// Hands the URL to the host over a channel and waits for the code to come
/// back, for deployments without a terminal.
#[derive(Debug)]
pub struct ChannelCodeProvider {
    urls: mpsc::UnboundedSender<Url>,
    codes: Mutex<mpsc::Receiver<String>>,
}

impl ChannelCodeProvider {
    pub fn channel() -> (Self, CodeChannel) {
        let (url_tx, url_rx) = mpsc::unbounded_channel();
        let (code_tx, code_rx) = mpsc::channel(1);
        let provider = Self {
            urls: url_tx,
            codes: Mutex::new(code_rx),
        };
        let channel = CodeChannel {
            urls: url_rx,
            codes: code_tx,
        };
        (provider, channel)
    }
}

#[async_trait]
impl CodeProvider for ChannelCodeProvider {
    async fn authorization_code(&self, auth_url: &Url) -> Result<String> {
        tracing::info!("Waiting for authorization code for {auth_url}");
        self.urls
            .send(auth_url.clone())
            .map_err(|_| Error::CodeUnavailable("code channel closed".into()))?;

        let code = self
            .codes
            .lock()
            .await
            .recv()
            .await
            .ok_or_else(|| Error::CodeUnavailable("code channel closed".into()))?;
        clean_code(&code)
    }
}

/// Wraps a closure; `None` means no code is available.
pub struct FnCodeProvider<F>(pub F);

#[async_trait]
impl<F> CodeProvider for FnCodeProvider<F>
where
    F: Fn(&Url) -> Option<String> + Send + Sync,
{
    async fn authorization_code(&self, auth_url: &Url) -> Result<String> {
        let code = (self.0)(auth_url)
            .ok_or_else(|| Error::CodeUnavailable("no code supplied".into()))?;
        clean_code(&code)
    }
}
