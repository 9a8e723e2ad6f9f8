//! loot-sheets CLI - authorize, inspect and update the loot spreadsheet

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loot_sheets_core::DocumentSnapshot;
use loot_sheets_google::{
    CellUpdater, ClientSecrets, CredentialManager, FileCredentialStore, HttpSheetsApi,
    OAuthClient, SheetsController, StdinCodeProvider,
};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Permission a principal needs for `set-status --as`
const SET_STATUS_ACTION: &str = "set-status";

#[derive(Parser)]
#[command(name = "lootsheets")]
#[command(author, version, about = "Google Sheets loot tracker")]
struct Cli {
    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "LOOTSHEETS_CONFIG",
        default_value = "lootsheets.json"
    )]
    config: PathBuf,

    /// Use this spreadsheet instead of the configured one
    #[arg(long, global = true)]
    spreadsheet_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grant access again and overwrite the stored token
    Auth,

    /// Fetch the document and print what was indexed
    Fetch,

    /// Show which cell a player/boss pair maps to, without writing
    Lookup {
        /// Player name
        player: String,
        /// Boss name or alias
        boss: String,
    },

    /// Write a status into the player's cell for a boss
    SetStatus {
        /// Player name
        player: String,
        /// Boss name or alias
        boss: String,
        /// Value to write, interpreted as if typed into the sheet
        value: String,

        /// Only write if this principal has the set-status permission
        #[arg(long = "as")]
        principal: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(id) = cli.spreadsheet_id {
        config.spreadsheet_id = id;
    }

    match cli.command {
        Commands::Auth => auth(&config).await,
        Commands::Fetch => fetch(&config).await,
        Commands::Lookup { player, boss } => lookup(&config, &player, &boss).await,
        Commands::SetStatus {
            player,
            boss,
            value,
            principal,
        } => set_status(&config, &player, &boss, &value, principal.as_deref()).await,
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn credential_manager(config: &Config) -> Result<CredentialManager> {
    let secrets = ClientSecrets::from_file(&config.client_secrets)
        .with_context(|| format!("Failed to load '{}'", config.client_secrets.display()))?;
    let oauth = OAuthClient::new(secrets)?;
    Ok(CredentialManager::new(
        FileCredentialStore::new(&config.token_path),
        oauth,
        StdinCodeProvider,
    ))
}

async fn connect(config: &Config) -> Result<SheetsController<HttpSheetsApi>> {
    let credential = credential_manager(config)?
        .authorize()
        .await
        .context("Authorization failed")?;
    let api = HttpSheetsApi::new(credential, config.http_config()?)
        .context("Failed to create Sheets client")?;
    Ok(SheetsController::new(
        api,
        config.spreadsheet_id.clone(),
        config.ranges.clone(),
    ))
}

/// Connect and fetch the document once
async fn load(config: &Config) -> Result<(SheetsController<HttpSheetsApi>, Arc<DocumentSnapshot>)> {
    let controller = connect(config).await?;
    let snapshot = controller
        .refresh()
        .await
        .with_context(|| format!("Failed to fetch spreadsheet '{}'", config.spreadsheet_id))?;
    Ok((controller, snapshot))
}

async fn auth(config: &Config) -> Result<()> {
    credential_manager(config)?
        .reauthorize()
        .await
        .context("Authorization failed")?;
    println!("Token stored in {}", config.token_path.display());
    Ok(())
}

async fn fetch(config: &Config) -> Result<()> {
    let (_, snapshot) = load(config).await?;

    println!("Loot range: {}", snapshot.loot_range());
    println!("Bosses ({}):", snapshot.bosses().len());
    for boss in snapshot.bosses().names() {
        println!("  {boss}");
    }
    println!("Players ({}):", snapshot.names().len());
    for player in snapshot.names().names() {
        println!("  {player}");
    }
    println!("Options ({}):", snapshot.options().len());
    for (key, value) in snapshot.options().iter() {
        println!("  {key} = {value}");
    }
    println!("Principals with permissions: {}", snapshot.permissions().len());
    println!("Aliases: {}", snapshot.aliases().len());
    Ok(())
}

async fn lookup(config: &Config, player: &str, boss: &str) -> Result<()> {
    let (controller, snapshot) = load(config).await?;

    let address = CellUpdater::new(controller.api(), controller.spreadsheet_id())
        .resolve(&snapshot, player, boss)?;
    println!("{}", snapshot.cell_reference(address));
    Ok(())
}

async fn set_status(
    config: &Config,
    player: &str,
    boss: &str,
    value: &str,
    principal: Option<&str>,
) -> Result<()> {
    let (controller, _) = load(config).await?;

    if let Some(principal) = principal {
        if !controller.has_permission(principal, SET_STATUS_ACTION) {
            anyhow::bail!("'{principal}' is not allowed to {SET_STATUS_ACTION}");
        }
    }

    let write = controller.set_status(player, boss, value).await?;
    println!("{} = {}", write.range, write.value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_status() {
        let cli = Cli::parse_from([
            "lootsheets",
            "set-status",
            "Alice",
            "Onyxia",
            "won",
            "--as",
            "Officer",
            "--spreadsheet-id",
            "1AbC",
        ]);
        assert_eq!(cli.spreadsheet_id.as_deref(), Some("1AbC"));
        match cli.command {
            Commands::SetStatus {
                player,
                boss,
                value,
                principal,
            } => {
                assert_eq!(
                    (player.as_str(), boss.as_str(), value.as_str()),
                    ("Alice", "Onyxia", "won")
                );
                assert_eq!(principal.as_deref(), Some("Officer"));
            }
            _ => panic!("expected set-status"),
        }
    }
}
