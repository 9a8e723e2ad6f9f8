//! Targeted single-cell writes addressed by player and boss name.

use loot_sheets_core::{CellAddress, DocumentSnapshot};

use crate::api::{SheetsApi, UpdateAck, ValueInputOption};
use crate::error::{Error, Result};

/// A completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    /// Full reference written, e.g. `Loot!C7`
    pub range: String,
    pub address: CellAddress,
    pub value: String,
    pub ack: UpdateAck,
}

/// Resolves (player, boss) through a snapshot and overwrites that one cell.
///
/// Resolution happens entirely before the network call, so an unknown
/// name never produces a write. There is no read-before-write: the last
/// writer wins.
pub struct CellUpdater<'a, A: ?Sized> {
    api: &'a A,
    spreadsheet_id: &'a str,
}

impl<'a, A: SheetsApi + ?Sized> CellUpdater<'a, A> {
    pub fn new(api: &'a A, spreadsheet_id: &'a str) -> Self {
        Self {
            api,
            spreadsheet_id,
        }
    }

    /// Cell for `entity`'s status on `category`, without writing anything.
    pub fn resolve(
        &self,
        snapshot: &DocumentSnapshot,
        entity: &str,
        category: &str,
    ) -> Result<CellAddress> {
        snapshot
            .locate(entity, category)
            .map_err(|missing| Error::AddressResolution {
                entity: entity.to_string(),
                category: category.to_string(),
                missing,
            })
    }

    /// Write `value` into the cell of (`entity`, `category`).
    ///
    /// On a [`Error::Write`] the remote cell state is unknown.
    pub async fn set_status(
        &self,
        snapshot: &DocumentSnapshot,
        entity: &str,
        category: &str,
        value: &str,
    ) -> Result<CellWrite> {
        let address = self.resolve(snapshot, entity, category)?;
        let range = snapshot.cell_reference(address);

        tracing::info!("Setting {range} to '{value}' ({entity} / {category})");
        let ack = self
            .api
            .update(
                self.spreadsheet_id,
                &range,
                ValueInputOption::UserEntered,
                vec![vec![value.to_string()]],
            )
            .await
            .map_err(|source| Error::Write {
                range: range.clone(),
                source,
            })?;

        Ok(CellWrite {
            range,
            address,
            value: value.to_string(),
            ack,
        })
    }
}
