//! The object a bot embeds: fetch, look up, write.

use std::sync::Arc;

use loot_sheets_core::{DocumentSnapshot, RangeSet};
use parking_lot::RwLock;

use crate::api::SheetsApi;
use crate::error::{Error, Result};
use crate::fetch::BatchFetcher;
use crate::update::{CellUpdater, CellWrite};

/// Holds the current [`DocumentSnapshot`] of one spreadsheet.
///
/// The snapshot starts unset and is only replaced by [`refresh`](Self::refresh),
/// as a whole, by swapping the `Arc`. Readers clone the `Arc` and keep a
/// consistent view for as long as they hold it. Nothing here notices remote
/// edits; the data is as fresh as the last refresh.
pub struct SheetsController<A> {
    api: A,
    spreadsheet_id: String,
    ranges: RangeSet,
    snapshot: RwLock<Option<Arc<DocumentSnapshot>>>,
}

impl<A: SheetsApi> SheetsController<A> {
    pub fn new(api: A, spreadsheet_id: impl Into<String>, ranges: RangeSet) -> Self {
        Self {
            api,
            spreadsheet_id: spreadsheet_id.into(),
            ranges,
            snapshot: RwLock::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn ranges(&self) -> &RangeSet {
        &self.ranges
    }

    /// The snapshot installed by the last successful refresh
    pub fn snapshot(&self) -> Option<Arc<DocumentSnapshot>> {
        self.snapshot.read().clone()
    }

    fn current(&self) -> Result<Arc<DocumentSnapshot>> {
        self.snapshot().ok_or(Error::NotLoaded)
    }

    /// Fetch all four ranges and install a new snapshot.
    ///
    /// On failure the previous snapshot stays installed.
    pub async fn refresh(&self) -> Result<Arc<DocumentSnapshot>> {
        let values = BatchFetcher::new(&self.api, &self.spreadsheet_id)
            .fetch(&self.ranges)
            .await?;
        let snapshot = Arc::new(DocumentSnapshot::build(&self.ranges, &values));

        *self.snapshot.write() = Some(snapshot.clone());
        tracing::info!(
            "Loaded {} bosses and {} players from {}",
            snapshot.bosses().len(),
            snapshot.names().len(),
            self.ranges.loot
        );
        Ok(snapshot)
    }

    /// Write `value` for (`entity`, `category`) against the current snapshot.
    ///
    /// The target cell is fixed when the call starts; a refresh finishing
    /// while the write is in flight does not move it.
    pub async fn set_status(&self, entity: &str, category: &str, value: &str) -> Result<CellWrite> {
        let snapshot = self.current()?;
        CellUpdater::new(&self.api, &self.spreadsheet_id)
            .set_status(&snapshot, entity, category, value)
            .await
    }

    /// Permission check against the current snapshot; denied if none is loaded.
    pub fn has_permission(&self, principal: &str, action: &str) -> bool {
        self.snapshot()
            .is_some_and(|s| s.permissions().has_permission(principal, action))
    }
}
