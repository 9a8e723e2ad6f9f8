//! One-round-trip read of the configured ranges.

use loot_sheets_core::{FetchedRanges, RangeSet, RangeSpec, RawRange};

use crate::api::SheetsApi;
use crate::error::{Error, Result, SheetsApiError};

/// Reads several ranges of one spreadsheet with a single `batchGet`.
///
/// All-or-nothing: the caller gets one value range per requested range, in
/// request order, or an error.
pub struct BatchFetcher<'a, A: ?Sized> {
    api: &'a A,
    spreadsheet_id: &'a str,
}

impl<'a, A: SheetsApi + ?Sized> BatchFetcher<'a, A> {
    pub fn new(api: &'a A, spreadsheet_id: &'a str) -> Self {
        Self {
            api,
            spreadsheet_id,
        }
    }

    /// Fetch arbitrary ranges, returned in the order given.
    pub async fn fetch_ranges(&self, specs: &[&RangeSpec]) -> Result<Vec<RawRange>> {
        let ranges: Vec<String> = specs.iter().map(|s| s.as_str().to_string()).collect();

        tracing::info!(
            "Fetching {} ranges from spreadsheet {}",
            ranges.len(),
            self.spreadsheet_id
        );
        let values = self
            .api
            .batch_get(self.spreadsheet_id, &ranges)
            .await
            .map_err(Error::Fetch)?;

        if values.len() != ranges.len() {
            return Err(Error::Fetch(SheetsApiError::Response(format!(
                "requested {} ranges, got {}",
                ranges.len(),
                values.len()
            ))));
        }
        Ok(values)
    }

    /// Fetch the four bot ranges: permissions, loot, options, aliases.
    pub async fn fetch(&self, ranges: &RangeSet) -> Result<FetchedRanges> {
        let values = self.fetch_ranges(&ranges.as_array()).await?;
        FetchedRanges::from_ordered(values).ok_or_else(|| {
            Error::Fetch(SheetsApiError::Response("expected exactly four ranges".into()))
        })
    }
}
