//! In-memory [`SheetsApi`] that counts and records every call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use loot_sheets_core::RawRange;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::api::{SheetsApi, UpdateAck, ValueInputOption};
use crate::error::SheetsApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedWrite {
    pub range: String,
    pub input: ValueInputOption,
    pub values: RawRange,
}

/// Pauses writes until released, to hold one in flight.
#[derive(Default)]
pub(crate) struct WriteGate {
    pub started: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub(crate) struct FakeSheetsApi {
    ranges: Mutex<Vec<RawRange>>,
    read_error: Mutex<Option<(u16, String)>>,
    write_error: Mutex<Option<(u16, String)>>,
    requested: Mutex<Vec<Vec<String>>>,
    writes: Mutex<Vec<RecordedWrite>>,
    batch_calls: AtomicUsize,
    update_calls: AtomicUsize,
    gate: Mutex<Option<Arc<WriteGate>>>,
}

impl FakeSheetsApi {
    pub(crate) fn with_ranges(ranges: Vec<RawRange>) -> Self {
        Self {
            ranges: Mutex::new(ranges),
            ..Default::default()
        }
    }

    /// Replace what the next `batch_get` returns
    pub(crate) fn set_ranges(&self, ranges: Vec<RawRange>) {
        *self.ranges.lock() = ranges;
    }

    pub(crate) fn fail_reads(&self, status: u16, message: &str) {
        *self.read_error.lock() = Some((status, message.to_string()));
    }

    pub(crate) fn fail_writes(&self, status: u16, message: &str) {
        *self.write_error.lock() = Some((status, message.to_string()));
    }

    pub(crate) fn gate_writes(&self) -> Arc<WriteGate> {
        let gate = Arc::new(WriteGate::default());
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    pub(crate) fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Total network calls of either kind
    pub(crate) fn calls(&self) -> usize {
        self.batch_calls() + self.update_calls()
    }

    pub(crate) fn requested_ranges(&self) -> Vec<Vec<String>> {
        self.requested.lock().clone()
    }

    pub(crate) fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl SheetsApi for FakeSheetsApi {
    async fn batch_get(
        &self,
        _spreadsheet_id: &str,
        ranges: &[String],
    ) -> Result<Vec<RawRange>, SheetsApiError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(ranges.to_vec());
        if let Some((status, message)) = self.read_error.lock().clone() {
            return Err(SheetsApiError::Status { status, message });
        }
        Ok(self.ranges.lock().clone())
    }

    async fn update(
        &self,
        _spreadsheet_id: &str,
        range: &str,
        input: ValueInputOption,
        values: RawRange,
    ) -> Result<UpdateAck, SheetsApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        if let Some((status, message)) = self.write_error.lock().clone() {
            return Err(SheetsApiError::Status { status, message });
        }

        let cells = values.iter().map(|row| row.len() as u32).sum();
        self.writes.lock().push(RecordedWrite {
            range: range.to_string(),
            input,
            values,
        });
        Ok(UpdateAck {
            updated_range: Some(range.to_string()),
            updated_cells: Some(cells),
        })
    }
}
