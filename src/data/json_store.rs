//! File-backed signal store
//!
//! Reads a JSON export of captured snapshot rows so the engine can run
//! against offline data. Rows below the sharp threshold or captured after
//! the event start are dropped at load time, mirroring the server-side
//! filter a live store applies.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{DataAccessError, EventIdentity, SignalRow, SignalStore};

/// One event with its captured rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: EventIdentity,
    pub rows: Vec<SignalRow>,
}

/// Top-level snapshot file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotFile {
    events: Vec<EventRecord>,
}

/// In-memory store loaded from a JSON snapshot file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    events: Vec<EventRecord>,
}

impl JsonFileStore {
    /// Load a snapshot file, applying the qualifying-row filter
    pub fn load(
        path: impl AsRef<Path>,
        min_sharp_threshold: Decimal,
    ) -> Result<Self, DataAccessError> {
        let content = std::fs::read_to_string(path)?;
        let file: SnapshotFile = serde_json::from_str(&content)?;
        Ok(Self::from_records(file.events, min_sharp_threshold))
    }

    /// Build a store from already-parsed records (used by tests)
    pub fn from_records(records: Vec<EventRecord>, min_sharp_threshold: Decimal) -> Self {
        let events = records
            .into_iter()
            .map(|mut record| {
                record
                    .rows
                    .retain(|row| Self::qualifies(row, min_sharp_threshold));
                record.rows.sort_by_key(|row| row.captured_at);
                record
            })
            .collect();
        Self { events }
    }

    fn qualifies(row: &SignalRow, min_sharp_threshold: Decimal) -> bool {
        (row.stake_pct - row.bet_pct).abs() >= min_sharp_threshold
            && row.captured_at < row.event_start_time
    }

    fn find(&self, event_id: &str) -> Option<&EventRecord> {
        self.events
            .iter()
            .find(|record| record.event.event_id == event_id)
    }

    /// Number of events in the store
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl SignalStore for JsonFileStore {
    async fn fetch_signal_rows(&self, event_id: &str) -> Result<Vec<SignalRow>, DataAccessError> {
        self.find(event_id)
            .map(|record| record.rows.clone())
            .ok_or_else(|| DataAccessError::EventNotFound(event_id.to_string()))
    }

    async fn fetch_event_identity(
        &self,
        event_id: &str,
    ) -> Result<EventIdentity, DataAccessError> {
        self.find(event_id)
            .map(|record| record.event.clone())
            .ok_or_else(|| DataAccessError::EventNotFound(event_id.to_string()))
    }

    async fn fetch_event_ids_with_rows_in(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<String>, DataAccessError> {
        Ok(self
            .events
            .iter()
            .filter(|record| {
                record
                    .rows
                    .iter()
                    .any(|row| row.captured_at >= from && row.captured_at < to)
            })
            .map(|record| record.event.event_id.clone())
            .collect())
    }

    async fn fetch_event_ids_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<String>, DataAccessError> {
        Ok(self
            .events
            .iter()
            .filter(|record| {
                !record.rows.is_empty()
                    && record.event.start_time >= from
                    && record.event.start_time <= to
            })
            .map(|record| record.event.event_id.clone())
            .collect())
    }
}
