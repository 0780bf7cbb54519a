//! Data access module
//!
//! The engine never fetches odds itself. Everything it consumes arrives
//! through the [`SignalStore`] trait; acquisition, parsing, and persistence
//! live behind it.

mod json_store;

pub use json_store::{EventRecord, JsonFileStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signal::SplitType;

/// A raw percentage-snapshot row for one market split
///
/// Rows are expected pre-filtered by the store: |stake - bet| at or above
/// the sharp threshold, and captured strictly before the event start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRow {
    /// Which market the split was observed on
    pub split_type: SplitType,
    /// Data source the snapshot came from
    pub source: String,
    /// Sportsbook, when the source breaks splits out per book
    pub book: Option<String>,
    /// Percentage of money (handle) on the home/over side
    pub stake_pct: Decimal,
    /// Percentage of tickets on the home/over side
    pub bet_pct: Decimal,
    /// When the snapshot was captured
    pub captured_at: DateTime<Utc>,
    /// Scheduled start of the event
    pub event_start_time: DateTime<Utc>,
}

/// Identity of a sporting event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventIdentity {
    /// Unique event identifier
    pub event_id: String,
    /// Home team code
    pub home_team: String,
    /// Away team code
    pub away_team: String,
    /// Scheduled start of the event
    pub start_time: DateTime<Utc>,
}

/// Errors surfaced by a [`SignalStore`] implementation
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// No event with the given identifier
    #[error("event not found: {0}")]
    EventNotFound(String),
    /// Snapshot file could not be read
    #[error("snapshot read failed: {0}")]
    Io(#[from] std::io::Error),
    /// Snapshot file could not be decoded
    #[error("snapshot decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Trait for signal row providers
#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Fetch all qualifying rows for an event, ascending by capture time
    async fn fetch_signal_rows(&self, event_id: &str) -> Result<Vec<SignalRow>, DataAccessError>;

    /// Fetch the identity of an event
    async fn fetch_event_identity(&self, event_id: &str)
        -> Result<EventIdentity, DataAccessError>;

    /// Event ids with at least one qualifying row captured in [from, to)
    async fn fetch_event_ids_with_rows_in(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<String>, DataAccessError>;

    /// Event ids with rows whose event starts in [from, to]
    async fn fetch_event_ids_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<String>, DataAccessError>;
}
