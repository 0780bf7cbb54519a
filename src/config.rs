//! Configuration types for sharpflip

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::flip::{BannedCombinations, ReliabilityTable};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    pub data: DataConfig,
    pub telemetry: TelemetryConfig,
}

/// Engine tunables
///
/// These are engine-level constants, not user-facing flags. Every field has
/// a production default; an out-of-range value fails engine construction.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Minimum |stake% - bet%| for a row to become a signal
    #[serde(default = "default_min_sharp_threshold")]
    pub min_sharp_threshold: Decimal,

    /// Minimum gap between the two signals' absolute differentials
    #[serde(default = "default_min_signal_strength_diff")]
    pub min_signal_strength_diff: Decimal,

    /// Raw-score floor below which a classified pair is discarded
    #[serde(default = "default_min_confidence_threshold")]
    pub min_confidence_threshold: Decimal,

    /// Hard ceiling on every published confidence score
    #[serde(default = "default_confidence_cap")]
    pub confidence_cap: Decimal,

    /// Signals at or beyond this many hours form the early set
    #[serde(default = "default_early_cutoff_hours")]
    pub early_cutoff_hours: Decimal,

    /// Signals at or inside this many hours form the late set
    #[serde(default = "default_late_cutoff_hours")]
    pub late_cutoff_hours: Decimal,

    /// Stricter differential floor for the same-timing scan
    #[serde(default = "default_same_timing_min_differential")]
    pub same_timing_min_differential: Decimal,

    /// Multiplier applied to same-timing scores before the gate
    #[serde(default = "default_same_timing_discount")]
    pub same_timing_discount: Decimal,

    /// Published confidence at or above which the action is Bet
    #[serde(default = "default_bet_confidence_floor")]
    pub bet_confidence_floor: Decimal,

    /// Fixed UTC offset used for the venue-local "today" window
    #[serde(default = "default_venue_utc_offset_hours")]
    pub venue_utc_offset_hours: i32,

    /// Excluded (source, book) combinations for total-market analysis
    #[serde(default)]
    pub banned_combinations: BannedCombinations,

    /// Source and book reliability tables
    #[serde(default)]
    pub reliability: ReliabilityTable,
}

fn default_min_sharp_threshold() -> Decimal {
    dec!(12.0)
}
fn default_min_signal_strength_diff() -> Decimal {
    dec!(10.0)
}
fn default_min_confidence_threshold() -> Decimal {
    dec!(45.0)
}
fn default_confidence_cap() -> Decimal {
    dec!(65.0)
}
fn default_early_cutoff_hours() -> Decimal {
    dec!(4.0)
}
fn default_late_cutoff_hours() -> Decimal {
    dec!(2.0)
}
fn default_same_timing_min_differential() -> Decimal {
    dec!(15.0)
}
fn default_same_timing_discount() -> Decimal {
    dec!(0.80)
}
fn default_bet_confidence_floor() -> Decimal {
    dec!(55.0)
}
fn default_venue_utc_offset_hours() -> i32 {
    -5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_sharp_threshold: default_min_sharp_threshold(),
            min_signal_strength_diff: default_min_signal_strength_diff(),
            min_confidence_threshold: default_min_confidence_threshold(),
            confidence_cap: default_confidence_cap(),
            early_cutoff_hours: default_early_cutoff_hours(),
            late_cutoff_hours: default_late_cutoff_hours(),
            same_timing_min_differential: default_same_timing_min_differential(),
            same_timing_discount: default_same_timing_discount(),
            bet_confidence_floor: default_bet_confidence_floor(),
            venue_utc_offset_hours: default_venue_utc_offset_hours(),
            banned_combinations: BannedCombinations::default(),
            reliability: ReliabilityTable::default(),
        }
    }
}

impl EngineConfig {
    /// Reject out-of-range tunables before the engine is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("min_sharp_threshold", self.min_sharp_threshold),
            ("min_signal_strength_diff", self.min_signal_strength_diff),
            ("min_confidence_threshold", self.min_confidence_threshold),
            ("confidence_cap", self.confidence_cap),
            ("early_cutoff_hours", self.early_cutoff_hours),
            ("late_cutoff_hours", self.late_cutoff_hours),
            (
                "same_timing_min_differential",
                self.same_timing_min_differential,
            ),
            ("bet_confidence_floor", self.bet_confidence_floor),
        ];
        for (name, value) in positives {
            if value <= Decimal::ZERO {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.same_timing_discount <= Decimal::ZERO || self.same_timing_discount > Decimal::ONE
        {
            return Err(ConfigError::OutOfRange {
                name: "same_timing_discount",
                value: self.same_timing_discount.to_string(),
                expected: "within (0, 1]",
            });
        }

        if self.late_cutoff_hours >= self.early_cutoff_hours {
            return Err(ConfigError::OutOfRange {
                name: "late_cutoff_hours",
                value: self.late_cutoff_hours.to_string(),
                expected: "below early_cutoff_hours",
            });
        }

        if self.bet_confidence_floor > self.confidence_cap {
            return Err(ConfigError::OutOfRange {
                name: "bet_confidence_floor",
                value: self.bet_confidence_floor.to_string(),
                expected: "at or below confidence_cap",
            });
        }

        if !(-12..=14).contains(&self.venue_utc_offset_hours) {
            return Err(ConfigError::OutOfRange {
                name: "venue_utc_offset_hours",
                value: self.venue_utc_offset_hours.to_string(),
                expected: "within [-12, 14]",
            });
        }

        Ok(())
    }
}

/// Data access configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// JSON snapshot file the store reads
    pub snapshot_path: PathBuf,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Prometheus exporter port; exporter disabled when absent
    pub metrics_port: Option<u16>,
}

/// An out-of-range tunable
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: Decimal },
    #[error("{name} out of range: got {value}, expected {expected}")]
    OutOfRange {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
