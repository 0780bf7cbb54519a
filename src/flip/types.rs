//! Flip detection types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recommendation::Recommendation;
use crate::data::EventIdentity;
use crate::signal::MarketSignal;

/// Kind of contradiction detected between two signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipType {
    /// Same market, opposite sides across timing windows
    SameMarketFlip,
    /// Different non-total markets, opposite sides
    CrossMarketContradiction,
    /// Strong early signal contradicted by a weak late one
    WeakLateContradiction,
}

impl FlipType {
    /// Stable label used for metrics and display
    pub fn label(&self) -> &'static str {
        match self {
            FlipType::SameMarketFlip => "same_market_flip",
            FlipType::CrossMarketContradiction => "cross_market_contradiction",
            FlipType::WeakLateContradiction => "weak_late_contradiction",
        }
    }
}

impl std::fmt::Display for FlipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An ordered (early, late) pair of signals for one event
///
/// The constructor sorts by hours before game, so `early` always carries at
/// least as many hours as `late`. Callers never supply the ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPair {
    early: MarketSignal,
    late: MarketSignal,
}

impl SignalPair {
    /// Order two signals into an (early, late) pair
    ///
    /// When both carry the same hours-before-game the first argument stays
    /// early, which keeps repeated runs over the same input deterministic.
    pub fn order(a: MarketSignal, b: MarketSignal) -> Self {
        if b.hours_before_game > a.hours_before_game {
            Self { early: b, late: a }
        } else {
            Self { early: a, late: b }
        }
    }

    /// The earlier signal (more hours before the game)
    pub fn early(&self) -> &MarketSignal {
        &self.early
    }

    /// The later signal (fewer hours before the game)
    pub fn late(&self) -> &MarketSignal {
        &self.late
    }

    /// Hours between the two observations
    pub fn hours_between(&self) -> Decimal {
        self.early.hours_before_game - self.late.hours_before_game
    }

    /// | |early.differential| - |late.differential| |
    pub fn strength_gap(&self) -> Decimal {
        (self.early.abs_differential() - self.late.abs_differential()).abs()
    }

    /// Whether either signal is on the total market
    pub fn involves_total(&self) -> bool {
        self.early.split_type.is_total() || self.late.split_type.is_total()
    }
}

/// A detected contradiction for one event
///
/// Value object, never mutated after creation. `confidence_score` is the
/// published, clamped value; `raw_confidence` is the unclamped scorer output
/// the threshold gate and dedup re-validation operate on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipDetection {
    /// Deterministic identifier derived from event and signal identity
    pub id: Uuid,
    /// Event this detection belongs to
    pub event: EventIdentity,
    /// Kind of contradiction
    pub flip_type: FlipType,
    /// The earlier signal
    pub early_signal: MarketSignal,
    /// The later signal
    pub late_signal: MarketSignal,
    /// Hours between the two observations
    pub hours_between_signals: Decimal,
    /// Published confidence, clamped to the engine cap
    pub confidence_score: Decimal,
    /// Unclamped scorer output
    pub raw_confidence: Decimal,
    /// Side recommendation with reasoning and risk factors
    pub recommendation: Recommendation,
    /// When the detection was assembled
    pub detected_at: DateTime<Utc>,
}

impl FlipDetection {
    /// Assemble a detection from a scored pair
    pub fn new(
        event: EventIdentity,
        flip_type: FlipType,
        pair: &SignalPair,
        raw_confidence: Decimal,
        confidence_score: Decimal,
        recommendation: Recommendation,
    ) -> Self {
        let id = detection_id(&event, flip_type, pair);
        Self {
            id,
            event,
            flip_type,
            early_signal: pair.early().clone(),
            late_signal: pair.late().clone(),
            hours_between_signals: pair.hours_between(),
            confidence_score,
            raw_confidence,
            recommendation,
            detected_at: pair.late().timestamp,
        }
    }
}

/// Name-based id so identical inputs always produce identical detections
fn detection_id(event: &EventIdentity, flip_type: FlipType, pair: &SignalPair) -> Uuid {
    let key = format!(
        "{}|{}|{}|{}|{}|{}|{}|{}",
        event.event_id,
        flip_type.label(),
        pair.early().split_type,
        pair.early().timestamp.to_rfc3339(),
        pair.early().source,
        pair.late().split_type,
        pair.late().timestamp.to_rfc3339(),
        pair.late().source,
    );
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
}
