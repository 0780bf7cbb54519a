//! Confidence scoring
//!
//! Pure additive/penalty scoring over an (early, late) pair. The raw score
//! feeds the threshold gate; the published value is clamped to the engine
//! cap. The algorithm is unvalidated by backtesting, so the cap keeps it
//! from ever claiming high certainty.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::SignalPair;
use crate::signal::SignalStrength;

/// Source and book reliability tables
///
/// Injected configuration data, maintained alongside the banned set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityTable {
    /// Source granted the full reliability bonus
    pub primary_source: String,
    /// Book treated as the sharpest available
    pub sharpest_book: String,
    /// Softer books still granted a small bonus
    pub preferred_books: Vec<String>,
}

impl Default for ReliabilityTable {
    fn default() -> Self {
        Self {
            primary_source: "vsin".to_string(),
            sharpest_book: "pinnacle".to_string(),
            preferred_books: vec!["draftkings".to_string(), "fanduel".to_string()],
        }
    }
}

/// Scores (early, late) pairs
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    reliability: ReliabilityTable,
    cap: Decimal,
}

impl ConfidenceScorer {
    /// Create a scorer with the given reliability tables and cap
    pub fn new(reliability: ReliabilityTable, cap: Decimal) -> Self {
        Self { reliability, cap }
    }

    /// Raw, unclamped score for a pair
    pub fn raw_score(&self, pair: &SignalPair) -> Decimal {
        let early = pair.early();
        let late = pair.late();
        let mut score = dec!(15);

        score += match early.strength {
            SignalStrength::VeryStrong => dec!(20),
            SignalStrength::Strong => dec!(15),
            SignalStrength::Moderate => dec!(8),
            SignalStrength::Weak => Decimal::ZERO,
        };

        // A weak late signal corroborates the early read; a strong late move
        // may itself be legitimate sharp action.
        score += match late.strength {
            SignalStrength::VeryStrong => dec!(-20),
            SignalStrength::Strong => dec!(-10),
            SignalStrength::Moderate => dec!(-5),
            SignalStrength::Weak => dec!(8),
        };

        let gap = pair.hours_between();
        score += if gap >= dec!(8) {
            dec!(15)
        } else if gap >= dec!(6) {
            dec!(10)
        } else if gap >= dec!(4) {
            dec!(5)
        } else {
            Decimal::ZERO
        };

        score += if early.source == self.reliability.primary_source {
            dec!(10)
        } else {
            dec!(5)
        };

        score += match early.book.as_deref() {
            None => Decimal::ZERO,
            Some(book) if book == self.reliability.sharpest_book => dec!(5),
            Some(book) if self.reliability.preferred_books.iter().any(|b| b == book) => dec!(3),
            Some(_) => dec!(2),
        };

        let differential_gap = (early.differential - late.differential).abs();
        score += (dec!(0.3) * differential_gap).min(dec!(10));

        if early.hours_before_game < dec!(6) {
            score -= dec!(10);
        }
        if late.hours_before_game > dec!(2) {
            score -= dec!(5);
        }

        score
    }

    /// Clamp a raw score into [0, cap]
    pub fn clamp(&self, raw: Decimal) -> Decimal {
        raw.clamp(Decimal::ZERO, self.cap)
    }

    /// The configured cap
    pub fn cap(&self) -> Decimal {
        self.cap
    }
}
