//! Per-event deduplication
//!
//! The cross-window and same-timing passes can each produce several
//! candidates for one event. Only the top-confidence candidate survives,
//! and it must re-clear the full gate set; a survivor that fails
//! re-validation drops the event entirely rather than falling back to the
//! runner-up.

use rust_decimal::Decimal;

use super::types::FlipDetection;

/// Gate set a surviving candidate must re-clear
#[derive(Debug, Clone)]
pub struct RevalidationThresholds {
    pub min_confidence_threshold: Decimal,
    pub min_sharp_threshold: Decimal,
    pub min_signal_strength_diff: Decimal,
}

/// Reduces all candidates for one event to at most one
pub struct Deduplicator {
    thresholds: RevalidationThresholds,
}

impl Deduplicator {
    /// Create a deduplicator
    pub fn new(thresholds: RevalidationThresholds) -> Self {
        Self { thresholds }
    }

    /// Keep the top candidate for an event, re-validated
    ///
    /// The ordering is fully deterministic: confidence descending, then raw
    /// confidence descending, then earlier early-signal capture time, then
    /// id. Running twice yields the same survivor.
    pub fn dedupe(&self, mut candidates: Vec<FlipDetection>) -> Option<FlipDetection> {
        if candidates.is_empty() {
            return None;
        }

        candidates.sort_by(|a, b| {
            b.confidence_score
                .cmp(&a.confidence_score)
                .then(b.raw_confidence.cmp(&a.raw_confidence))
                .then(a.early_signal.timestamp.cmp(&b.early_signal.timestamp))
                .then(a.id.cmp(&b.id))
        });

        let top = candidates.into_iter().next()?;
        if self.revalidate(&top) {
            Some(top)
        } else {
            None
        }
    }

    fn revalidate(&self, detection: &FlipDetection) -> bool {
        let strength_gap = (detection.early_signal.abs_differential()
            - detection.late_signal.abs_differential())
        .abs();

        detection.raw_confidence >= self.thresholds.min_confidence_threshold
            && detection.early_signal.abs_differential() >= self.thresholds.min_sharp_threshold
            && detection.late_signal.abs_differential() >= self.thresholds.min_sharp_threshold
            && strength_gap >= self.thresholds.min_signal_strength_diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EventIdentity;
    use crate::flip::recommendation::{Recommendation, RiskFactor, StrategyAction};
    use crate::flip::types::{FlipType, SignalPair};
    use crate::signal::{MarketSignal, Side, SplitType};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn event() -> EventIdentity {
        EventIdentity {
            event_id: "ev1".to_string(),
            home_team: "DAL".to_string(),
            away_team: "NYG".to_string(),
            start_time: Utc::now(),
        }
    }

    fn signal(stake: Decimal, bet: Decimal, hours: Decimal) -> MarketSignal {
        MarketSignal::new(
            SplitType::Moneyline,
            "vsin".to_string(),
            Some("pinnacle".to_string()),
            stake,
            bet,
            Utc::now(),
            hours,
        )
    }

    fn candidate(raw: Decimal, confidence: Decimal) -> FlipDetection {
        let pair = SignalPair::order(
            signal(dec!(70), dec!(40), dec!(8)),
            signal(dec!(44), dec!(56), dec!(1)),
        );
        FlipDetection::new(
            event(),
            FlipType::SameMarketFlip,
            &pair,
            raw,
            confidence,
            Recommendation {
                action: StrategyAction::Bet,
                side: Side::Home,
                reasoning: "test".to_string(),
                risk_factors: vec![RiskFactor::SingleSourceNoConfirmation],
            },
        )
    }

    fn dedup() -> Deduplicator {
        Deduplicator::new(RevalidationThresholds {
            min_confidence_threshold: dec!(45),
            min_sharp_threshold: dec!(12),
            min_signal_strength_diff: dec!(10),
        })
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(dedup().dedupe(vec![]).is_none());
    }

    #[test]
    fn test_keeps_highest_confidence_candidate() {
        // Raw 80 clamps to the 65 cap; it must beat the raw-40 candidate
        let strong = candidate(dec!(80), dec!(65));
        let weak = candidate(dec!(40), dec!(40));

        let survivor = dedup().dedupe(vec![weak, strong.clone()]).unwrap();
        assert_eq!(survivor.confidence_score, dec!(65));
        assert_eq!(survivor.id, strong.id);
    }

    #[test]
    fn test_exactly_one_survivor() {
        let candidates = vec![
            candidate(dec!(80), dec!(65)),
            candidate(dec!(60), dec!(60)),
            candidate(dec!(50), dec!(50)),
        ];
        let survivor = dedup().dedupe(candidates);
        assert!(survivor.is_some());
    }

    #[test]
    fn test_idempotent() {
        let candidates = vec![
            candidate(dec!(80), dec!(65)),
            candidate(dec!(60), dec!(60)),
        ];

        let first = dedup().dedupe(candidates.clone()).unwrap();
        let second = dedup().dedupe(candidates).unwrap();
        assert_eq!(first, second);

        // Feeding the survivor back through changes nothing
        let third = dedup().dedupe(vec![first.clone()]).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn test_failed_revalidation_drops_event_without_fallback() {
        // Top candidate fails the confidence re-check; the passing
        // runner-up must NOT be promoted.
        let failing_top = candidate(dec!(30), dec!(64));
        let passing_runner_up = candidate(dec!(50), dec!(50));

        let survivor = dedup().dedupe(vec![failing_top, passing_runner_up]);
        assert!(survivor.is_none());
    }

    #[test]
    fn test_revalidation_checks_strength_gap() {
        // Differentials +30 and -25: both sharp, but the gap is 5
        let pair = SignalPair::order(
            signal(dec!(70), dec!(40), dec!(8)),
            signal(dec!(40), dec!(65), dec!(1)),
        );
        let detection = FlipDetection::new(
            event(),
            FlipType::SameMarketFlip,
            &pair,
            dec!(60),
            dec!(60),
            Recommendation {
                action: StrategyAction::Bet,
                side: Side::Home,
                reasoning: "test".to_string(),
                risk_factors: vec![],
            },
        );

        assert!(dedup().dedupe(vec![detection]).is_none());
    }
}
