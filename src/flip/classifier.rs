//! Pairwise flip classification
//!
//! Classifies one (early, late) signal pair across timing windows. Gate
//! order: banned combinations, same source/book, side disagreement for
//! non-total pairs, sharp thresholds, strength gap. Classification runs in
//! fixed precedence, first match wins:
//!
//! 1. `SameMarketFlip`
//! 2. `CrossMarketContradiction`
//! 3. `WeakLateContradiction`

use rust_decimal::Decimal;

use super::banned::BannedCombinations;
use super::confidence::ConfidenceScorer;
use super::recommendation::RecommendationGenerator;
use super::types::{FlipDetection, FlipType, SignalPair};
use crate::data::EventIdentity;
use crate::signal::{MarketSignal, SignalStrength};

/// Thresholds the classifier gates on
#[derive(Debug, Clone)]
pub struct ClassifierThresholds {
    pub min_sharp_threshold: Decimal,
    pub min_signal_strength_diff: Decimal,
    pub min_confidence_threshold: Decimal,
}

/// Classifies early/late pairs into flip detections
pub struct PairwiseClassifier {
    thresholds: ClassifierThresholds,
    banned: BannedCombinations,
    scorer: ConfidenceScorer,
    recommender: RecommendationGenerator,
}

impl PairwiseClassifier {
    /// Create a classifier
    pub fn new(
        thresholds: ClassifierThresholds,
        banned: BannedCombinations,
        scorer: ConfidenceScorer,
        recommender: RecommendationGenerator,
    ) -> Self {
        Self {
            thresholds,
            banned,
            scorer,
            recommender,
        }
    }

    /// Classify a pair, returning a detection when every gate passes
    pub fn classify(&self, pair: &SignalPair, event: &EventIdentity) -> Option<FlipDetection> {
        if self.is_banned_pair(pair) {
            return None;
        }

        let early = pair.early();
        let late = pair.late();

        if early.source != late.source || early.book != late.book {
            return None;
        }

        if !pair.involves_total() && early.recommended_side == late.recommended_side {
            return None;
        }

        if early.abs_differential() < self.thresholds.min_sharp_threshold
            || late.abs_differential() < self.thresholds.min_sharp_threshold
        {
            return None;
        }

        if pair.strength_gap() < self.thresholds.min_signal_strength_diff {
            return None;
        }

        let flip_type = classify_flip_type(early, late)?;

        let raw = self.scorer.raw_score(pair);
        if raw < self.thresholds.min_confidence_threshold {
            return None;
        }

        let confidence = self.scorer.clamp(raw);
        let recommendation = self.recommender.generate(pair, event, confidence);
        Some(FlipDetection::new(
            event.clone(),
            flip_type,
            pair,
            raw,
            confidence,
            recommendation,
        ))
    }

    /// Total-market pairs from an excluded (source, book) never score
    fn is_banned_pair(&self, pair: &SignalPair) -> bool {
        if !pair.involves_total() {
            return false;
        }
        [pair.early(), pair.late()].iter().any(|signal| {
            self.banned
                .is_banned(&signal.source, signal.book.as_deref())
        })
    }
}

/// Fixed-precedence classification, first match wins
fn classify_flip_type(early: &MarketSignal, late: &MarketSignal) -> Option<FlipType> {
    let sides_differ = early.recommended_side != late.recommended_side;

    if early.split_type == late.split_type && sides_differ {
        return Some(FlipType::SameMarketFlip);
    }

    if early.split_type != late.split_type
        && sides_differ
        && !early.split_type.is_total()
        && !late.split_type.is_total()
    {
        return Some(FlipType::CrossMarketContradiction);
    }

    if early.strength >= SignalStrength::Strong
        && late.strength == SignalStrength::Weak
        && sides_differ
    {
        return Some(FlipType::WeakLateContradiction);
    }

    None
}
