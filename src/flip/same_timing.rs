//! Same-timing contradiction classification
//!
//! Two signals captured in the same timing window (both at or beyond the
//! early cutoff, or both at or inside the late cutoff) that back opposite
//! sides of non-total markets. Concurrent disagreement is weaker evidence
//! than a genuine temporal flip, so the score carries a discount before the
//! confidence gate. The differential floor is stricter than the pairwise
//! path to bound the O(n^2) same-bucket scan.

use rust_decimal::Decimal;

use super::confidence::ConfidenceScorer;
use super::recommendation::RecommendationGenerator;
use super::types::{FlipDetection, FlipType, SignalPair};
use crate::data::EventIdentity;
use crate::signal::{MarketSignal, SplitType};

/// Tunables for the same-timing scan
#[derive(Debug, Clone)]
pub struct SameTimingThresholds {
    pub early_cutoff_hours: Decimal,
    pub late_cutoff_hours: Decimal,
    pub min_differential: Decimal,
    pub discount: Decimal,
    pub min_confidence_threshold: Decimal,
}

/// Classifies concurrent-signal contradictions
pub struct SameTimingClassifier {
    thresholds: SameTimingThresholds,
    scorer: ConfidenceScorer,
    recommender: RecommendationGenerator,
}

impl SameTimingClassifier {
    /// Create a classifier
    pub fn new(
        thresholds: SameTimingThresholds,
        scorer: ConfidenceScorer,
        recommender: RecommendationGenerator,
    ) -> Self {
        Self {
            thresholds,
            scorer,
            recommender,
        }
    }

    /// Classify two concurrent signals, returning a detection when every
    /// gate passes
    pub fn classify(
        &self,
        a: &MarketSignal,
        b: &MarketSignal,
        event: &EventIdentity,
    ) -> Option<FlipDetection> {
        if !self.same_window(a, b) {
            return None;
        }

        if a.abs_differential() < self.thresholds.min_differential
            || b.abs_differential() < self.thresholds.min_differential
        {
            return None;
        }

        if !is_side_market(a.split_type) || !is_side_market(b.split_type) {
            return None;
        }

        if a.recommended_side == b.recommended_side {
            return None;
        }

        let pair = SignalPair::order(a.clone(), b.clone());
        let discounted = self.scorer.raw_score(&pair) * self.thresholds.discount;
        if discounted < self.thresholds.min_confidence_threshold {
            return None;
        }

        let confidence = self.scorer.clamp(discounted);
        let recommendation = self.recommender.generate(&pair, event, confidence);
        Some(FlipDetection::new(
            event.clone(),
            FlipType::CrossMarketContradiction,
            &pair,
            discounted,
            confidence,
            recommendation,
        ))
    }

    fn same_window(&self, a: &MarketSignal, b: &MarketSignal) -> bool {
        let both_early = a.hours_before_game >= self.thresholds.early_cutoff_hours
            && b.hours_before_game >= self.thresholds.early_cutoff_hours;
        let both_late = a.hours_before_game <= self.thresholds.late_cutoff_hours
            && b.hours_before_game <= self.thresholds.late_cutoff_hours;
        both_early || both_late
    }
}

fn is_side_market(split_type: SplitType) -> bool {
    match split_type {
        SplitType::Moneyline | SplitType::Spread => true,
        SplitType::Total => false,
    }
}
