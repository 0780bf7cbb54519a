//! Orchestration layer
//!
//! Drives per-event, recent-window, and today-scope detection. The engine
//! owns no I/O beyond the injected [`SignalStore`]; classification and
//! scoring are pure computation over the fetched rows.

use chrono::{DateTime, Days, Duration, FixedOffset, Utc};
use rust_decimal::Decimal;

use crate::config::{ConfigError, EngineConfig};
use crate::data::{DataAccessError, SignalStore};
use crate::flip::{
    ClassifierThresholds, ConfidenceScorer, Deduplicator, FlipDetection, FlipType,
    PairwiseClassifier, RecommendationGenerator, RevalidationThresholds, SameTimingClassifier,
    SameTimingThresholds, SignalPair, StrategyAction,
};
use crate::signal::{MarketSignal, SignalExtractor};
use crate::telemetry;

/// Aggregate counters for a today-scope scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionSummary {
    /// Events successfully evaluated
    pub events_evaluated: usize,
    /// Events that produced a surviving detection
    pub events_with_flip: usize,
    /// Surviving same-market flips
    pub same_market_flips: usize,
    /// Surviving cross-market contradictions
    pub cross_market_contradictions: usize,
    /// Surviving weak-late contradictions
    pub weak_late_contradictions: usize,
    /// Mean published confidence across survivors, zero when none
    pub average_confidence: Decimal,
    /// Survivors whose recommended action is an actual bet
    pub bet_count: usize,
}

impl DetectionSummary {
    fn from_flips(events_evaluated: usize, flips: &[FlipDetection]) -> Self {
        let mut summary = Self {
            events_evaluated,
            events_with_flip: flips.len(),
            ..Default::default()
        };

        for flip in flips {
            match flip.flip_type {
                FlipType::SameMarketFlip => summary.same_market_flips += 1,
                FlipType::CrossMarketContradiction => summary.cross_market_contradictions += 1,
                FlipType::WeakLateContradiction => summary.weak_late_contradictions += 1,
            }
            if flip.recommendation.action == StrategyAction::Bet {
                summary.bet_count += 1;
            }
        }

        if !flips.is_empty() {
            let total: Decimal = flips.iter().map(|flip| flip.confidence_score).sum();
            summary.average_confidence = total / Decimal::from(flips.len());
        }

        summary
    }
}

/// The flip detection engine
pub struct FlipEngine<S: SignalStore> {
    store: S,
    config: EngineConfig,
    venue_offset: FixedOffset,
    extractor: SignalExtractor,
    classifier: PairwiseClassifier,
    same_timing: SameTimingClassifier,
    dedup: Deduplicator,
}

impl<S: SignalStore> FlipEngine<S> {
    /// Build an engine, failing fast on out-of-range tunables
    pub fn new(store: S, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let venue_offset = FixedOffset::east_opt(config.venue_utc_offset_hours * 3600)
            .ok_or(ConfigError::OutOfRange {
                name: "venue_utc_offset_hours",
                value: config.venue_utc_offset_hours.to_string(),
                expected: "within [-12, 14]",
            })?;

        let scorer = ConfidenceScorer::new(config.reliability.clone(), config.confidence_cap);
        let recommender = RecommendationGenerator::new(config.bet_confidence_floor);

        let classifier = PairwiseClassifier::new(
            ClassifierThresholds {
                min_sharp_threshold: config.min_sharp_threshold,
                min_signal_strength_diff: config.min_signal_strength_diff,
                min_confidence_threshold: config.min_confidence_threshold,
            },
            config.banned_combinations.clone(),
            scorer.clone(),
            recommender.clone(),
        );

        let same_timing = SameTimingClassifier::new(
            SameTimingThresholds {
                early_cutoff_hours: config.early_cutoff_hours,
                late_cutoff_hours: config.late_cutoff_hours,
                min_differential: config.same_timing_min_differential,
                discount: config.same_timing_discount,
                min_confidence_threshold: config.min_confidence_threshold,
            },
            scorer.clone(),
            recommender.clone(),
        );

        let dedup = Deduplicator::new(RevalidationThresholds {
            min_confidence_threshold: config.min_confidence_threshold,
            min_sharp_threshold: config.min_sharp_threshold,
            min_signal_strength_diff: config.min_signal_strength_diff,
        });

        Ok(Self {
            store,
            extractor: SignalExtractor::new(config.min_sharp_threshold),
            classifier,
            same_timing,
            dedup,
            venue_offset,
            config,
        })
    }

    /// Evaluate one event, returning at most one detection
    pub async fn detect_for_event(
        &self,
        event_id: &str,
    ) -> Result<Option<FlipDetection>, DataAccessError> {
        let identity = self.store.fetch_event_identity(event_id).await?;
        let rows = self.store.fetch_signal_rows(event_id).await?;
        let (signals, stats) = self.extractor.extract(&rows);

        tracing::debug!(
            event = %event_id,
            extracted = stats.extracted,
            skipped = stats.skipped_below_threshold + stats.skipped_too_close
                + stats.skipped_malformed,
            "Extracted signals"
        );

        let early: Vec<&MarketSignal> = signals
            .iter()
            .filter(|signal| signal.hours_before_game >= self.config.early_cutoff_hours)
            .collect();
        let late: Vec<&MarketSignal> = signals
            .iter()
            .filter(|signal| signal.hours_before_game <= self.config.late_cutoff_hours)
            .collect();

        let mut candidates = Vec::new();

        for early_signal in &early {
            for late_signal in &late {
                let pair = SignalPair::order((*early_signal).clone(), (*late_signal).clone());
                if let Some(detection) = self.classifier.classify(&pair, &identity) {
                    candidates.push(detection);
                }
            }
        }

        for window in [&early, &late] {
            for i in 0..window.len() {
                for j in (i + 1)..window.len() {
                    let (a, b) = (window[i], window[j]);
                    if a.abs_differential() < self.config.same_timing_min_differential
                        || b.abs_differential() < self.config.same_timing_min_differential
                    {
                        continue;
                    }
                    if let Some(detection) = self.same_timing.classify(a, b, &identity) {
                        candidates.push(detection);
                    }
                }
            }
        }

        let survivor = self.dedup.dedupe(candidates);
        if let Some(detection) = &survivor {
            telemetry::record_flip(detection.flip_type);
            tracing::info!(
                event = %event_id,
                flip_type = %detection.flip_type,
                confidence = %detection.confidence_score,
                "Flip detected"
            );
        }
        Ok(survivor)
    }

    /// Evaluate every event with qualifying rows in the trailing window
    pub async fn detect_recent(
        &self,
        window_hours: i64,
        min_confidence: Decimal,
    ) -> Result<Vec<FlipDetection>, DataAccessError> {
        self.detect_recent_at(window_hours, min_confidence, Utc::now())
            .await
    }

    /// Trailing-window detection with an explicit clock (for testing)
    pub async fn detect_recent_at(
        &self,
        window_hours: i64,
        min_confidence: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Vec<FlipDetection>, DataAccessError> {
        let from = now - Duration::hours(window_hours);
        let event_ids = self.store.fetch_event_ids_with_rows_in(from, now).await?;
        let (flips, _) = self.evaluate_events(&event_ids, min_confidence).await;
        Ok(flips)
    }

    /// Evaluate events from now through the end of tomorrow, venue-local
    pub async fn detect_today_with_summary(
        &self,
        min_confidence: Decimal,
    ) -> Result<(Vec<FlipDetection>, DetectionSummary), DataAccessError> {
        self.detect_today_with_summary_at(min_confidence, Utc::now())
            .await
    }

    /// Today-scope detection with an explicit clock (for testing)
    pub async fn detect_today_with_summary_at(
        &self,
        min_confidence: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(Vec<FlipDetection>, DetectionSummary), DataAccessError> {
        let end = self.end_of_tomorrow_utc(now);
        let event_ids = self
            .store
            .fetch_event_ids_starting_between(now, end)
            .await?;
        let (flips, events_evaluated) = self.evaluate_events(&event_ids, min_confidence).await;
        let summary = DetectionSummary::from_flips(events_evaluated, &flips);
        Ok((flips, summary))
    }

    /// Run per-event detection over a batch, skipping events whose fetch
    /// fails so one bad event cannot abort a window-wide scan
    async fn evaluate_events(
        &self,
        event_ids: &[String],
        min_confidence: Decimal,
    ) -> (Vec<FlipDetection>, usize) {
        let mut flips = Vec::new();
        let mut events_evaluated = 0usize;

        for event_id in event_ids {
            match self.detect_for_event(event_id).await {
                Ok(detection) => {
                    events_evaluated += 1;
                    if let Some(detection) = detection {
                        if detection.confidence_score >= min_confidence {
                            flips.push(detection);
                        }
                    }
                }
                Err(error) => {
                    telemetry::record_event_fetch_failure();
                    tracing::warn!(event = %event_id, error = %error, "Event evaluation failed");
                }
            }
        }

        flips.sort_by(|a, b| {
            b.confidence_score
                .cmp(&a.confidence_score)
                .then(a.event.event_id.cmp(&b.event.event_id))
        });

        (flips, events_evaluated)
    }

    fn end_of_tomorrow_utc(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let venue_now = now.with_timezone(&self.venue_offset);
        venue_now
            .date_naive()
            .checked_add_days(Days::new(1))
            .and_then(|date| date.and_hms_opt(23, 59, 59))
            .and_then(|local| local.and_local_timezone(self.venue_offset).single())
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or(now + Duration::hours(48))
    }
}
