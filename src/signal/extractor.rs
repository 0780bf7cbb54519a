//! Signal extraction
//!
//! Converts raw snapshot rows into [`MarketSignal`] values. Rows the engine
//! cannot use are skipped and counted, never raised: the store contract
//! already filters them server-side, and the extractor re-applies the same
//! filters locally so an unfiltered store cannot poison a scan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::MarketSignal;
use crate::data::SignalRow;
use crate::telemetry;

/// Counters for one extraction pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Signals produced
    pub extracted: usize,
    /// Rows with |stake - bet| below the sharp threshold
    pub skipped_below_threshold: usize,
    /// Rows captured under one hour before the game (or after it)
    pub skipped_too_close: usize,
    /// Rows with out-of-range percentages
    pub skipped_malformed: usize,
}

/// Extracts typed signals from snapshot rows
pub struct SignalExtractor {
    min_sharp_threshold: Decimal,
    min_hours_before_game: Decimal,
}

impl SignalExtractor {
    /// Create an extractor with the given sharp threshold
    pub fn new(min_sharp_threshold: Decimal) -> Self {
        Self {
            min_sharp_threshold,
            min_hours_before_game: dec!(1),
        }
    }

    /// Extract signals from rows, counting everything skipped
    pub fn extract(&self, rows: &[SignalRow]) -> (Vec<MarketSignal>, ExtractionStats) {
        let mut signals = Vec::with_capacity(rows.len());
        let mut stats = ExtractionStats::default();

        for row in rows {
            if !percentage_in_range(row.stake_pct) || !percentage_in_range(row.bet_pct) {
                stats.skipped_malformed += 1;
                continue;
            }

            if (row.stake_pct - row.bet_pct).abs() < self.min_sharp_threshold {
                stats.skipped_below_threshold += 1;
                continue;
            }

            let seconds_before = (row.event_start_time - row.captured_at).num_seconds();
            let hours_before_game = Decimal::from(seconds_before) / dec!(3600);
            if hours_before_game < self.min_hours_before_game {
                stats.skipped_too_close += 1;
                continue;
            }

            signals.push(MarketSignal::new(
                row.split_type,
                row.source.clone(),
                row.book.clone(),
                row.stake_pct,
                row.bet_pct,
                row.captured_at,
                hours_before_game,
            ));
            stats.extracted += 1;
        }

        telemetry::record_extraction(&stats);
        (signals, stats)
    }
}

fn percentage_in_range(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= dec!(100)
}
