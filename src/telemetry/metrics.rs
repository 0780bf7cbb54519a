//! Prometheus metrics

use metrics::counter;

use crate::flip::FlipType;
use crate::signal::ExtractionStats;

/// Record the outcome of one extraction pass
pub fn record_extraction(stats: &ExtractionStats) {
    counter!("sharpflip_signals_extracted_total").increment(stats.extracted as u64);
    record_skips("below_threshold", stats.skipped_below_threshold);
    record_skips("too_close", stats.skipped_too_close);
    record_skips("malformed", stats.skipped_malformed);
}

fn record_skips(reason: &'static str, count: usize) {
    if count > 0 {
        counter!("sharpflip_rows_skipped_total", "reason" => reason).increment(count as u64);
    }
}

/// Record a surviving flip detection
pub fn record_flip(flip_type: FlipType) {
    counter!("sharpflip_flips_detected_total", "type" => flip_type.label()).increment(1);
}

/// Record an event whose fetch failed during a batch scan
pub fn record_event_fetch_failure() {
    counter!("sharpflip_event_fetch_failures_total").increment(1);
}
