//! Market signal module
//!
//! Turns raw percentage-snapshot rows into typed, immutable signals

mod extractor;
mod types;

pub use extractor::{ExtractionStats, SignalExtractor};
pub use types::{MarketSignal, Side, SignalStrength, SplitType, TimingBucket};
