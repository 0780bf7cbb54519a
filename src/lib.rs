//! sharpflip: flip detection engine for sports betting market snapshots
//!
//! This library provides the core components for:
//! - Extracting typed market signals from percentage-snapshot rows
//! - Filtering known-unprofitable (source, book) combinations
//! - Classifying early/late signal pairs into flip types
//! - Detecting contradictions between concurrent same-window signals
//! - Conservative, capped confidence scoring
//! - Side recommendations with reasoning and risk factors
//! - Per-event deduplication down to one actionable detection
//! - Batch orchestration over recent and upcoming events
//! - Full observability stack

pub mod cli;
pub mod config;
pub mod data;
pub mod engine;
pub mod flip;
pub mod signal;
pub mod telemetry;
