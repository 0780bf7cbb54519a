//! CLI interface for sharpflip
//!
//! Provides subcommands for:
//! - `event`: Evaluate a single event
//! - `scan`: Evaluate events with recent snapshot activity
//! - `today`: Evaluate events from now through the end of tomorrow
//! - `config`: Show the effective configuration

mod event;
mod scan;
mod today;

pub use event::EventArgs;
pub use scan::ScanArgs;
pub use today::TodayArgs;

use clap::{Parser, Subcommand};

use crate::flip::FlipDetection;

#[derive(Parser, Debug)]
#[command(name = "sharpflip")]
#[command(about = "Flip detection engine for sports betting market snapshots")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a single event
    Event(EventArgs),
    /// Evaluate events with recent snapshot activity
    Scan(ScanArgs),
    /// Evaluate events from now through the end of tomorrow
    Today(TodayArgs),
    /// Show the effective configuration
    Config,
}

/// Render one detection for terminal output
pub fn print_flip(flip: &FlipDetection) {
    println!(
        "{} @ {}  [{}]",
        flip.event.away_team, flip.event.home_team, flip.event.event_id
    );
    println!(
        "  {}  confidence {}  ({:?} {})",
        flip.flip_type,
        flip.confidence_score.round_dp(1),
        flip.recommendation.action,
        flip.recommendation.side.label(&flip.event),
    );
    println!("  {}", flip.recommendation.reasoning);
    for risk in &flip.recommendation.risk_factors {
        println!("  risk: {}", risk);
    }
}
