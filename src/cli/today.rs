//! Today command implementation

use clap::Args;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::data::JsonFileStore;
use crate::engine::FlipEngine;

#[derive(Args, Debug)]
pub struct TodayArgs {
    /// Minimum published confidence to report
    #[arg(short, long, default_value = "50")]
    pub min_confidence: Decimal,
}

impl TodayArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = JsonFileStore::load(
            &config.data.snapshot_path,
            config.engine.min_sharp_threshold,
        )?;
        let engine = FlipEngine::new(store, config.engine.clone())?;

        let (flips, summary) = engine
            .detect_today_with_summary(self.min_confidence)
            .await?;

        for flip in &flips {
            super::print_flip(flip);
            println!();
        }

        println!("Events evaluated:     {}", summary.events_evaluated);
        println!("Events with a flip:   {}", summary.events_with_flip);
        println!("  same-market:        {}", summary.same_market_flips);
        println!("  cross-market:       {}", summary.cross_market_contradictions);
        println!("  weak-late:          {}", summary.weak_late_contradictions);
        println!(
            "Average confidence:   {}",
            summary.average_confidence.round_dp(1)
        );
        println!("Recommending a bet:   {}", summary.bet_count);
        Ok(())
    }
}
