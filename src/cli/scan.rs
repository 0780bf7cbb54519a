//! Scan command implementation

use clap::Args;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::data::JsonFileStore;
use crate::engine::FlipEngine;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Trailing window to scan, in hours
    #[arg(short, long, default_value_t = 24)]
    pub window_hours: i64,

    /// Minimum published confidence to report
    #[arg(short, long, default_value = "50")]
    pub min_confidence: Decimal,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = JsonFileStore::load(
            &config.data.snapshot_path,
            config.engine.min_sharp_threshold,
        )?;
        let engine = FlipEngine::new(store, config.engine.clone())?;

        let flips = engine
            .detect_recent(self.window_hours, self.min_confidence)
            .await?;

        if flips.is_empty() {
            println!(
                "No flips at confidence >= {} in the last {}h",
                self.min_confidence, self.window_hours
            );
            return Ok(());
        }

        for flip in &flips {
            super::print_flip(flip);
            println!();
        }
        Ok(())
    }
}
