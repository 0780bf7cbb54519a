//! Event command implementation

use clap::Args;

use crate::config::Config;
use crate::data::JsonFileStore;
use crate::engine::FlipEngine;

#[derive(Args, Debug)]
pub struct EventArgs {
    /// Event identifier to evaluate
    pub event_id: String,
}

impl EventArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = JsonFileStore::load(
            &config.data.snapshot_path,
            config.engine.min_sharp_threshold,
        )?;
        let engine = FlipEngine::new(store, config.engine.clone())?;

        match engine.detect_for_event(&self.event_id).await? {
            Some(flip) => super::print_flip(&flip),
            None => println!("No flip detected for {}", self.event_id),
        }
        Ok(())
    }
}
