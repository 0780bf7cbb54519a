use clap::Parser;
use sharpflip::cli::{Cli, Commands};
use sharpflip::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = sharpflip::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Event(args) => {
            tracing::info!(event = %args.event_id, "Evaluating event");
            args.execute(&config).await?;
        }
        Commands::Scan(args) => {
            tracing::info!(window_hours = args.window_hours, "Scanning recent events");
            args.execute(&config).await?;
        }
        Commands::Today(args) => {
            tracing::info!("Scanning today's slate");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Snapshot: {}", config.data.snapshot_path.display());
            println!(
                "  Sharp threshold: {}  Strength gap: {}",
                config.engine.min_sharp_threshold, config.engine.min_signal_strength_diff
            );
            println!(
                "  Confidence: gate {} cap {}",
                config.engine.min_confidence_threshold, config.engine.confidence_cap
            );
            println!(
                "  Windows: early >= {}h, late <= {}h",
                config.engine.early_cutoff_hours, config.engine.late_cutoff_hours
            );
            println!(
                "  Banned combinations: {} (v{})",
                config.engine.banned_combinations.len(),
                config.engine.banned_combinations.version
            );
        }
    }

    Ok(())
}
