mod cli;
mod run;

use std::str::FromStr;

use oc_types::FamilyKey;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ollama_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = cli::Cli::parse_args();

    let config_path = match cli.config {
        Some(path) => path,
        None => oc_config::paths::config_file()?,
    };
    info!("Configuration file: {}", config_path.display());

    let config = oc_config::load_config(&config_path)?;
    if config.models.is_empty() {
        info!("No models configured, nothing to do");
        return Ok(());
    }

    let only = cli.only.as_deref().map(FamilyKey::from_str).transpose()?;

    let summary = run::run_batch(&config, cli.force, only)?;
    println!(
        "Done: {} written, {} skipped, {} empty, {} failed",
        summary.written, summary.skipped, summary.empty, summary.failed
    );

    Ok(())
}
