//! ce-release - stage a CRYENGINE game release
//!
//! Main entry point for the command line tool.
//!
//! # Execution Flow
//!
//! 1. Resolve the config file: first argument, or `ce-release.yaml`
//! 2. Seed a default config template if the file is missing
//! 3. Load the config (YAML + `CERELEASE_*` environment overrides)
//! 4. Initialize logging → logs/ce-release.<date>
//! 5. Stop after seeding so the template can be edited first
//! 6. Build the archiver (7-Zip or in-process store zip)
//! 7. Run the release pipeline; the first error aborts with a non-zero exit

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use ce_release::config::DEFAULT_CONFIG_FILE;
use ce_release::services::archiver_from_config;
use ce_release::{APP_NAME, ConfigManager, ReleaseBuilder, VERSION};

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(Utf8PathBuf::from)
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CONFIG_FILE));

    let config_manager = ConfigManager::new(&config_path)?;
    let seeded = config_manager.write_default_if_missing()?;
    let config = config_manager.load_config()?;

    // Keep the guard alive until exit so buffered log lines are flushed
    let _log_guard = ce_release::logging::setup_logging_with_console(
        "logs",
        "ce-release",
        config.debug_mode,
        config.console_logging,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    if seeded {
        tracing::info!(
            "Created default config at {}; edit it and run again",
            config_path
        );
        return Ok(());
    }

    let archiver = archiver_from_config(&config.archiver).context("Failed to set up archiver")?;

    let summary = ReleaseBuilder::new(&config, archiver.as_ref())
        .run()
        .inspect_err(|e| tracing::error!("Release failed: {:#}", e))?;

    tracing::info!(
        "Release ready at {} ({} items shipped, game binary {})",
        config.export_path,
        summary.metrics.total_shipped(),
        summary.game_binary
    );

    Ok(())
}
