//! The release pipeline: every stage, in order, exactly once.
//!
//! 1. `engine/` from the engine root, unfiltered
//! 2. `bin/<platform>/` from the engine root, minus editor binaries
//! 3. project assets: packed ([`ReleaseMode::Packaged`]) or mirrored ([`ReleaseMode::Loose`])
//! 4. project binaries: every library shipped, or mirrored with exclusions
//! 5. runtime level files
//! 6. `system.cfg`
//!
//! The first failing stage aborts the run. Whatever was already written to the
//! export directory stays there.

use crate::metrics::ReleaseMetrics;
use crate::models::{ConfigMode, GameBinary, ReleaseConfig, ReleaseMode};
use crate::services::system_cfg::GAME_FOLDER;
use crate::services::{
    Archiver, concatenate_system_cfg, discover_game_binary, extract_levels, find_game_binary,
    mirror_copy, package_assets, write_system_cfg,
};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct ReleaseSummary {
    pub game_binary: GameBinary,
    pub system_cfg: Utf8PathBuf,
    pub metrics: ReleaseMetrics,
}

/// Runs the release stages for one [`ReleaseConfig`].
pub struct ReleaseBuilder<'a, A: Archiver + ?Sized> {
    config: &'a ReleaseConfig,
    archiver: &'a A,
}

impl<'a, A: Archiver + ?Sized> ReleaseBuilder<'a, A> {
    pub fn new(config: &'a ReleaseConfig, archiver: &'a A) -> Self {
        Self { config, archiver }
    }

    pub fn run(&self) -> Result<ReleaseSummary> {
        let config = self.config;
        let export = config.export_path.as_path();
        let bin_rel = config.binaries_rel_dir();
        let mut metrics = ReleaseMetrics::new();

        tracing::info!(
            "Building release: engine={}, project={}, export={}, mode={:?}",
            config.engine_path,
            config.project_path,
            export,
            config.release_mode
        );

        {
            let _stage = tracing::info_span!("engine").entered();
            let report = mirror_copy(&config.engine_path, Utf8Path::new("engine"), &[], export)
                .context("Engine copy failed")?;
            metrics.record_mirror(&report);

            let report = mirror_copy(&config.engine_path, &bin_rel, &config.binary_excludes, export)
                .context("Engine binaries copy failed")?;
            metrics.record_mirror(&report);
        }

        {
            let _stage = tracing::info_span!("assets").entered();
            match config.release_mode {
                ReleaseMode::Packaged => {
                    let report = package_assets(
                        &config.project_assets(),
                        &export.join(GAME_FOLDER),
                        self.archiver,
                    )
                    .context("Asset packaging failed")?;
                    metrics.record_packaging(&report);
                }
                ReleaseMode::Loose => {
                    let report = mirror_copy(
                        &config.project_path,
                        Utf8Path::new(GAME_FOLDER),
                        &config.asset_excludes,
                        export,
                    )
                    .context("Asset copy failed")?;
                    metrics.record_mirror(&report);
                }
            }
        }

        let game_binary = {
            let _stage = tracing::info_span!("binaries").entered();
            let project_bin = config.project_path.join(&bin_rel);
            match config.release_mode {
                ReleaseMode::Packaged => {
                    let discovery = discover_game_binary(&project_bin, &export.join(&bin_rel))
                        .context("Game binary discovery failed")?;
                    metrics.record_binaries(&discovery);
                    discovery.game_binary
                }
                ReleaseMode::Loose => {
                    let report = mirror_copy(
                        &config.project_path,
                        &bin_rel,
                        &config.binary_excludes,
                        export,
                    )
                    .context("Project binaries copy failed")?;
                    metrics.record_mirror(&report);
                    find_game_binary(&project_bin)?
                }
            }
        };

        {
            let _stage = tracing::info_span!("levels").entered();
            let report = extract_levels(&config.project_assets(), export)
                .context("Level extraction failed")?;
            metrics.record_levels(&report);
        }

        let system_cfg = {
            let _stage = tracing::info_span!("system_cfg").entered();
            match config.config_mode {
                ConfigMode::Synthesize => write_system_cfg(export, &game_binary)?,
                ConfigMode::Concatenate => {
                    concatenate_system_cfg(&config.engine_path, &config.project_path, export)?
                }
            }
        };

        metrics.log_summary();

        Ok(ReleaseSummary {
            game_binary,
            system_cfg,
            metrics,
        })
    }
}
