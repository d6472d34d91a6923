// Release metrics
//
// Counts what a release run shipped and left behind, logged once at the end

use crate::services::{BinaryDiscovery, LevelReport, MirrorReport, PackagingReport};
use std::time::{Duration, Instant};

/// Per-run release counters
#[derive(Debug, Clone)]
pub struct ReleaseMetrics {
    /// Files copied by mirror-copy stages
    pub files_copied: usize,

    /// Files skipped by exclusion patterns
    pub paths_excluded: usize,

    /// `.pak` archives written
    pub archives_built: usize,

    /// Loose asset files copied by the packaging stage
    pub asset_files_copied: usize,

    /// Runtime level files shipped
    pub level_files_shipped: usize,

    /// Level-authoring files left behind
    pub level_files_skipped: usize,

    /// Libraries shipped by binary discovery
    pub binaries_shipped: usize,

    start_time: Instant,
}

impl ReleaseMetrics {
    pub fn new() -> Self {
        Self {
            files_copied: 0,
            paths_excluded: 0,
            archives_built: 0,
            asset_files_copied: 0,
            level_files_shipped: 0,
            level_files_skipped: 0,
            binaries_shipped: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_mirror(&mut self, report: &MirrorReport) {
        self.files_copied += report.copied.len();
        self.paths_excluded += report.excluded.len();
    }

    pub fn record_packaging(&mut self, report: &PackagingReport) {
        self.archives_built += report.archives.len();
        self.asset_files_copied += report.copied_files.len();
    }

    pub fn record_levels(&mut self, report: &LevelReport) {
        self.level_files_shipped += report.copied.len();
        self.level_files_skipped += report.skipped;
    }

    pub fn record_binaries(&mut self, discovery: &BinaryDiscovery) {
        self.binaries_shipped += discovery.libraries.len();
    }

    /// Time since the run started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Everything written into the release tree, `system.cfg` excluded
    pub fn total_shipped(&self) -> usize {
        self.files_copied
            + self.archives_built
            + self.asset_files_copied
            + self.level_files_shipped
            + self.binaries_shipped
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Release Summary ===");
        tracing::info!("Elapsed: {:.2}s", self.elapsed().as_secs_f64());
        tracing::info!(
            "Mirrored: {} copied, {} excluded",
            self.files_copied,
            self.paths_excluded
        );
        tracing::info!(
            "Assets: {} archives, {} loose files",
            self.archives_built,
            self.asset_files_copied
        );
        tracing::info!(
            "Levels: {} shipped, {} editor files skipped",
            self.level_files_shipped,
            self.level_files_skipped
        );
        tracing::info!("Libraries: {} shipped", self.binaries_shipped);
    }
}

impl Default for ReleaseMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_metrics_creation() {
        let metrics = ReleaseMetrics::new();
        assert_eq!(metrics.files_copied, 0);
        assert_eq!(metrics.total_shipped(), 0);
    }

    #[test]
    fn test_record_reports() {
        let mut metrics = ReleaseMetrics::new();

        metrics.record_mirror(&MirrorReport {
            copied: vec![Utf8PathBuf::from("engine/a.pak"), Utf8PathBuf::from("engine/b.pak")],
            excluded: vec![Utf8PathBuf::from("engine/Editor/c.pak")],
        });
        metrics.record_packaging(&PackagingReport {
            copied_files: vec!["readme.txt".to_string()],
            archives: vec![Utf8PathBuf::from("Assets/textures.pak")],
            skipped_dirs: vec!["levels".to_string()],
        });
        metrics.record_levels(&LevelReport {
            copied: vec![Utf8PathBuf::from("Assets/levels/l/level.pak")],
            skipped: 3,
        });

        assert_eq!(metrics.files_copied, 2);
        assert_eq!(metrics.paths_excluded, 1);
        assert_eq!(metrics.archives_built, 1);
        assert_eq!(metrics.level_files_skipped, 3);
        assert_eq!(metrics.total_shipped(), 5);
    }
}
