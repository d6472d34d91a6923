use crate::services::files::{copy_file, is_file_entry, relative_to};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use walkdir::WalkDir;

/// Level files the runtime loads. Everything else under `levels/` is editor data.
pub const LEVEL_FILES: [&str; 3] = ["filelist.xml", "terraintexture.pak", "level.pak"];

/// Name of the levels folder inside the asset root and the release.
pub const LEVELS_DIR: &str = "levels";

/// Outcome of [`extract_levels`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelReport {
    /// Shipped files, relative to the export root (`Assets/levels/...`).
    pub copied: Vec<Utf8PathBuf>,
    /// Number of level-authoring files left behind.
    pub skipped: usize,
}

/// True if `file_name` is one of [`LEVEL_FILES`]. Exact, case-sensitive comparison.
pub fn is_runtime_level_file(file_name: &str) -> bool {
    LEVEL_FILES.contains(&file_name)
}

/// Find the `levels` folder in `assets_root`, ignoring ASCII case.
///
/// When several spellings exist (case-sensitive filesystems), the first by name wins.
pub fn find_levels_dir(assets_root: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
    let entries = fs::read_dir(assets_root)
        .with_context(|| format!("Failed to read asset directory: {}", assets_root))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", assets_root))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.eq_ignore_ascii_case(LEVELS_DIR) {
                candidates.push(name.to_string());
            }
        }
    }

    candidates.sort();
    Ok(candidates.into_iter().next().map(|name| assets_root.join(name)))
}

/// Copy the runtime files of every level into `export_root/Assets/levels`.
///
/// Only files named in [`LEVEL_FILES`] are shipped; their path below the
/// levels folder is preserved. A project without a levels folder ships nothing.
pub fn extract_levels(assets_root: &Utf8Path, export_root: &Utf8Path) -> Result<LevelReport> {
    let mut report = LevelReport::default();

    let Some(levels_dir) = find_levels_dir(assets_root)? else {
        tracing::info!("No levels folder in {}, nothing to extract", assets_root);
        return Ok(report);
    };

    let dest_root = export_root.join("Assets").join(LEVELS_DIR);

    for entry in WalkDir::new(&levels_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to enumerate {}", levels_dir))?;
        if !is_file_entry(&entry) {
            continue;
        }

        let rel_path = relative_to(entry.path(), &levels_dir)?;
        let is_runtime = rel_path.file_name().is_some_and(is_runtime_level_file);
        if !is_runtime {
            tracing::debug!("Skipping level source file: {}", rel_path);
            report.skipped += 1;
            continue;
        }

        let dest = dest_root.join(&rel_path);
        copy_file(&levels_dir.join(&rel_path), &dest)?;
        report
            .copied
            .push(Utf8PathBuf::from("Assets").join(LEVELS_DIR).join(rel_path));
    }

    tracing::info!(
        "Extracted levels: {} files shipped, {} editor files skipped",
        report.copied.len(),
        report.skipped
    );

    Ok(report)
}
