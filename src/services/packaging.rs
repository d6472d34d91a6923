use crate::services::archiver::Archiver;
use crate::services::files::copy_file;
use crate::services::levels::LEVELS_DIR;
use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Extension of packed asset archives.
pub const PAK_EXTENSION: &str = "pak";

/// Outcome of [`package_assets`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagingReport {
    /// Loose files copied verbatim, by name.
    pub copied_files: Vec<String>,
    /// Archives written, as full destination paths.
    pub archives: Vec<Utf8PathBuf>,
    /// Directories left to level extraction, by name.
    pub skipped_dirs: Vec<String>,
}

/// Directories whose name contains `levels` (any case) are not packed.
pub fn is_levels_dir_name(name: &str) -> bool {
    name.to_ascii_lowercase().contains(LEVELS_DIR)
}

/// Ship the immediate children of `assets_root` into `dest_assets`.
///
/// - regular files are copied as-is
/// - directories are packed into `<name>.pak` by `archiver`
/// - directories with `levels` in their name are skipped; level extraction ships them
///
/// Children are processed in name order. The first archiver failure aborts packaging.
pub fn package_assets<A: Archiver + ?Sized>(
    assets_root: &Utf8Path,
    dest_assets: &Utf8Path,
    archiver: &A,
) -> Result<PackagingReport> {
    let mut children = Vec::new();
    for entry in fs::read_dir(assets_root)
        .with_context(|| format!("Failed to read asset directory: {}", assets_root))?
    {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", assets_root))?;
        let name = entry
            .file_name()
            .into_string()
            .map_err(|name| anyhow!("Asset name is not valid UTF-8: {:?}", name))?;
        children.push(name);
    }
    children.sort();

    fs::create_dir_all(dest_assets)
        .with_context(|| format!("Failed to create directory: {}", dest_assets))?;

    let mut report = PackagingReport::default();
    for name in children {
        let source = assets_root.join(&name);

        if source.is_file() {
            copy_file(&source, &dest_assets.join(&name))?;
            tracing::debug!("Copied asset file: {}", name);
            report.copied_files.push(name);
        } else if source.is_dir() {
            if is_levels_dir_name(&name) {
                tracing::debug!("Leaving {} to level extraction", name);
                report.skipped_dirs.push(name);
                continue;
            }

            let archive = dest_assets.join(format!("{}.{}", name, PAK_EXTENSION));
            tracing::info!("Packing {} into {}", source, archive);
            archiver
                .archive(&source, &archive)
                .with_context(|| format!("Failed to pack {}", source))?;
            report.archives.push(archive);
        }
    }

    tracing::info!(
        "Packaged assets: {} archives, {} loose files",
        report.archives.len(),
        report.copied_files.len()
    );

    Ok(report)
}
