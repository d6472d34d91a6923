//! Game binary discovery.
//!
//! Scans a platform binaries folder (`bin/win_x64`) for dynamic libraries and
//! picks the one `system.cfg` points the engine at through `sys_dll_game`.
//!
//! When several libraries exist, the first by file name wins. The choice does
//! not depend on the order the filesystem lists entries in.

use crate::models::GameBinary;
use crate::services::files::copy_file;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobBuilder, GlobMatcher};
use std::fs;

/// File name pattern for dynamic libraries.
pub const LIBRARY_PATTERN: &str = "*.dll";

/// Outcome of [`discover_game_binary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryDiscovery {
    pub game_binary: GameBinary,
    /// Library file names shipped to the destination, sorted.
    pub libraries: Vec<String>,
}

fn library_matcher() -> Result<GlobMatcher> {
    let glob: Glob = GlobBuilder::new(LIBRARY_PATTERN)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("Invalid library pattern: {}", LIBRARY_PATTERN))?;
    Ok(glob.compile_matcher())
}

/// Library file names directly inside `bin_dir`, sorted by name.
pub fn list_libraries(bin_dir: &Utf8Path) -> Result<Vec<String>> {
    let matcher = library_matcher()?;
    let entries = fs::read_dir(bin_dir)
        .with_context(|| format!("Failed to read binaries directory: {}", bin_dir))?;

    let mut libraries = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", bin_dir))?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!("Skipping non-UTF-8 file name in {}", bin_dir);
            continue;
        };
        if matcher.is_match(&name) {
            libraries.push(name);
        }
    }

    libraries.sort();
    Ok(libraries)
}

/// Choose the game binary from a sorted library list.
pub fn pick_game_binary(libraries: &[String]) -> GameBinary {
    match libraries {
        [] => GameBinary::default(),
        [only] => GameBinary::discovered(only.clone()),
        [first, rest @ ..] => {
            tracing::warn!(
                "Found {} libraries, using {} as the game binary (also found: {})",
                libraries.len(),
                first,
                rest.join(", ")
            );
            GameBinary::discovered(first.clone())
        }
    }
}

/// Find the game binary in `bin_dir` without copying anything.
pub fn find_game_binary(bin_dir: &Utf8Path) -> Result<GameBinary> {
    let libraries = list_libraries(bin_dir)?;
    Ok(pick_game_binary(&libraries))
}

/// Copy every library in `bin_dir` to `dest_bin_dir` and return the game binary.
///
/// With no library present, nothing is copied and the game binary is the
/// `Game.dll` default.
pub fn discover_game_binary(bin_dir: &Utf8Path, dest_bin_dir: &Utf8Path) -> Result<BinaryDiscovery> {
    let libraries = list_libraries(bin_dir)?;

    for name in &libraries {
        let dest: Utf8PathBuf = dest_bin_dir.join(name);
        copy_file(&bin_dir.join(name), &dest)?;
        tracing::debug!("Shipped library: {}", dest);
    }

    let game_binary = pick_game_binary(&libraries);
    if game_binary.is_discovered() {
        tracing::info!("Game binary: {}", game_binary);
    } else {
        tracing::warn!(
            "No library found in {}, defaulting to {}",
            bin_dir,
            game_binary
        );
    }

    Ok(BinaryDiscovery {
        game_binary,
        libraries,
    })
}
