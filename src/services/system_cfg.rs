use crate::models::GameBinary;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Runtime config file at the release root.
pub const SYSTEM_CFG: &str = "system.cfg";

/// Project-level config file at the project root.
pub const PROJECT_CFG: &str = "project.cfg";

/// Asset folder name written to `sys_game_folder`.
pub const GAME_FOLDER: &str = "Assets";

/// `key=value` lines for the release `system.cfg`.
pub fn render_system_cfg(game_folder: &str, game_binary: &GameBinary) -> String {
    format!(
        "sys_game_folder={}\nsys_dll_game={}\n",
        game_folder,
        game_binary.name()
    )
}

/// Write `export_root/system.cfg`, replacing any existing file.
pub fn write_system_cfg(export_root: &Utf8Path, game_binary: &GameBinary) -> Result<Utf8PathBuf> {
    let path = export_root.join(SYSTEM_CFG);
    fs::create_dir_all(export_root)
        .with_context(|| format!("Failed to create directory: {}", export_root))?;

    fs::write(&path, render_system_cfg(GAME_FOLDER, game_binary))
        .with_context(|| format!("Failed to write {}", path))?;

    tracing::info!("Wrote {} (sys_dll_game={})", path, game_binary);
    Ok(path)
}

/// Write the engine's `system.cfg` followed by the project's `project.cfg`.
///
/// Both files are copied verbatim; a newline is inserted only when the engine
/// file does not already end with one.
pub fn concatenate_system_cfg(
    engine_root: &Utf8Path,
    project_root: &Utf8Path,
    export_root: &Utf8Path,
) -> Result<Utf8PathBuf> {
    let engine_cfg = engine_root.join(SYSTEM_CFG);
    let project_cfg = project_root.join(PROJECT_CFG);

    let mut contents = fs::read_to_string(&engine_cfg)
        .with_context(|| format!("Failed to read engine config: {}", engine_cfg))?;
    let project = fs::read_to_string(&project_cfg)
        .with_context(|| format!("Failed to read project config: {}", project_cfg))?;

    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(&project);

    let path = export_root.join(SYSTEM_CFG);
    fs::create_dir_all(export_root)
        .with_context(|| format!("Failed to create directory: {}", export_root))?;
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path))?;

    tracing::info!("Wrote {} from {} and {}", path, engine_cfg, project_cfg);
    Ok(path)
}
