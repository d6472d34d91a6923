//! Integration tests for the command line entry point
//!
//! These tests verify:
//! - A first run only seeds the config template and ships nothing

use camino::Utf8PathBuf;
use ce_release::ReleaseConfig;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_first_run_seeds_config_and_stops() {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let config_path = root.join("release.yaml");

    let output = Command::new(env!("CARGO_BIN_EXE_ce-release"))
        .arg(config_path.as_str())
        .current_dir(&root)
        .env("HOME", root.as_str())
        .env_remove("HOMEDRIVE")
        .env_remove("HOMEPATH")
        .env_remove("USERPROFILE")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let seeded: ReleaseConfig =
        serde_yaml_ng::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(seeded.export_path, root.join("Desktop/ce_game"));

    // The release never ran against the template paths
    assert!(!seeded.export_path.exists());
    assert!(root.join("logs").is_dir());
}
