//! Integration tests for mirror-copy
//!
//! These tests verify:
//! - Exclusion soundness and completeness over real directory trees
//! - Relative path preservation
//! - Fail-fast behavior on missing sources
//! - Randomized trees and patterns (proptest)

use camino::{Utf8Path, Utf8PathBuf};
use ce_release::services::{ExclusionSet, MirrorError, mirror_copy};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn create_test_root() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, root)
}

fn write_file(root: &Utf8Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, rel).unwrap();
}

fn strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_editor_subtree_excluded() {
    let (_temp_dir, root) = create_test_root();
    let engine = root.join("engine_root");
    let export = root.join("export");
    write_file(&engine, "engine/data/x.pak");
    write_file(&engine, "engine/data/Editor/y.pak");

    let report = mirror_copy(
        &engine,
        Utf8Path::new("engine/data"),
        &strings(&["Editor**"]),
        &export,
    )
    .unwrap();

    assert!(export.join("engine/data/x.pak").is_file());
    assert!(!export.join("engine/data/Editor/y.pak").exists());
    assert_eq!(report.copied, vec![Utf8PathBuf::from("engine/data/x.pak")]);
    assert_eq!(report.excluded, vec![Utf8PathBuf::from("engine/data/Editor/y.pak")]);
}

#[test]
fn test_binary_excludes() {
    let (_temp_dir, root) = create_test_root();
    let engine = root.join("engine_root");
    let export = root.join("export");
    for rel in [
        "bin/win_x64/CrySystem.dll",
        "bin/win_x64/Qt5Core.dll",
        "bin/win_x64/Sandbox.exe",
        "bin/win_x64/imageformats/qjpeg.dll",
        "bin/win_x64/EditorCommon.dll",
    ] {
        write_file(&engine, rel);
    }

    let excludes = ce_release::ReleaseConfig::default().binary_excludes;
    let report = mirror_copy(&engine, Utf8Path::new("bin/win_x64"), &excludes, &export).unwrap();

    assert_eq!(report.copied, vec![Utf8PathBuf::from("bin/win_x64/CrySystem.dll")]);
    assert_eq!(report.excluded.len(), 4);
    assert!(!export.join("bin/win_x64/imageformats").exists());
}

#[test]
fn test_path_preservation_and_contents() {
    let (_temp_dir, root) = create_test_root();
    let source = root.join("src");
    let export = root.join("export");
    write_file(&source, "engine/a/b/c.txt");
    write_file(&source, "engine/top.cfg");

    mirror_copy(&source, Utf8Path::new("engine"), &[], &export).unwrap();

    assert_eq!(
        fs::read_to_string(export.join("engine/a/b/c.txt")).unwrap(),
        "engine/a/b/c.txt"
    );
    assert_eq!(
        fs::read_to_string(export.join("engine/top.cfg")).unwrap(),
        "engine/top.cfg"
    );
}

#[test]
fn test_existing_destination_overwritten() {
    let (_temp_dir, root) = create_test_root();
    let source = root.join("src");
    let export = root.join("export");
    write_file(&source, "engine/x.pak");
    fs::create_dir_all(export.join("engine")).unwrap();
    fs::write(export.join("engine/x.pak"), "old").unwrap();

    mirror_copy(&source, Utf8Path::new("engine"), &[], &export).unwrap();

    assert_eq!(fs::read_to_string(export.join("engine/x.pak")).unwrap(), "engine/x.pak");
}

#[test]
fn test_missing_source_fails() {
    let (_temp_dir, root) = create_test_root();

    let err = mirror_copy(&root, Utf8Path::new("engine"), &[], &root.join("export")).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MirrorError>(),
        Some(MirrorError::SourceMissing(_))
    ));
    assert!(!root.join("export").exists());
}

#[test]
fn test_invalid_pattern_fails_before_copying() {
    let (_temp_dir, root) = create_test_root();
    write_file(&root, "engine/x.pak");

    let result = mirror_copy(
        &root,
        Utf8Path::new("engine"),
        &strings(&["[broken"]),
        &root.join("export"),
    );

    assert!(result.is_err());
    assert!(!root.join("export").exists());
}

fn file_path_strategy() -> impl Strategy<Value = String> {
    (prop::collection::vec("[a-c]{1,2}", 0..3), "[a-c]{1,2}\\.f").prop_map(|(dirs, file)| {
        let mut path = dirs.join("/");
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(&file);
        path
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_mirror_copy_sound_and_complete(
        files in prop::collection::btree_set(file_path_strategy(), 1..12),
        patterns in prop::collection::vec("[a-c]{0,2}\\*?", 0..3),
    ) {
        let (_temp_dir, root) = create_test_root();
        let source = root.join("src");
        let export = root.join("export");
        for file in &files {
            write_file(&source, &format!("data/{}", file));
        }

        let rel_dir = Utf8Path::new("data");
        let exclusions = ExclusionSet::new(rel_dir, &patterns).unwrap();
        let report = mirror_copy(&source, rel_dir, &patterns, &export).unwrap();

        prop_assert_eq!(report.copied.len() + report.excluded.len(), files.len());

        for file in &files {
            let rel = Utf8PathBuf::from(format!("data/{}", file));
            let dest = export.join(&rel);
            if exclusions.is_excluded(&rel) {
                prop_assert!(!dest.exists(), "excluded file was copied: {}", rel);
                prop_assert!(report.excluded.contains(&rel));
            } else {
                prop_assert_eq!(fs::read_to_string(&dest).unwrap(), rel.as_str());
                prop_assert!(report.copied.contains(&rel));
            }
        }
    }
}
