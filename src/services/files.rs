//! Path and copy helpers shared by the release stages.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::path::Path;

/// Copy `src` to `dest`, creating `dest`'s parent directories first.
pub fn copy_file(src: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent))?;
        }
    }

    fs::copy(src, dest).with_context(|| format!("Failed to copy {} to {}", src, dest))?;
    Ok(())
}

/// `path` relative to `root`, as a UTF-8 path.
pub fn relative_to(path: &Path, root: &Utf8Path) -> Result<Utf8PathBuf> {
    let rel = path
        .strip_prefix(root.as_std_path())
        .with_context(|| format!("{} is not below {}", path.display(), root))?;

    Utf8PathBuf::try_from(rel.to_path_buf())
        .with_context(|| format!("Path is not valid UTF-8: {}", rel.display()))
}

/// Forward-slash form of a relative path, used for pattern matching and archive entry names.
pub fn slash_path(path: &Utf8Path) -> String {
    path.components()
        .map(|c| c.as_str())
        .filter(|c| *c != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// True for regular files and symlinks that resolve to one.
pub fn is_file_entry(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let src = root.join("src.txt");
        fs::write(&src, "data").unwrap();

        let dest = root.join("a/b/c/dest.txt");
        copy_file(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "data");
    }

    #[test]
    fn test_copy_file_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        assert!(copy_file(&root.join("nope.txt"), &root.join("out.txt")).is_err());
    }

    #[test]
    fn test_relative_to() {
        let rel = relative_to(Path::new("/engine/bin/win_x64/Qt5Core.dll"), Utf8Path::new("/engine"))
            .unwrap();
        assert_eq!(rel, Utf8PathBuf::from("bin/win_x64/Qt5Core.dll"));

        assert!(relative_to(Path::new("/other/file"), Utf8Path::new("/engine")).is_err());
    }

    #[test]
    fn test_slash_path() {
        assert_eq!(slash_path(Utf8Path::new("bin/win_x64/a.dll")), "bin/win_x64/a.dll");
        assert_eq!(slash_path(Utf8Path::new("./engine/x.pak")), "engine/x.pak");
        assert_eq!(slash_path(Utf8Path::new("")), "");
    }
}
