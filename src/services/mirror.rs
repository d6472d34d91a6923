use crate::services::files::{copy_file, is_file_entry, relative_to, slash_path};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors specific to mirror-copying a directory
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Invalid exclusion pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Source directory not found: {0}")]
    SourceMissing(Utf8PathBuf),
}

/// Exclusion patterns anchored at one copy root.
///
/// Each pattern is matched against the file path relative to the source root,
/// prefixed with the copied subdirectory (`bin/win_x64/Qt*`). Matching is:
/// - case-insensitive, with Unicode simple case folding (`É` matches `é`)
/// - `*` matches any run of characters, path separators included; `**` is the same as `*`
/// - `?` matches one character, `[...]` is a character class
/// - `{` and `}` are literal characters, there is no `{a,b}` alternation
/// - paths are compared with `/` separators on every platform
///
/// A `[` without its closing `]` is rejected with [`MirrorError::InvalidPattern`]
/// rather than matched literally.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl ExclusionSet {
    /// Compile `patterns` relative to `rel_dir`.
    pub fn new(rel_dir: &Utf8Path, patterns: &[String]) -> Result<Self, MirrorError> {
        let prefix = globset::escape(&slash_path(rel_dir).replace('\\', "/"));
        let mut builder = GlobSetBuilder::new();
        let mut anchored = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let translated = translate_pattern(&pattern.replace('\\', "/"));
            let full = if prefix.is_empty() {
                translated
            } else {
                format!("{}/{}", prefix, translated)
            };

            let glob = GlobBuilder::new(&full)
                .case_insensitive(true)
                .literal_separator(false)
                .backslash_escape(false)
                .build()
                .map_err(|source| MirrorError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;

            builder.add(glob);
            anchored.push(full);
        }

        let set = builder.build().map_err(|source| MirrorError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })?;

        Ok(Self {
            patterns: anchored,
            set,
        })
    }

    /// Check a path relative to the source root against every pattern.
    pub fn is_excluded(&self, rel_path: &Utf8Path) -> bool {
        !self.set.is_empty() && self.set.is_match(slash_path(rel_path))
    }

    /// The anchored patterns, in the order given.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Rewrite an fnmatch-style pattern into globset syntax.
///
/// Runs of `*` collapse to one `*`, which already crosses separators. Braces
/// outside a character class are wrapped in a class so they match literally.
/// Character classes are copied through untouched.
fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut prev_star = false;

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if !prev_star {
                    out.push('*');
                }
                prev_star = true;
                continue;
            }
            '[' => {
                out.push('[');
                if let Some(&negate) = chars.peek().filter(|&&n| n == '!' || n == '^') {
                    out.push(negate);
                    chars.next();
                }
                // A leading `]` is part of the class
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
                for class_char in chars.by_ref() {
                    out.push(class_char);
                    if class_char == ']' {
                        break;
                    }
                }
            }
            '{' | '}' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
        prev_star = false;
    }

    out
}

/// Outcome of one [`mirror_copy`] call. Paths are relative to the source root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorReport {
    pub copied: Vec<Utf8PathBuf>,
    pub excluded: Vec<Utf8PathBuf>,
}

/// Copy `source_root/rel_dir` to `export_root/rel_dir`, skipping excluded files.
///
/// Files are walked in sorted order. Every excluded path is logged and recorded in the
/// report; everything else is physically copied with parent directories created on demand.
///
/// # Errors
///
/// Fails if `rel_dir` does not exist under `source_root`, a pattern does not compile,
/// the tree cannot be enumerated, or a copy fails. The first failure aborts the call.
pub fn mirror_copy(
    source_root: &Utf8Path,
    rel_dir: &Utf8Path,
    excludes: &[String],
    export_root: &Utf8Path,
) -> Result<MirrorReport> {
    let source_dir = source_root.join(rel_dir);
    if !source_dir.is_dir() {
        return Err(MirrorError::SourceMissing(source_dir).into());
    }

    let exclusions = ExclusionSet::new(rel_dir, excludes)?;
    tracing::debug!("Mirroring {} with patterns {:?}", source_dir, exclusions.patterns());

    // Walk the whole tree before copying anything
    let mut manifest = Vec::new();
    for entry in WalkDir::new(&source_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to enumerate {}", source_dir))?;
        if is_file_entry(&entry) {
            manifest.push(relative_to(entry.path(), source_root)?);
        }
    }

    let mut report = MirrorReport::default();
    for rel_path in manifest {
        if exclusions.is_excluded(&rel_path) {
            tracing::info!("Excluding path: {}", rel_path);
            report.excluded.push(rel_path);
            continue;
        }

        copy_file(&source_root.join(&rel_path), &export_root.join(&rel_path))?;
        report.copied.push(rel_path);
    }

    tracing::info!(
        "Mirrored {}: {} copied, {} excluded",
        rel_dir,
        report.copied.len(),
        report.excluded.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(rel_dir: &str, patterns: &[&str]) -> ExclusionSet {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ExclusionSet::new(Utf8Path::new(rel_dir), &patterns).unwrap()
    }

    #[test]
    fn test_prefix_anchoring() {
        let excludes = set("bin/win_x64", &["Qt*"]);
        assert!(excludes.is_excluded(Utf8Path::new("bin/win_x64/Qt5Core.dll")));
        assert!(!excludes.is_excluded(Utf8Path::new("bin/win_x64/Game.dll")));
        // Anchored at the copy root, not anywhere in the path
        assert!(!excludes.is_excluded(Utf8Path::new("bin/win_x64/sub/Qt5Core.dll")));
    }

    #[test]
    fn test_star_crosses_separators() {
        let excludes = set("bin/win_x64", &["imageformats**", "platforms*"]);
        assert!(excludes.is_excluded(Utf8Path::new("bin/win_x64/imageformats/qjpeg.dll")));
        assert!(excludes.is_excluded(Utf8Path::new("bin/win_x64/platforms/a/b/qwindows.dll")));
    }

    #[test]
    fn test_case_insensitive() {
        let excludes = set("Assets", &["Levels*"]);
        assert!(excludes.is_excluded(Utf8Path::new("Assets/levels/mylevel/level.pak")));
        assert!(excludes.is_excluded(Utf8Path::new("assets/LEVELS/x")));
        assert!(!excludes.is_excluded(Utf8Path::new("Assets/textures/levels.dds")));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let excludes = set("engine", &[]);
        assert!(!excludes.is_excluded(Utf8Path::new("engine/anything.pak")));
    }

    #[test]
    fn test_backslash_paths_normalized() {
        let excludes = set("bin\\win_x64", &["Editor*"]);
        assert!(excludes.is_excluded(Utf8Path::new("bin/win_x64/EditorPlugins/x.dll")));
    }

    #[test]
    fn test_question_mark_and_class() {
        let excludes = set("bin", &["icu??[0-9]*"]);
        assert!(excludes.is_excluded(Utf8Path::new("bin/icuuc54.dll")));
        assert!(!excludes.is_excluded(Utf8Path::new("bin/icu.dll")));
    }

    #[test]
    fn test_translate_pattern() {
        assert_eq!(translate_pattern("Editor**"), "Editor*");
        assert_eq!(translate_pattern("a***b*c"), "a*b*c");
        assert_eq!(translate_pattern("plain"), "plain");
        assert_eq!(translate_pattern("a{b,c}"), "a[{]b,c[}]");
        assert_eq!(translate_pattern("[{}]x"), "[{}]x");
        assert_eq!(translate_pattern("[]*]*"), "[]*]*");
        assert_eq!(translate_pattern("[!**]**"), "[!**]*");
    }

    #[test]
    fn test_braces_are_literal() {
        let excludes = set("d", &["a{b,c}"]);
        assert!(excludes.is_excluded(Utf8Path::new("d/a{b,c}")));
        assert!(!excludes.is_excluded(Utf8Path::new("d/ab")));
        assert!(!excludes.is_excluded(Utf8Path::new("d/ac")));
    }

    #[test]
    fn test_case_folding_beyond_ascii() {
        let excludes = set("Assets", &["Éditor*"]);
        assert!(excludes.is_excluded(Utf8Path::new("Assets/éditor/x.pak")));
        assert!(!excludes.is_excluded(Utf8Path::new("Assets/editor/x.pak")));
    }

    #[test]
    fn test_invalid_pattern() {
        let patterns = vec!["[unclosed".to_string()];
        let err = ExclusionSet::new(Utf8Path::new("bin"), &patterns).unwrap_err();
        assert!(matches!(err, MirrorError::InvalidPattern { .. }));
    }
}
