//! Services module - the release stages.
//!
//! Each stage is a plain function over explicit paths. None of them change the
//! working directory or keep state between calls; values one stage produces for
//! another (the game binary name) are returned and passed on by the caller.
//!
//! # Components
//!
//! - [`mirror_copy`]: recursive copy of `root/rel_dir` with glob exclusions ([`ExclusionSet`])
//! - [`package_assets`]: copies loose asset files, packs asset directories through an [`Archiver`]
//! - [`extract_levels`]: ships only `filelist.xml`, `terraintexture.pak` and `level.pak` from `levels/`
//! - [`discover_game_binary`]: ships the platform libraries and picks the game DLL
//! - [`write_system_cfg`] / [`concatenate_system_cfg`]: the release `system.cfg`
//!
//! # Archivers
//!
//! [`Archiver`] is the seam to the packing tool:
//! - [`SevenZipArchiver`] runs `7z a -r -tzip -mx0 <archive> <dir>`
//! - [`StoreZipArchiver`] writes the same store-only zip in-process
//!
//! # Usage Example
//!
//! ```ignore
//! use ce_release::services::{mirror_copy, package_assets, StoreZipArchiver};
//!
//! mirror_copy(engine, Utf8Path::new("engine"), &[], export)?;
//! package_assets(&project.join("Assets"), &export.join("Assets"), &StoreZipArchiver)?;
//! ```

pub mod archiver;
pub mod binaries;
pub mod files;
pub mod levels;
pub mod mirror;
pub mod packaging;
pub mod system_cfg;

pub use archiver::{ArchiveError, Archiver, SevenZipArchiver, StoreZipArchiver, archiver_from_config};
pub use binaries::{BinaryDiscovery, discover_game_binary, find_game_binary};
pub use levels::{LEVEL_FILES, LevelReport, extract_levels};
pub use mirror::{ExclusionSet, MirrorError, MirrorReport, mirror_copy};
pub use packaging::{PackagingReport, package_assets};
pub use system_cfg::{concatenate_system_cfg, write_system_cfg};
