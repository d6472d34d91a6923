//! Data models for ce-release.
//!
//! - [`ReleaseConfig`]: paths, platform, exclusion lists and stage modes loaded from `ce-release.yaml`
//! - [`ArchiverConfig`]: which archiver builds `.pak` files and how
//! - [`GameBinary`]: the game DLL name handed from binary discovery to `system.cfg` synthesis

pub mod binary;
pub mod config;

pub use binary::{DEFAULT_GAME_DLL, GameBinary};
pub use config::{ArchiverConfig, ArchiverKind, ConfigMode, ReleaseConfig, ReleaseMode};
