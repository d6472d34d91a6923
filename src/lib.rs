// ce-release - stage a CRYENGINE game release
//
// This is the library crate containing the release stages and configuration.
// The binary crate (main.rs) wires configuration, logging and the archiver together.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use metrics::ReleaseMetrics;
pub use models::{GameBinary, ReleaseConfig};
pub use pipeline::{ReleaseBuilder, ReleaseSummary};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
