use crate::models::ReleaseConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ce-release.yaml";

/// Prefix for environment overrides, e.g. `CERELEASE_EXPORT_PATH`.
pub const ENV_PREFIX: &str = "CERELEASE";

/// Configuration manager for the release YAML file.
///
/// Values are layered in this order, later sources winning:
/// - [`ReleaseConfig::default`] for every field not mentioned anywhere
/// - the YAML file (optional)
/// - `CERELEASE_*` environment variables (scalar fields, comma lists for exclusions)
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the given config file.
    ///
    /// The parent directory is created if it doesn't exist so that
    /// [`ConfigManager::save_config`] can write a template next to it.
    pub fn new<P: AsRef<Utf8Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref().to_path_buf();

        if let Some(parent) = config_path.parent() {
            if !parent.as_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {}", parent))?;
            }
        }

        Ok(Self { config_path })
    }

    /// Load the release configuration using the process environment for overrides.
    pub fn load_config(&self) -> Result<ReleaseConfig> {
        self.load_with_environment(Self::environment())
    }

    /// Load the release configuration with an explicit environment source.
    pub fn load_with_environment(&self, environment: config::Environment) -> Result<ReleaseConfig> {
        if self.config_path.exists() {
            tracing::info!("Loading release config from {}", self.config_path);
        } else {
            tracing::warn!(
                "Release config file not found at {}, using defaults",
                self.config_path
            );
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::from(self.config_path.as_std_path())
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(environment)
            .build()
            .with_context(|| format!("Failed to read release config: {}", self.config_path))?;

        let config: ReleaseConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse release config: {}", self.config_path))?;

        tracing::debug!("Effective release config: {:?}", config);
        Ok(config)
    }

    /// The `CERELEASE_*` environment source.
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("binary_excludes")
            .with_list_parse_key("asset_excludes")
    }

    /// Save the release configuration file.
    pub fn save_config(&self, config: &ReleaseConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize release config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write release config: {}", self.config_path))?;

        tracing::info!("Saved release config to {}", self.config_path);
        Ok(())
    }

    /// Write a default config template if the file is absent.
    ///
    /// Returns true if a template was written.
    pub fn write_default_if_missing(&self) -> Result<bool> {
        if self.config_path.exists() {
            return Ok(false);
        }

        self.save_config(&ReleaseConfig::default())?;
        tracing::info!(
            "Wrote default release config to {}; edit it to point at your engine and project",
            self.config_path
        );
        Ok(true)
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
