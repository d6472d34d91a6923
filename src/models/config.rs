use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Default CRYENGINE launcher install location.
pub const DEFAULT_ENGINE_PATH: &str =
    "C:/Program Files (x86)/Crytek/CRYENGINE Launcher/Crytek/CRYENGINE_5.1";

/// Default platform binaries folder under `bin/`.
pub const DEFAULT_PLATFORM: &str = "win_x64";

/// Engine and editor binaries that never ship with a game.
pub const DEFAULT_BINARY_EXCLUDES: &[&str] = &[
    "imageformats**",
    "ToolkitPro*",
    "platforms**",
    "Qt*",
    "mfc*",
    "CryGame*",
    "Sandbox*",
    "ShaderCacheGen*",
    "smpeg2*",
    "icu*",
    "python27*",
    "LuaCompiler*",
    "Editor**",
];

/// How project assets and binaries are shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseMode {
    /// Pack asset directories into `.pak` files, ship every project library.
    #[default]
    Packaged,
    /// Mirror `Assets/` and the project binaries as loose files, with exclusions.
    Loose,
}

/// How `system.cfg` is produced in the release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigMode {
    /// Write `sys_game_folder` / `sys_dll_game` key-value pairs.
    #[default]
    Synthesize,
    /// Engine `system.cfg` followed by the project's `project.cfg`, verbatim.
    Concatenate,
}

/// Which archiver implementation builds `.pak` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiverKind {
    /// External 7-Zip command line tool.
    #[default]
    SevenZip,
    /// In-process store-only zip writer.
    StoreZip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiverConfig {
    pub kind: ArchiverKind,

    /// Executable for [`ArchiverKind::SevenZip`], looked up on `PATH` if not absolute.
    pub executable: String,

    /// Kill the archiver after this many seconds. `None` waits forever.
    pub timeout_secs: Option<u64>,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            kind: ArchiverKind::SevenZip,
            executable: "7z".to_string(),
            timeout_secs: None,
        }
    }
}

/// Release configuration from `ce-release.yaml` plus `CERELEASE_*` overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    pub engine_path: Utf8PathBuf,
    pub project_path: Utf8PathBuf,
    pub export_path: Utf8PathBuf,
    pub platform: String,
    pub binary_excludes: Vec<String>,
    pub asset_excludes: Vec<String>,
    pub release_mode: ReleaseMode,
    pub config_mode: ConfigMode,
    pub archiver: ArchiverConfig,
    pub debug_mode: bool,
    pub console_logging: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        let desktop = desktop_dir();
        Self {
            engine_path: Utf8PathBuf::from(DEFAULT_ENGINE_PATH),
            project_path: desktop.join("test1"),
            export_path: desktop.join("ce_game"),
            platform: DEFAULT_PLATFORM.to_string(),
            binary_excludes: DEFAULT_BINARY_EXCLUDES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            asset_excludes: vec!["Levels*".to_string()],
            release_mode: ReleaseMode::default(),
            config_mode: ConfigMode::default(),
            archiver: ArchiverConfig::default(),
            debug_mode: false,
            console_logging: true,
        }
    }
}

impl ReleaseConfig {
    /// `bin/<platform>`, relative to an engine or project root.
    pub fn binaries_rel_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from("bin").join(&self.platform)
    }

    /// The project's asset root.
    pub fn project_assets(&self) -> Utf8PathBuf {
        self.project_path.join("Assets")
    }
}

/// The user's desktop, falling back to the current directory.
fn desktop_dir() -> Utf8PathBuf {
    let home = match (std::env::var("HOMEDRIVE"), std::env::var("HOMEPATH")) {
        (Ok(drive), Ok(path)) => Some(format!("{}{}", drive, path)),
        _ => std::env::var("USERPROFILE")
            .or_else(|_| std::env::var("HOME"))
            .ok(),
    };

    match home {
        Some(home) => Utf8PathBuf::from(home).join("Desktop"),
        None => Utf8PathBuf::from("."),
    }
}
