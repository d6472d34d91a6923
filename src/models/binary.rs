use std::fmt;

/// Game DLL name used when no library is found in the binaries folder.
pub const DEFAULT_GAME_DLL: &str = "Game.dll";

/// Name of the game library written to `sys_dll_game`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBinary {
    name: String,
    discovered: bool,
}

impl GameBinary {
    pub fn discovered(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            discovered: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// False when this is the [`DEFAULT_GAME_DLL`] fallback.
    pub fn is_discovered(&self) -> bool {
        self.discovered
    }
}

impl Default for GameBinary {
    fn default() -> Self {
        Self {
            name: DEFAULT_GAME_DLL.to_string(),
            discovered: false,
        }
    }
}

impl fmt::Display for GameBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
