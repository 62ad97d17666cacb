//! Centralized path definitions for kanban
//!
//! The board keeps no state on disk. The only files it reads are an
//! optional configuration file and session scripts passed on the command
//! line.
//!
//! ## Config lookup
//!
//! ```text
//! --config <PATH>                  # explicit, must exist
//! $KANBAN_CONFIG                   # explicit, must exist
//! ./kanban.toml                    # per-project
//! ~/.config/kanban/config.toml     # user-level (platform config dir)
//! ```
//!
//! When none of these exist the built-in defaults are used.

use std::path::PathBuf;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "KANBAN_CONFIG";

/// Per-project configuration filename
pub const PROJECT_CONFIG: &str = "kanban.toml";

/// Global config directory name
const GLOBAL_DIR: &str = "kanban";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the per-project config path (`./kanban.toml`)
#[must_use]
pub fn project_config() -> PathBuf {
    PathBuf::from(PROJECT_CONFIG)
}

/// Get the global kanban directory.
///
/// Returns `~/.config/kanban/` on Linux, the platform equivalent elsewhere.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

/// Config file named by `$KANBAN_CONFIG`, if set and non-empty
#[must_use]
pub fn env_config() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from)
}
