//! Configuration loading for meonji.
//!
//! Reads `config.toml` from the platform configuration directory. The
//! effect is decorative, so configuration problems never propagate: a
//! missing or malformed file silently yields the defaults.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use meonji_core::EngineConfig;

/// Path of the user configuration file, if a home directory exists.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "meonji").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the engine configuration, falling back to defaults on any
/// problem (no config dir, unreadable file, parse error).
pub fn load() -> EngineConfig {
    config_path()
        .and_then(|path| fs::read_to_string(path).ok())
        .map(|contents| parse(&contents))
        .unwrap_or_default()
}

/// Parse a configuration document. Unknown or missing fields fall
/// back to their defaults; a document that does not parse at all
/// yields the full defaults.
pub fn parse(contents: &str) -> EngineConfig {
    toml::from_str(contents).unwrap_or_default()
}
