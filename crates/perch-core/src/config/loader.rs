use std::io;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{Error, Result};

/// Returns the config directory: `~/.config/perch/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("perch"))
}

/// Returns the config file path: `~/.config/perch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
pub fn try_load() -> Result<Config> {
    let path = config_path().ok_or_else(|| Error::Config("could not determine config path".into()))?;
    try_load_from(&path)
}

/// Tries to load and parse a config file, then validates it.
///
/// A missing or unreadable file is [`Error::Io`]; invalid TOML is
/// [`Error::Config`] naming the file.
pub fn try_load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently yields defaults; any other failure is
/// reported on stderr first. Runs before logging is set up.
pub fn load() -> Config {
    load_or_default(try_load())
}

/// Like [`load`], for an explicit path.
pub fn load_from(path: &Path) -> Config {
    load_or_default(try_load_from(path))
}

fn load_or_default(loaded: Result<Config>) -> Config {
    match loaded {
        Ok(config) => config,
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Config::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}
