//! Loading `config.yaml` from the anker home directory.
//!
//! ```yaml
//! week_start: sunday     # or monday (default)
//! locales: [en, de, fr]  # month-name packs, later entries win on collisions
//! ```

use std::path::{Path, PathBuf};

use anker_timerange::Config;
use anyhow::{Context, Result};

const CONFIG_FILE: &str = "config.yaml";

/// `$ANKER_HOME`, falling back to `~/.anker`.
pub fn anker_home() -> Option<PathBuf> {
    match std::env::var_os("ANKER_HOME") {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => dirs::home_dir().map(|home| home.join(".anker")),
    }
}

/// Load the config from `explicit`, or from the default location.
///
/// A missing default file yields [`Config::default`]; a missing explicit file
/// is an error.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read(path);
    }

    let Some(path) = anker_home().map(|home| home.join(CONFIG_FILE)) else {
        return Ok(Config::default());
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    read(&path)
}

fn read(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse(contents: &str) -> Result<Config> {
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}
