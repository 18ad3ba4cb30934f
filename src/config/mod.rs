pub mod init;
mod schema;

pub use schema::{Config, RevealConfig, DEFAULT_SYMPTOM_DELAY, DEFAULT_TRACKER_DELAY};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::assessment::Tool;
use crate::scoring::validate_scoring;

/// Get the config directory path (~/.config/pain-assess/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("pain-assess"))
}

/// Get the default config file path (~/.config/pain-assess/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// With an explicit `path` the file must exist. Without one, the default
/// path is tried and a missing file yields the built-in defaults.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(path) => path,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    read_config(&config_path)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Validate the whole configuration, returning every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (tool, key) in [
        (Tool::SymptomAssessment, "symptom_assessment"),
        (Tool::PainTracker, "pain_tracker"),
    ] {
        if let Err(e) = config.reveal_delay(tool) {
            errors.push(format!("reveal.{}: {:#}", key, e));
        }
    }

    if let Some(ref scoring) = config.scoring {
        if let Err(scoring_errors) = validate_scoring(scoring) {
            errors.extend(scoring_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
