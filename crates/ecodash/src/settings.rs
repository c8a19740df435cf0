use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ecodash_core::config::DashboardConfig;
use tracing::info;

pub const DATA_ENV: &str = "ECODASH_DATA";
pub const CONFIG_ENV: &str = "ECODASH_CONFIG";

/// A command-line flag wins over the environment variable.
pub fn resolve_path(flag: Option<PathBuf>, env_key: &str) -> Option<PathBuf> {
    flag.or_else(|| {
        env::var(env_key)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    })
}

pub fn data_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    resolve_path(flag, DATA_ENV)
        .with_context(|| format!("--data (or {DATA_ENV}) must point at the emissions CSV"))
}

/// Loads the dashboard config when a path is given, built-in defaults otherwise.
pub fn load_config(flag: Option<PathBuf>) -> Result<DashboardConfig> {
    match resolve_path(flag, CONFIG_ENV) {
        Some(path) => read_config(&path),
        None => {
            info!("No config file given, using built-in defaults");
            Ok(DashboardConfig::default())
        }
    }
}

fn read_config(path: &Path) -> Result<DashboardConfig> {
    let config = DashboardConfig::load(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    info!(path = %path.display(), "Loaded dashboard config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_takes_precedence_over_environment() {
        let resolved = resolve_path(Some(PathBuf::from("flag.csv")), "ECODASH_TEST_UNSET_VARIABLE");
        assert_eq!(resolved, Some(PathBuf::from("flag.csv")));
    }

    #[test]
    fn unset_environment_resolves_to_nothing() {
        assert_eq!(resolve_path(None, "ECODASH_TEST_UNSET_VARIABLE"), None);
    }

    #[test]
    fn missing_config_file_is_reported_with_path() {
        let error = load_config(Some(PathBuf::from("/nonexistent/ecodash.toml"))).unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/ecodash.toml"));
    }
}
