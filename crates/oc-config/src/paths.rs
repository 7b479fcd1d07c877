//! OS-specific path resolution for configuration files

use oc_types::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Get the configuration directory
///
/// Priority:
/// 1. Runtime override via `OLLAMA_CATALOG_ENV` environment variable:
///    `~/.ollama-catalog-{env}/`
/// 2. Development mode (debug builds): `~/.ollama-catalog-dev/`
/// 3. Production mode (release builds): `~/.ollama-catalog/`
pub fn config_dir() -> AppResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::Config("Could not determine home directory".to_string()))?;

    if let Ok(env_suffix) = std::env::var("OLLAMA_CATALOG_ENV") {
        return Ok(home.join(format!(".ollama-catalog-{}", env_suffix)));
    }

    #[cfg(debug_assertions)]
    let dir = home.join(".ollama-catalog-dev");

    #[cfg(not(debug_assertions))]
    let dir = home.join(".ollama-catalog");

    Ok(dir)
}

/// Get the configuration file path
pub fn config_file() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("config.yaml"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir_exists(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })?;
    }
    Ok(())
}
