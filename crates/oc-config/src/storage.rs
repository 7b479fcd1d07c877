//! Config file load/save

use crate::types::AppConfig;
use oc_types::{AppError, AppResult};
use std::path::Path;
use tracing::debug;

/// Load and validate a configuration file
pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    validate_config(&config)?;
    debug!(
        "Loaded {} model entries from {}",
        config.models.len(),
        path.display()
    );
    Ok(config)
}

/// Write a configuration file
pub fn save_config(config: &AppConfig, path: &Path) -> AppResult<()> {
    let content = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

fn validate_config(config: &AppConfig) -> AppResult<()> {
    for model in &config.models {
        if model.tags_url.is_empty() {
            return Err(AppError::Config(format!(
                "Model \"{}\" has an empty tags_url",
                model.name
            )));
        }
        if model.output_file.is_empty() {
            return Err(AppError::Config(format!(
                "Model \"{}\" has an empty output_file",
                model.name
            )));
        }
    }

    // Two entries writing the same file would silently shadow each other
    // through the skip-if-exists rule.
    for (i, a) in config.models.iter().enumerate() {
        for b in config.models.iter().skip(i + 1) {
            if a.output_file == b.output_file {
                return Err(AppError::Config(format!(
                    "Models \"{}\" and \"{}\" share output_file {}",
                    a.name, b.name, a.output_file
                )));
            }
        }
    }

    Ok(())
}
