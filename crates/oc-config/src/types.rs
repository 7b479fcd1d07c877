use oc_types::{AppResult, FamilyKey, FamilySpec};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Registry path all model URLs are derived from
pub const DEFAULT_REGISTRY_BASE: &str = "https://ollama.com/library";

fn default_registry_base() -> String {
    DEFAULT_REGISTRY_BASE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("cleaned")
}

/// Top-level batch configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory the cleaned catalog files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Registry base path used when deriving model URLs
    #[serde(default = "default_registry_base")]
    pub registry_base: String,
    /// One entry per family/version to scrape
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            registry_base: default_registry_base(),
            models: Vec::new(),
        }
    }
}

/// One configured family/version run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Display name used in logs and the run summary
    pub name: String,
    /// Family key as written in the config file
    ///
    /// Kept as text so that one misspelled key fails only its own run;
    /// resolution happens per family in the batch driver.
    pub key: String,
    /// Version string used in canonical names ("r1", "2.5", "3.2-vision")
    #[serde(default)]
    pub version: String,
    /// Tags page to scrape
    pub tags_url: String,
    /// Output filename, relative to `output_dir`
    pub output_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelConfig {
    /// Resolve the configured key, failing with the offending text
    pub fn family_key(&self) -> AppResult<FamilyKey> {
        self.key.parse()
    }

    pub fn family_spec(&self) -> AppResult<FamilySpec> {
        Ok(FamilySpec::new(self.family_key()?, self.version.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_omitted() {
        let yaml = r#"
models:
  - name: DeepSeek R1
    key: deepseek
    version: r1
    tags_url: https://ollama.com/library/deepseek-r1/tags
    output_file: deepseek_r1.json
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("cleaned"));
        assert_eq!(config.registry_base, DEFAULT_REGISTRY_BASE);
        assert_eq!(config.models.len(), 1);
        assert_eq!(config.models[0].family_key().unwrap(), FamilyKey::Deepseek);
        assert_eq!(config.models[0].version, "r1");
        assert!(config.models[0].description.is_none());
    }

    #[test]
    fn test_unknown_family_key_fails_resolution_not_load() {
        let yaml = r#"
models:
  - name: Mistral
    key: mistral
    tags_url: https://ollama.com/library/mistral/tags
    output_file: mistral.json
"#;
        // Loading succeeds; resolving the key is what fails, so one bad
        // entry cannot take the rest of the batch down with it.
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        let err = config.models[0].family_key().unwrap_err();
        assert!(err.to_string().contains("mistral"));
    }

    #[test]
    fn test_round_trip() {
        let config = AppConfig {
            output_dir: PathBuf::from("out"),
            registry_base: DEFAULT_REGISTRY_BASE.to_string(),
            models: vec![ModelConfig {
                name: "Qwen 2.5".to_string(),
                key: "qwen".to_string(),
                version: "2.5".to_string(),
                tags_url: "https://ollama.com/library/qwen2.5/tags".to_string(),
                output_file: "qwen2_5.json".to_string(),
                description: Some("General-purpose model line".to_string()),
            }],
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_family_spec() {
        let model = ModelConfig {
            name: "Llama 3.2 Vision".to_string(),
            key: "llama".to_string(),
            version: "3.2-vision".to_string(),
            tags_url: "https://ollama.com/library/llama3.2-vision/tags".to_string(),
            output_file: "llama3_2_vision.json".to_string(),
            description: None,
        };
        let spec = model.family_spec().unwrap();
        assert_eq!(spec.key, FamilyKey::Llama);
        assert_eq!(spec.version, "3.2-vision");
    }
}
