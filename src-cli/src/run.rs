//! Batch driver
//!
//! One family at a time: fetch the tags page, normalize every tag,
//! aggregate, write the catalog. A failure inside one family's run is
//! logged and never aborts the batch.

use oc_catalog::{aggregate, normalize};
use oc_config::{paths, AppConfig, ModelConfig};
use oc_scrape::TagPageClient;
use oc_types::{AppResult, CatalogEntry, FamilyKey, NormalizedModel};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// What happened to one configured family
#[derive(Debug)]
pub enum FamilyOutcome {
    /// Catalog written
    Written { path: PathBuf, count: usize },
    /// Output file already present and --force not given
    Skipped { path: PathBuf },
    /// Page scraped but nothing classifiable on it
    Empty,
}

/// Batch totals for the final report
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: usize,
    pub empty: usize,
    pub failed: usize,
}

/// Run every configured family, independently
pub fn run_batch(
    config: &AppConfig,
    force: bool,
    only: Option<FamilyKey>,
) -> AppResult<RunSummary> {
    paths::ensure_dir_exists(&config.output_dir)?;
    let client = TagPageClient::new()?;

    let mut summary = RunSummary::default();
    for model_config in &config.models {
        if let Some(key) = only {
            if !model_config.key.eq_ignore_ascii_case(key.as_str()) {
                continue;
            }
        }

        info!("Processing {}...", model_config.name);
        match process_family(&client, config, model_config, force) {
            Ok(FamilyOutcome::Written { path, count }) => {
                println!(
                    "{}: {} unique models -> {}",
                    model_config.name,
                    count,
                    path.display()
                );
                summary.written += 1;
            }
            Ok(FamilyOutcome::Skipped { path }) => {
                info!(
                    "{} already has a catalog at {}, skipping",
                    model_config.name,
                    path.display()
                );
                summary.skipped += 1;
            }
            Ok(FamilyOutcome::Empty) => {
                warn!("No usable models found for {}", model_config.name);
                summary.empty += 1;
            }
            Err(e) => {
                error!("Processing {} failed: {}", model_config.name, e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn process_family(
    client: &TagPageClient,
    config: &AppConfig,
    model_config: &ModelConfig,
    force: bool,
) -> AppResult<FamilyOutcome> {
    let output_path = config.output_dir.join(&model_config.output_file);
    if output_path.exists() && !force {
        return Ok(FamilyOutcome::Skipped { path: output_path });
    }

    // Resolve the family key before touching the network; a misspelled key
    // fails this run only.
    let family = model_config.family_spec()?;

    let tags = client.fetch_tags(&model_config.tags_url)?;
    let mut records: Vec<(NormalizedModel, String)> = Vec::with_capacity(tags.len());
    for tag in tags {
        match normalize(&tag.name, &family, &config.registry_base) {
            Some(model) => {
                if let Some(digest) = &tag.digest {
                    debug!("{} -> {} ({})", tag.name, model.extended_name, digest);
                }
                records.push((model, tag.file_size));
            }
            None => warn!("Cannot classify tag {:?}, skipping", tag.name),
        }
    }

    let catalog = aggregate(&records);
    if catalog.is_empty() {
        return Ok(FamilyOutcome::Empty);
    }

    let count = catalog.len();
    write_catalog(&output_path, &catalog)?;
    info!("Wrote {} entries to {}", count, output_path.display());

    Ok(FamilyOutcome::Written {
        path: output_path,
        count,
    })
}

/// Serialize the catalog and write it in one shot
pub fn write_catalog(path: &Path, catalog: &[CatalogEntry]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(catalog)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oc_types::Quantization;

    fn test_config(output_dir: &Path) -> AppConfig {
        AppConfig {
            output_dir: output_dir.to_path_buf(),
            models: vec![ModelConfig {
                name: "Llama 3".to_string(),
                key: "llama".to_string(),
                version: "3".to_string(),
                tags_url: "https://ollama.com/library/llama3/tags".to_string(),
                output_file: "llama3.json".to_string(),
                description: None,
            }],
            ..AppConfig::default()
        }
    }

    fn sample_entry() -> CatalogEntry {
        CatalogEntry {
            model: "llama3:8b".to_string(),
            size_label: "8B".to_string(),
            file_size: "4.7 GB".to_string(),
            quantization: Quantization::Base,
            quantization_info: Quantization::Base.info().to_string(),
            url: "https://ollama.com/library/llama3:8b".to_string(),
        }
    }

    #[test]
    fn test_write_catalog_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llama3.json");

        write_catalog(&path, &[sample_entry()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: Vec<CatalogEntry> = serde_json::from_str(&content).unwrap();
        assert_eq!(back, vec![sample_entry()]);
    }

    #[test]
    fn test_existing_output_is_skipped_before_any_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let output_path = dir.path().join("llama3.json");
        std::fs::write(&output_path, "[]").unwrap();

        // The configured tags_url is never contacted: the skip check fires
        // first, so this runs green without network access.
        let client = TagPageClient::new().unwrap();
        let outcome = process_family(&client, &config, &config.models[0], false).unwrap();

        assert!(matches!(outcome, FamilyOutcome::Skipped { .. }));
        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "[]");
    }

    #[test]
    fn test_run_batch_counts_skips() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::write(dir.path().join("llama3.json"), "[]").unwrap();

        let summary = run_batch(&config, false, None).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                skipped: 1,
                ..RunSummary::default()
            }
        );
    }

    #[test]
    fn test_run_batch_only_filter() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::write(dir.path().join("llama3.json"), "[]").unwrap();

        // --only qwen leaves the single llama entry untouched
        let summary = run_batch(&config, false, Some(FamilyKey::Qwen)).unwrap();
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn test_unknown_family_fails_only_its_own_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.models.push(ModelConfig {
            name: "Mistral".to_string(),
            key: "mistral".to_string(),
            version: String::new(),
            tags_url: "https://ollama.com/library/mistral/tags".to_string(),
            output_file: "mistral.json".to_string(),
            description: None,
        });
        // Pre-seed the llama output so its run short-circuits to a skip
        std::fs::write(dir.path().join("llama3.json"), "[]").unwrap();

        let summary = run_batch(&config, false, None).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                skipped: 1,
                failed: 1,
                ..RunSummary::default()
            }
        );
    }
}
