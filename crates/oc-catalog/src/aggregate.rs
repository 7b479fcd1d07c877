//! Catalog aggregation
//!
//! Consumes normalized records paired with their scraped file-size text,
//! deduplicates on (model, quantization), and orders the result: parameter
//! count ascending, then quantization rank, then name length as a
//! determinism tie-break.

use oc_types::{CatalogEntry, NormalizedModel, Quantization};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::warn;

static SIZE_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+\.?\d*)b").unwrap());

/// Build the final catalog from normalized records
///
/// First-seen wins on the dedupe key; input order therefore decides which
/// duplicate survives. A record whose extended name carries no size token
/// cannot be ranked and is dropped with a warning.
pub fn aggregate(records: &[(NormalizedModel, String)]) -> Vec<CatalogEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries: Vec<CatalogEntry> = Vec::new();

    for (model, file_size) in records {
        let Some(size_label) = derive_size_label(&model.extended_name) else {
            warn!(
                "No size token in normalized name {:?}, dropping record",
                model.extended_name
            );
            continue;
        };

        if let (Some(base_name), Some(base_url)) = (&model.base_name, &model.base_url) {
            push_unique(
                &mut seen,
                &mut entries,
                entry(base_name, &size_label, file_size, model.quantization, base_url),
            );
        }

        push_unique(
            &mut seen,
            &mut entries,
            entry(
                &model.extended_name,
                &size_label,
                file_size,
                model.quantization,
                &model.extended_url,
            ),
        );
    }

    entries.sort_by(|a, b| {
        let a_size = a.size_value().unwrap_or(f64::MAX);
        let b_size = b.size_value().unwrap_or(f64::MAX);
        a_size
            .total_cmp(&b_size)
            .then_with(|| a.quantization.rank().cmp(&b.quantization.rank()))
            .then_with(|| a.model.len().cmp(&b.model.len()))
    });

    entries
}

fn entry(
    model: &str,
    size_label: &str,
    file_size: &str,
    quantization: Quantization,
    url: &str,
) -> CatalogEntry {
    CatalogEntry {
        model: model.to_string(),
        size_label: size_label.to_string(),
        file_size: file_size.to_string(),
        quantization,
        quantization_info: quantization.info().to_string(),
        url: url.to_string(),
    }
}

fn push_unique(seen: &mut HashSet<String>, entries: &mut Vec<CatalogEntry>, entry: CatalogEntry) {
    if seen.insert(entry.dedupe_key()) {
        entries.push(entry);
    }
}

/// "deepseek-r1:1.5b-qwen-distill" → "1.5B"
fn derive_size_label(extended_name: &str) -> Option<String> {
    let lower = extended_name.to_lowercase();
    let captures = SIZE_LABEL_RE.captures(&lower)?;
    Some(format!("{}B", &captures[1]))
}
