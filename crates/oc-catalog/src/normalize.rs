//! Tag name normalization
//!
//! Maps one raw tag name plus a family spec to canonical base/extended
//! model identifiers and a quantization classification. Pure and
//! deterministic; unclassifiable input yields `None` and the caller decides
//! how loudly to skip it.

use crate::family::{DefaultQuant, FAMILY_RULES};
use oc_types::{FamilySpec, NormalizedModel, Quantization};
use once_cell::sync::Lazy;
use regex::Regex;

static SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.?\d*b").unwrap());

/// Normalize a raw tag name
///
/// Returns `None` when no size token can be derived (and the family has no
/// fallback) or when no rule is registered for the family.
pub fn normalize(
    raw_name: &str,
    family: &FamilySpec,
    registry_base: &str,
) -> Option<NormalizedModel> {
    let rule = FAMILY_RULES.get(&family.key)?;
    let raw_lower = raw_name.to_lowercase();

    let mut size = SIZE_RE
        .find(&raw_lower)
        .map(|m| m.as_str().to_string())
        .or_else(|| rule.fallback_size.map(str::to_string));
    if let Some(size_fn) = rule.size_rule {
        if let Some(derived) = size_fn(&family.version, &raw_lower) {
            size = Some(derived);
        }
    }
    let size = size?;

    let base_name = (rule.template)(&family.version, &size, &raw_lower);

    // One pass over the token table; tokens are mutually exclusive
    // substrings, so check order does not affect the outcome.
    let matched = Quantization::ALL
        .iter()
        .copied()
        .filter(|q| *q != Quantization::Base)
        .find(|q| raw_lower.contains(q.token()));

    let model = match matched {
        Some(quant) => quantized(base_name, quant, registry_base),
        None => match rule.default_quant {
            DefaultQuant::Base => {
                let url = library_url(registry_base, &base_name);
                NormalizedModel {
                    base_name: Some(base_name.clone()),
                    extended_name: base_name,
                    base_url: Some(url.clone()),
                    extended_url: url,
                    quantization: Quantization::Base,
                }
            }
            DefaultQuant::Assume(quant) => quantized(base_name, quant, registry_base),
        },
    };

    Some(model)
}

fn quantized(base_name: String, quant: Quantization, registry_base: &str) -> NormalizedModel {
    let extended_name = format!("{}-{}", base_name, quant.token());
    let extended_url = library_url(registry_base, &extended_name);
    NormalizedModel {
        base_name: None,
        extended_name,
        base_url: None,
        extended_url,
        quantization: quant,
    }
}

fn library_url(registry_base: &str, name: &str) -> String {
    format!("{}/{}", registry_base.trim_end_matches('/'), name)
}
