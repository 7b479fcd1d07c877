// Per-family naming rules
//
// Family-specific string rules live in one lookup table rather than in
// control flow, so adding a family is a data addition: a template function
// and the rule fields below.

use oc_types::{FamilyKey, Quantization};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Policy for tags that carry no quantization token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultQuant {
    /// The un-suffixed tag is the unquantized reference build
    Base,
    /// The un-suffixed tag is an implicit build of the given quantization
    Assume(Quantization),
}

type TemplateFn = fn(version: &str, size: &str, raw_lower: &str) -> String;
type SizeFn = fn(version: &str, raw_lower: &str) -> Option<String>;

pub struct FamilyRule {
    /// Builds the canonical base name from version, size token, and the
    /// lowercased raw tag (for variant markers)
    pub template: TemplateFn,
    /// Size token used when the tag name carries none
    pub fallback_size: Option<&'static str>,
    /// Overrides the generally extracted size token when it applies
    pub size_rule: Option<SizeFn>,
    pub default_quant: DefaultQuant,
}

pub static FAMILY_RULES: Lazy<HashMap<FamilyKey, FamilyRule>> = Lazy::new(|| {
    HashMap::from([
        (
            FamilyKey::Deepseek,
            FamilyRule {
                template: deepseek_name,
                fallback_size: None,
                size_rule: None,
                // Un-suffixed distill tags are the q4_k_m builds
                default_quant: DefaultQuant::Assume(Quantization::Q4_K_M),
            },
        ),
        (
            FamilyKey::Qwen,
            FamilyRule {
                template: qwen_name,
                fallback_size: None,
                size_rule: None,
                default_quant: DefaultQuant::Base,
            },
        ),
        (
            FamilyKey::Llama,
            FamilyRule {
                template: llama_name,
                fallback_size: None,
                size_rule: Some(llama_vision_size),
                default_quant: DefaultQuant::Base,
            },
        ),
        (
            FamilyKey::Openthinker,
            FamilyRule {
                template: openthinker_name,
                // The registry's default build when the tag has no size
                fallback_size: Some("7b"),
                size_rule: None,
                default_quant: DefaultQuant::Base,
            },
        ),
    ])
});

/// Distill builds are published on top of Qwen or Llama checkpoints; the
/// parameter count determines which.
fn deepseek_name(version: &str, size: &str, _raw_lower: &str) -> String {
    let architecture = if matches!(size, "8b" | "70b") {
        "-llama"
    } else {
        "-qwen"
    };
    format!("deepseek-{}:{}{}-distill", version, size, architecture)
}

fn qwen_name(version: &str, size: &str, raw_lower: &str) -> String {
    let mut name = format!("qwen{}:{}", version, size);
    if raw_lower.contains("instruct") {
        name.push_str("-instruct");
    }
    name
}

fn llama_name(version: &str, size: &str, raw_lower: &str) -> String {
    let mut name = format!("llama{}:{}", version, size);
    if raw_lower.contains("instruct") {
        name.push_str("-instruct");
    }
    name
}

fn openthinker_name(version: &str, size: &str, _raw_lower: &str) -> String {
    format!("openthinker{}:{}", version, size)
}

static INT_SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+b").unwrap());

/// Vision lines publish whole-billion sizes only; "11b-instruct-..." must
/// yield "11b" even when a fractional match would win elsewhere.
fn llama_vision_size(version: &str, raw_lower: &str) -> Option<String> {
    if !version.to_lowercase().contains("vision") {
        return None;
    }
    INT_SIZE_RE
        .find(raw_lower)
        .map(|m| m.as_str().to_string())
}
