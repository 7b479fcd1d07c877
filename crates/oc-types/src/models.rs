// Catalog domain types
//
// These types flow through the whole pipeline: the scraper produces RawTag,
// the normalizer turns it into NormalizedModel, the aggregator emits
// CatalogEntry values which are serialized as the output artifact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// One tag row as scraped from a library tags page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    /// Tag name exactly as displayed, e.g. "7b-instruct-q4_K_M"
    pub name: String,
    /// Content digest shown next to the tag, when present
    pub digest: Option<String>,
    /// File size text exactly as displayed, e.g. "4.1 GB"
    pub file_size: String,
    /// Extra attributes from the detail row (architecture, context, ...)
    pub extra: BTreeMap<String, String>,
}

impl RawTag {
    pub fn new(name: impl Into<String>, file_size: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            digest: None,
            file_size: file_size.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// Model families with a known naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKey {
    Deepseek,
    Qwen,
    Llama,
    Openthinker,
}

impl FamilyKey {
    pub const ALL: [FamilyKey; 4] = [
        FamilyKey::Deepseek,
        FamilyKey::Qwen,
        FamilyKey::Llama,
        FamilyKey::Openthinker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyKey::Deepseek => "deepseek",
            FamilyKey::Qwen => "qwen",
            FamilyKey::Llama => "llama",
            FamilyKey::Openthinker => "openthinker",
        }
    }
}

impl fmt::Display for FamilyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FamilyKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deepseek" => Ok(FamilyKey::Deepseek),
            "qwen" => Ok(FamilyKey::Qwen),
            "llama" => Ok(FamilyKey::Llama),
            "openthinker" => Ok(FamilyKey::Openthinker),
            other => Err(AppError::Config(format!("Unknown model family: {}", other))),
        }
    }
}

/// A family plus the version string used in canonical names
///
/// The version is free text supplied by configuration ("r1", "2.5", "3.2"),
/// never derived from scraped data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySpec {
    pub key: FamilyKey,
    pub version: String,
}

impl FamilySpec {
    pub fn new(key: FamilyKey, version: impl Into<String>) -> Self {
        Self {
            key,
            version: version.into(),
        }
    }
}

/// Quantization variants of a published model build
///
/// Variant order is the catalog sort order: unquantized first, then
/// descending precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantization {
    #[serde(rename = "BASE")]
    Base,
    #[serde(rename = "FP16")]
    Fp16,
    Q8_0,
    Q6_K,
    Q5_K_M,
    Q5_1,
    Q5_0,
    Q4_K_M,
    Q4_K_S,
    Q4_0,
    Q3_K_M,
    Q3_K_S,
    Q2_K,
}

impl Quantization {
    pub const ALL: [Quantization; 13] = [
        Quantization::Base,
        Quantization::Fp16,
        Quantization::Q8_0,
        Quantization::Q6_K,
        Quantization::Q5_K_M,
        Quantization::Q5_1,
        Quantization::Q5_0,
        Quantization::Q4_K_M,
        Quantization::Q4_K_S,
        Quantization::Q4_0,
        Quantization::Q3_K_M,
        Quantization::Q3_K_S,
        Quantization::Q2_K,
    ];

    /// Lowercase name suffix, empty for the unquantized build
    pub fn token(&self) -> &'static str {
        match self {
            Quantization::Base => "",
            Quantization::Fp16 => "fp16",
            Quantization::Q8_0 => "q8_0",
            Quantization::Q6_K => "q6_k",
            Quantization::Q5_K_M => "q5_k_m",
            Quantization::Q5_1 => "q5_1",
            Quantization::Q5_0 => "q5_0",
            Quantization::Q4_K_M => "q4_k_m",
            Quantization::Q4_K_S => "q4_k_s",
            Quantization::Q4_0 => "q4_0",
            Quantization::Q3_K_M => "q3_k_m",
            Quantization::Q3_K_S => "q3_k_s",
            Quantization::Q2_K => "q2_k",
        }
    }

    /// Uppercase registry label, as written into the output artifact
    pub fn label(&self) -> &'static str {
        match self {
            Quantization::Base => "BASE",
            Quantization::Fp16 => "FP16",
            Quantization::Q8_0 => "Q8_0",
            Quantization::Q6_K => "Q6_K",
            Quantization::Q5_K_M => "Q5_K_M",
            Quantization::Q5_1 => "Q5_1",
            Quantization::Q5_0 => "Q5_0",
            Quantization::Q4_K_M => "Q4_K_M",
            Quantization::Q4_K_S => "Q4_K_S",
            Quantization::Q4_0 => "Q4_0",
            Quantization::Q3_K_M => "Q3_K_M",
            Quantization::Q3_K_S => "Q3_K_S",
            Quantization::Q2_K => "Q2_K",
        }
    }

    /// Catalog sort rank. A hypothetical unknown variant would rank 999,
    /// but the enum is closed so the table is total.
    pub fn rank(&self) -> u32 {
        match self {
            Quantization::Base => 0,
            Quantization::Fp16 => 1,
            Quantization::Q8_0 => 2,
            Quantization::Q6_K => 3,
            Quantization::Q5_K_M => 4,
            Quantization::Q5_1 => 5,
            Quantization::Q5_0 => 6,
            Quantization::Q4_K_M => 7,
            Quantization::Q4_K_S => 8,
            Quantization::Q4_0 => 9,
            Quantization::Q3_K_M => 10,
            Quantization::Q3_K_S => 11,
            Quantization::Q2_K => 12,
        }
    }

    /// Human-readable description for the quantization_info output field
    pub fn info(&self) -> &'static str {
        match self {
            Quantization::Base => "Original unquantized weights",
            Quantization::Fp16 => "16-bit half-precision floating point",
            Quantization::Q8_0 => "8-bit quantization",
            Quantization::Q6_K => "6-bit K-quant",
            Quantization::Q5_K_M => "5-bit K-quant, medium",
            Quantization::Q5_1 => "5-bit quantization (legacy, higher accuracy)",
            Quantization::Q5_0 => "5-bit quantization (legacy)",
            Quantization::Q4_K_M => "4-bit K-quant, medium",
            Quantization::Q4_K_S => "4-bit K-quant, small",
            Quantization::Q4_0 => "4-bit quantization (legacy)",
            Quantization::Q3_K_M => "3-bit K-quant, medium",
            Quantization::Q3_K_S => "3-bit K-quant, small",
            Quantization::Q2_K => "2-bit K-quant",
        }
    }
}

impl fmt::Display for Quantization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical identifiers derived from one raw tag name
///
/// `base_name` is present only for the unquantized build; quantized tags
/// expect their unquantized sibling to show up as its own tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedModel {
    pub base_name: Option<String>,
    pub extended_name: String,
    pub base_url: Option<String>,
    pub extended_url: String,
    pub quantization: Quantization,
}

/// One line of the output artifact
///
/// Declaration order is the serialized field order; the downstream VRAM
/// calculator pins this schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub model: String,
    pub size_label: String,
    pub file_size: String,
    pub quantization: Quantization,
    pub quantization_info: String,
    pub url: String,
}

impl CatalogEntry {
    /// Dedupe key: one catalog line per (model, quantization) pair
    pub fn dedupe_key(&self) -> String {
        format!("{}-{}", self.model, self.quantization.label())
    }

    /// Numeric parameter count parsed back out of the size label
    pub fn size_value(&self) -> Option<f64> {
        self.size_label.strip_suffix('B')?.parse().ok()
    }
}
