//! Name normalization and catalog aggregation
//!
//! The core of the pipeline: [`normalize`] maps one raw tag name to its
//! canonical model identifiers, [`aggregate`] turns the normalized stream
//! into the deduplicated, deterministically ordered catalog. Both are pure;
//! all I/O lives in the scrape and CLI crates.

pub mod aggregate;
pub mod family;
pub mod normalize;

pub use aggregate::aggregate;
pub use family::{DefaultQuant, FamilyRule, FAMILY_RULES};
pub use normalize::normalize;
