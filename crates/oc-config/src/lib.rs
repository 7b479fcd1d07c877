//! Configuration management module
//!
//! Handles loading and saving the batch configuration: which model
//! families to scrape, where their tags pages live, and where the cleaned
//! catalogs are written.

pub mod paths;
mod storage;
pub mod types;

pub use storage::{load_config, save_config};
pub use types::*;
