//! Tags page fetching and extraction
//!
//! Everything network-facing lives in [`client`]; [`extract`] is pure
//! string processing and is testable offline against captured HTML.

pub mod client;
pub mod extract;

pub use client::TagPageClient;
pub use extract::extract_tags;
