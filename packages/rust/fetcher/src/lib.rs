//! Page fetching and visible-text extraction.
//!
//! This crate provides:
//! - [`PageFetcher`] — HTTP client that fetches pages concurrently
//! - [`extract`] — title and visible-text extraction from HTML

pub mod engine;
pub mod extract;

pub use engine::{PageFetcher, PageText};
pub use extract::{page_title, visible_text};
