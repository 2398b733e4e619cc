//! Shared types, error model, and configuration for profilegraph.
//!
//! This crate is the foundation depended on by all other profilegraph crates.
//! It provides:
//! - [`ProfileGraphError`] — the unified error type
//! - Domain types ([`ProfileInput`], [`KnowledgeGraph`], [`TieredList`], [`AttributeRanges`])
//! - Configuration ([`AppConfig`], [`CompletionConfig`], [`FetchConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CompletionConfig, CompletionSection, FetchConfig, FetchSection,
    PLACEHOLDER_API_KEY, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{ProfileGraphError, Result};
pub use types::{
    Attribute, AttributeLevel, AttributeRanges, KnowledgeGraph, ProfileInput, Tier, TieredList,
};
