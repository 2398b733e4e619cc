//! Knowledge-graph generation and pipeline orchestration for profilegraph.
//!
//! This crate ties together page fetching, template selection, the completion
//! endpoint, and output repair into end-to-end workflows
//! (e.g., [`pipeline::build_knowledge_graph`]).

pub mod completion;
pub mod generator;
pub mod pipeline;
pub mod prompt;
pub mod reconcile;
pub mod sources;
pub mod templates;

pub use generator::Generator;
pub use reconcile::reconcile;
pub use templates::{RoleCategory, select_template};
