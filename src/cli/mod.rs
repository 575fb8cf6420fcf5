//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod augment;
mod query;

pub use augment::run_augment;
pub use query::{run_query, QueryOutput};

// Re-export config types used by handlers
pub use crate::config::{AppConfig, FuzzyMatchConfig};
