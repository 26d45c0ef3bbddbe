//! URL handling module for Doc-Harvester
//!
//! This module provides host extraction, link resolution and the scope policy
//! that decides which discovered links the harvester may follow.

mod domain;
mod scope;

// Re-export main functions
pub use domain::extract_host;
pub use scope::{resolve_link, Scope};
