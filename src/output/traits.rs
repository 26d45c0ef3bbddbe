//! Output sink trait and error types
//!
//! This module defines the interface the harvester persists sections through,
//! and the errors a sink can report.

use crate::section::DocumentationSection;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a section
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize section: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Where a section's artifacts ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSection {
    pub json_path: PathBuf,
    pub html_path: PathBuf,
}

/// Trait for section sinks
///
/// Sinks are shared between harvest workers, so implementations must be
/// thread-safe.
pub trait SectionSink: Send + Sync {
    /// Persists one section
    fn save(&self, section: &DocumentationSection) -> OutputResult<SavedSection>;
}
