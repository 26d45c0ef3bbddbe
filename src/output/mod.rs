//! Output module for persisting harvested sections and reporting on runs
//!
//! This module handles:
//! - Writing sections as JSON/HTML file pairs
//! - The sink trait the harvester persists through
//! - Per-run statistics

mod files;
pub mod stats;
mod traits;

pub use files::{load_section_record, safe_file_stem, FileSectionWriter};
pub use stats::{print_report, HarvestCounters, HarvestReport};
pub use traits::{OutputError, OutputResult, SavedSection, SectionSink};
