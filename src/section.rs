//! The unit of harvested documentation

use serde::{Deserialize, Serialize};

/// Title used when a page has no heading and no `<title>`
pub const UNTITLED: &str = "untitled";

/// Category used when no navigation context is found
pub const GENERAL_CATEGORY: &str = "general";

/// One extracted section of documentation, tied to a single URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationSection {
    pub title: String,
    /// Sanitized markup of the main content region
    pub content: String,
    pub code_examples: Vec<String>,
    pub category: String,
    pub url: String,
}

impl DocumentationSection {
    /// The metadata half of the section, as written to the JSON artifact
    pub fn record(&self) -> SectionRecord {
        SectionRecord {
            title: self.title.clone(),
            category: self.category.clone(),
            url: self.url.clone(),
            code_examples: self.code_examples.clone(),
        }
    }
}

/// JSON artifact of a section; content is deliberately left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub title: String,
    pub category: String,
    pub url: String,
    pub code_examples: Vec<String>,
}
