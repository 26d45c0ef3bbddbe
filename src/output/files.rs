//! JSON/HTML file pairs for harvested sections
//!
//! Each section becomes `<stem>.json` (title, category, url, code examples)
//! and `<stem>.html` (the sanitized content) under the output directory.

use crate::output::traits::{OutputError, OutputResult, SavedSection, SectionSink};
use crate::section::{DocumentationSection, SectionRecord, UNTITLED};
use std::fs;
use std::path::{Path, PathBuf};

/// Derives a filesystem-safe file stem from a section title
///
/// Keeps alphanumerics, spaces, `-` and `_`; trims; turns spaces into `-`;
/// lowercases. A title with nothing left maps to `untitled`.
///
/// # Examples
///
/// ```
/// use doc_harvester::output::safe_file_stem;
///
/// assert_eq!(safe_file_stem("C++ Basics: Part 1!"), "c-basics-part-1");
/// assert_eq!(safe_file_stem("snake_case Names"), "snake_case-names");
/// ```
pub fn safe_file_stem(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    let stem = kept.trim().replace(' ', "-").to_lowercase();
    if stem.is_empty() {
        UNTITLED.to_string()
    } else {
        stem
    }
}

/// Writes sections as file pairs under a root directory
///
/// Two sections with the same stem overwrite each other; the last one wins.
#[derive(Debug, Clone)]
pub struct FileSectionWriter {
    root: PathBuf,
}

impl FileSectionWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write(path: &Path, contents: &str) -> OutputResult<()> {
        fs::write(path, contents).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SectionSink for FileSectionWriter {
    fn save(&self, section: &DocumentationSection) -> OutputResult<SavedSection> {
        fs::create_dir_all(&self.root)?;

        let stem = safe_file_stem(&section.title);
        let json_path = self.root.join(format!("{}.json", stem));
        let html_path = self.root.join(format!("{}.html", stem));

        let json = serde_json::to_string_pretty(&section.record())?;
        Self::write(&json_path, &json)?;
        Self::write(&html_path, &section.content)?;

        tracing::debug!("Saved '{}' to {}", section.title, json_path.display());

        Ok(SavedSection {
            json_path,
            html_path,
        })
    }
}

/// Reads a section's JSON artifact back
pub fn load_section_record(path: &Path) -> OutputResult<SectionRecord> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
