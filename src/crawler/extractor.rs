//! Turns fetched markup into a [`DocumentationSection`]

use crate::parser::{DocumentationParser, GenericParser};
use crate::section::DocumentationSection;
use std::sync::Arc;

/// Binds a parser to the URL a page was fetched from
#[derive(Clone)]
pub struct SectionExtractor {
    parser: Arc<dyn DocumentationParser>,
}

impl SectionExtractor {
    pub fn new(parser: Arc<dyn DocumentationParser>) -> Self {
        Self { parser }
    }

    pub fn parser_name(&self) -> &str {
        self.parser.name()
    }

    /// Extracts a section from a page
    ///
    /// Returns None when the parser finds no content container; the page
    /// should then be recorded as skipped rather than failed.
    pub fn extract_section(&self, markup: &str, url: &str) -> Option<DocumentationSection> {
        let parsed = self.parser.parse_section(markup)?;

        Some(DocumentationSection {
            title: parsed.title,
            content: parsed.content,
            code_examples: parsed.code_examples,
            category: parsed.category,
            url: url.to_string(),
        })
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new(Arc::new(GenericParser::new()))
    }
}

impl std::fmt::Debug for SectionExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionExtractor")
            .field("parser", &self.parser.name())
            .finish()
    }
}

/// Extracts a section with the generic parser
///
/// # Examples
///
/// ```
/// use doc_harvester::crawler::extract_section;
///
/// let page = "<html><body><h1>Intro</h1><main><p>Hello</p></main></body></html>";
/// let section = extract_section(page, "https://docs.example.com/intro").unwrap();
/// assert_eq!(section.title, "Intro");
/// assert_eq!(section.category, "general");
/// ```
pub fn extract_section(markup: &str, url: &str) -> Option<DocumentationSection> {
    SectionExtractor::default().extract_section(markup, url)
}
