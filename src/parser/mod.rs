//! Parser abstraction for turning page markup into a documentation section
//!
//! A parser owns every extraction heuristic: where the main content lives,
//! what counts as a code example, and how the category is found. The crawl
//! engine only sees the [`DocumentationParser`] trait, so a site-specific
//! parser can replace the generic one without touching the crawl loop.

mod generic;
mod registry;
mod w3schools;

pub use generic::GenericParser;
pub use registry::{ParserRegistry, DEFAULT_SITE};
pub use w3schools::W3SchoolsParser;

/// Fields a parser extracts from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSection {
    pub title: String,
    pub content: String,
    pub code_examples: Vec<String>,
    pub category: String,
}

/// Capability contract for documentation parsers
///
/// Implementations must be usable from several workers at once.
pub trait DocumentationParser: Send + Sync {
    /// Identifier the parser is registered under
    fn name(&self) -> &str;

    /// Parses a full page
    ///
    /// Returns None when the page has no recognizable content container.
    fn parse_section(&self, markup: &str) -> Option<ParsedSection>;

    /// Extracts the code examples of a page
    fn extract_code_examples(&self, markup: &str) -> Vec<String>;

    /// Determines the category of a page, falling back to `"general"`
    fn get_category(&self, markup: &str) -> String;
}
