use crate::markup::dom::{element_text, first_match, parse_selector, sanitized_container};
use crate::markup::extract_code_blocks;
use crate::parser::{DocumentationParser, ParsedSection};
use crate::section::{GENERAL_CATEGORY, UNTITLED};
use scraper::Html;

/// Content containers, most specific first
const CONTAINER_SELECTORS: &[&str] = &["main, article", ".content, .main, .documentation"];

/// Navigation or breadcrumb elements the category is read from
const NAVIGATION_SELECTOR: &str = r#"nav, breadcrumb, .breadcrumb, [aria-label="breadcrumb"]"#;

/// Site-agnostic parser working on semantic HTML containers
///
/// - title: first non-empty `h1`, then `<title>`, then `"untitled"`
/// - content: first `main`/`article`, then the first `.content`, `.main` or
///   `.documentation` element; no section without one
/// - category: first word of the first nav/breadcrumb element
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericParser;

impl GenericParser {
    pub fn new() -> Self {
        Self
    }

    fn title(document: &Html) -> String {
        let from_heading = parse_selector("h1").and_then(|selector| {
            document
                .select(&selector)
                .map(element_text)
                .find(|text| !text.is_empty())
        });

        from_heading
            .or_else(|| {
                first_match(document, "title")
                    .map(element_text)
                    .filter(|text| !text.is_empty())
            })
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    fn category(document: &Html) -> String {
        first_match(document, NAVIGATION_SELECTOR)
            .and_then(|nav| element_text(nav).split_whitespace().next().map(str::to_string))
            .unwrap_or_else(|| GENERAL_CATEGORY.to_string())
    }

    /// Sanitized content and code examples of the first matching container
    fn content(document: &mut Html) -> Option<(String, Vec<String>)> {
        CONTAINER_SELECTORS
            .iter()
            .find_map(|css| sanitized_container(document, css))
    }
}

impl DocumentationParser for GenericParser {
    fn name(&self) -> &str {
        "default"
    }

    fn parse_section(&self, markup: &str) -> Option<ParsedSection> {
        let mut document = Html::parse_document(markup);

        let title = Self::title(&document);
        let category = Self::category(&document);
        let (content, code_examples) = Self::content(&mut document)?;

        Some(ParsedSection {
            title,
            content,
            code_examples,
            category,
        })
    }

    /// Code examples of the content container, or of the whole page when
    /// there is no container
    fn extract_code_examples(&self, markup: &str) -> Vec<String> {
        let mut document = Html::parse_document(markup);
        match Self::content(&mut document) {
            Some((_, code_examples)) => code_examples,
            None => extract_code_blocks(markup),
        }
    }

    fn get_category(&self, markup: &str) -> String {
        Self::category(&Html::parse_document(markup))
    }
}
