use crate::markup::dom::{collect_code, element_text, first_match, parse_selector, sanitized_container};
use crate::parser::{DocumentationParser, ParsedSection};
use crate::section::{GENERAL_CATEGORY, UNTITLED};
use scraper::Html;

/// Content containers used by W3Schools tutorial pages, most specific first
const CONTAINER_SELECTORS: &[&str] = &["div#main", "div.w3-main"];

/// W3Schools example and code boxes
const CODE_SELECTOR: &str =
    "div.w3-example, div.w3-code, div.notranslate, pre.w3-example, pre.w3-code, pre.notranslate";

/// Active entry of the tutorial side navigation
const ACTIVE_NAV_SELECTOR: &str = "nav.w3-sidenav a.active";

/// Page titles look like "Python For Loops - W3Schools"
const TITLE_DELIMITER: &str = " - ";

/// Parser for w3schools.com tutorial pages
#[derive(Debug, Default, Clone, Copy)]
pub struct W3SchoolsParser;

impl W3SchoolsParser {
    pub fn new() -> Self {
        Self
    }

    fn title(document: &Html) -> String {
        parse_selector("h1, h2")
            .and_then(|selector| {
                document
                    .select(&selector)
                    .map(element_text)
                    .find(|text| !text.is_empty())
            })
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    fn category(document: &Html) -> String {
        let from_nav = first_match(document, ACTIVE_NAV_SELECTOR)
            .map(element_text)
            .filter(|text| !text.is_empty());

        from_nav
            .or_else(|| {
                let title = first_match(document, "title").map(element_text)?;
                let (head, _) = title.split_once(TITLE_DELIMITER)?;
                Some(head.trim().to_string()).filter(|head| !head.is_empty())
            })
            .unwrap_or_else(|| GENERAL_CATEGORY.to_string())
    }

    fn code_examples(document: &Html) -> Vec<String> {
        collect_code(document.root_element(), CODE_SELECTOR)
    }
}

impl DocumentationParser for W3SchoolsParser {
    fn name(&self) -> &str {
        "w3schools"
    }

    fn parse_section(&self, markup: &str) -> Option<ParsedSection> {
        let mut document = Html::parse_document(markup);

        let title = Self::title(&document);
        let category = Self::category(&document);
        let code_examples = Self::code_examples(&document);
        let (content, _) = CONTAINER_SELECTORS
            .iter()
            .find_map(|css| sanitized_container(&mut document, css))?;

        Some(ParsedSection {
            title,
            content,
            code_examples,
            category,
        })
    }

    fn extract_code_examples(&self, markup: &str) -> Vec<String> {
        Self::code_examples(&Html::parse_document(markup))
    }

    fn get_category(&self, markup: &str) -> String {
        Self::category(&Html::parse_document(markup))
    }
}
