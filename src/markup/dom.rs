//! DOM helpers shared by the markup utilities and the parsers

use scraper::{ElementRef, Html, Selector};

/// Elements that never count as documentation content
pub const NON_CONTENT_SELECTOR: &str = "script, style";

/// Elements whose text is treated as a code example
pub const CODE_BLOCK_SELECTOR: &str = "code, pre";

/// Parses a CSS selector, logging instead of failing on a bad one
pub fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::error!("Invalid selector '{}': {}", css, e);
            None
        }
    }
}

/// Returns the first element matching `css`, in document order
pub fn first_match<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = parse_selector(css)?;
    document.select(&selector).next()
}

/// Text of an element with each text node trimmed and joined by a single space
///
/// Used for headings and navigation where layout whitespace is noise.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of an element exactly as written, with only outer whitespace trimmed
///
/// Used for code, where inner whitespace is significant.
pub fn verbatim_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Detaches every script/style element from the document
pub fn strip_non_content(document: &mut Html) {
    let Some(selector) = parse_selector(NON_CONTENT_SELECTOR) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Collects the verbatim text of every element under `scope` matching `css`,
/// skipping those with no text
pub fn collect_code(scope: ElementRef<'_>, css: &str) -> Vec<String> {
    let Some(selector) = parse_selector(css) else {
        return Vec::new();
    };

    scope
        .select(&selector)
        .map(verbatim_text)
        .filter(|code| !code.is_empty())
        .collect()
}

/// Sanitizes the element matched first by `container_css` and returns its
/// serialized markup along with the code examples found inside it
///
/// Returns None when no element matches.
pub fn sanitized_container(document: &mut Html, container_css: &str) -> Option<(String, Vec<String>)> {
    let container_id = first_match(document, container_css)?.id();

    strip_non_content(document);

    let container = document.tree.get(container_id).and_then(ElementRef::wrap)?;
    let content = container.html();
    let code_examples = collect_code(container, CODE_BLOCK_SELECTOR);

    Some((content, code_examples))
}
