//! Stateless utilities over raw page markup
//!
//! Every function here parses its input independently and shares no state, so
//! they can be called from any number of workers at once.

pub mod dom;

use dom::{collect_code, first_match, parse_selector, strip_non_content, CODE_BLOCK_SELECTOR};
use scraper::Html;

/// Removes script/style elements and returns the serialized document
///
/// # Example
///
/// ```
/// use doc_harvester::markup::sanitize;
///
/// let clean = sanitize("<p>text</p><script>alert(1)</script>");
/// assert!(clean.contains("<p>text</p>"));
/// assert!(!clean.contains("script"));
/// ```
pub fn sanitize(markup: &str) -> String {
    let mut document = Html::parse_document(markup);
    strip_non_content(&mut document);
    document.html()
}

/// Extracts every hyperlink target from the markup, in document order
///
/// Fragment-only (`#...`) and `javascript:` targets are dropped, as are empty
/// ones. Duplicates are kept and nothing is resolved or scope-checked here.
///
/// # Example
///
/// ```
/// use doc_harvester::markup::extract_links;
///
/// let links = extract_links(r##"<a href="#top">Top</a><a href="/docs/x">X</a>"##);
/// assert_eq!(links, vec!["/docs/x"]);
/// ```
pub fn extract_links(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    let Some(selector) = parse_selector("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| is_followable(href))
        .map(str::to_string)
        .collect()
}

fn is_followable(href: &str) -> bool {
    let trimmed = href.trim();
    !trimmed.is_empty()
        && !trimmed.starts_with('#')
        && !trimmed.to_ascii_lowercase().starts_with("javascript:")
}

/// Extracts the text of every code/pre element with non-empty text, in document order
///
/// A `<pre><code>` pair yields both the outer and the inner text.
pub fn extract_code_blocks(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    collect_code(document.root_element(), CODE_BLOCK_SELECTOR)
}

/// Returns the content of `<meta name="description">`, if present
pub fn extract_meta_description(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);
    first_match(&document, r#"meta[name="description"]"#)
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
}

/// Returns the readable text of the markup, script/style excluded
pub fn extract_text(markup: &str) -> String {
    let mut document = Html::parse_document(markup);
    strip_non_content(&mut document);
    dom::element_text(document.root_element())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_scripts_and_styles() {
        let markup = r#"<html><head><style>body { color: red }</style></head>
            <body><main><p>Docs</p><script>track()</script></main></body></html>"#;

        let clean = sanitize(markup);
        assert!(clean.contains("<p>Docs</p>"));
        assert!(!clean.contains("track()"));
        assert!(!clean.contains("color: red"));
    }

    #[test]
    fn test_extract_links_filters_fragment_and_script() {
        let markup = r##"<body>
            <a href="#top">Top</a>
            <a href="javascript:void(0)">Menu</a>
            <a href="/docs/x">X</a>
            <a href="https://other.com/y">Y</a>
        </body>"##;

        assert_eq!(
            extract_links(markup),
            vec!["/docs/x", "https://other.com/y"]
        );
    }

    #[test]
    fn test_extract_links_keeps_duplicates_and_order() {
        let markup = r#"<a href="/b">B</a><a href="/a">A</a><a href="/b">B again</a>"#;
        assert_eq!(extract_links(markup), vec!["/b", "/a", "/b"]);
    }

    #[test]
    fn test_extract_links_skips_empty_and_uppercase_javascript() {
        let markup = r#"<a href="">Empty</a><a href="JavaScript:run()">Run</a><a>No href</a><a href="x.html">X</a>"#;
        assert_eq!(extract_links(markup), vec!["x.html"]);
    }

    #[test]
    fn test_code_block_order_skips_empty() {
        let markup = r#"<body>
            <pre>let a = 1;</pre>
            <pre>   </pre>
            <code>let c = 3;</code>
        </body>"#;

        assert_eq!(extract_code_blocks(markup), vec!["let a = 1;", "let c = 3;"]);
    }

    #[test]
    fn test_nested_pre_code_yields_both() {
        let markup = "<pre><code>x = 1</code></pre>";
        assert_eq!(extract_code_blocks(markup), vec!["x = 1", "x = 1"]);
    }

    #[test]
    fn test_no_code_blocks() {
        assert!(extract_code_blocks("<p>prose only</p>").is_empty());
    }

    #[test]
    fn test_meta_description() {
        let markup = r#"<head><meta name="description" content=" Loop reference "></head>"#;
        assert_eq!(
            extract_meta_description(markup),
            Some("Loop reference".to_string())
        );
        assert_eq!(extract_meta_description("<head></head>"), None);
    }

    #[test]
    fn test_extract_text() {
        let markup = "<body><h1>Title</h1><script>ignored()</script><p>Body\n text</p></body>";
        assert_eq!(extract_text(markup), "Title Body\n text");
    }
}
