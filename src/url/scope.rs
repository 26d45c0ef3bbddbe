use crate::url::extract_host;
use crate::{UrlError, UrlResult};
use std::collections::HashSet;
use url::Url;

/// The URL-host policy deciding which discovered links may be fetched
///
/// A URL is in scope when it uses http(s) and its host is a substring of the
/// base URL's host. The substring test is kept as-is: it admits parent domains
/// and any host that happens to be contained in the base host.
#[derive(Debug, Clone)]
pub struct Scope {
    base_url: Url,
    base_host: String,
    skip_patterns: Vec<String>,
}

impl Scope {
    /// Builds a scope anchored at `base_url`
    ///
    /// # Arguments
    ///
    /// * `base_url` - The scope anchor
    /// * `skip_patterns` - URL substrings (case-insensitive) that are never processed
    ///
    /// # Returns
    ///
    /// * `Ok(Scope)` - The base URL is an http(s) URL with a host
    /// * `Err(UrlError)` - The base URL is malformed
    pub fn new<S: AsRef<str>>(base_url: &str, skip_patterns: &[S]) -> UrlResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| UrlError::Parse(e.to_string()))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(parsed.scheme().to_string()));
        }

        let base_host = extract_host(&parsed).ok_or(UrlError::MissingHost)?;

        Ok(Self {
            base_url: parsed,
            base_host,
            skip_patterns: skip_patterns
                .iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        })
    }

    /// The scope anchor
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The lowercased host of the scope anchor
    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    /// Returns true if the URL is http(s), has a host, and that host is a
    /// substring of the base host
    pub fn is_valid_url(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return false;
        }

        match extract_host(&parsed) {
            Some(host) => self.base_host.contains(&host),
            None => false,
        }
    }

    /// Returns true if the URL contains one of the skip patterns (case-insensitive)
    pub fn is_skipped(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        self.skip_patterns.iter().any(|p| lower.contains(p.as_str()))
    }

    /// Returns true if the URL is valid, not yet visited and not skipped
    pub fn should_process(&self, url: &str, visited: &HashSet<String>) -> bool {
        self.is_valid_url(url) && !visited.contains(url) && !self.is_skipped(url)
    }
}

/// Resolves a link target against the page it was found on
///
/// Returns None when the href cannot be joined onto the page URL.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_harvester::url::resolve_link;
///
/// let page = Url::parse("https://docs.example.com/guide/intro").unwrap();
/// assert_eq!(
///     resolve_link("setup", &page),
///     Some("https://docs.example.com/guide/setup".to_string())
/// );
/// ```
pub fn resolve_link(href: &str, page_url: &Url) -> Option<String> {
    page_url.join(href.trim()).ok().map(|u| u.to_string())
}
