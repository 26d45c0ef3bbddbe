use url::Url;

/// Extracts the host from a URL, lowercased
///
/// Ports are not part of the result. Returns None for URLs without a host
/// or with an empty one.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use doc_harvester::url::extract_host;
///
/// let url = Url::parse("https://Docs.Example.com:8443/guide").unwrap();
/// assert_eq!(extract_host(&url), Some("docs.example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}
