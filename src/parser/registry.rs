use crate::parser::{DocumentationParser, GenericParser, W3SchoolsParser};
use std::collections::HashMap;
use std::sync::Arc;

/// Site identifier of the generic parser
pub const DEFAULT_SITE: &str = "default";

/// Maps site identifiers to parser implementations
///
/// Configured before a harvest starts and only read afterwards; the harvester
/// resolves its parser once, when it is built.
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn DocumentationParser>>,
}

impl ParserRegistry {
    /// Creates a registry holding only the generic parser
    pub fn new() -> Self {
        let mut registry = Self {
            parsers: HashMap::new(),
        };
        registry.register(DEFAULT_SITE, Arc::new(GenericParser::new()));
        registry
    }

    /// Creates a registry with every built-in parser
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("w3schools", Arc::new(W3SchoolsParser::new()));
        registry
    }

    /// Registers a parser under a site identifier, replacing any previous one
    pub fn register(&mut self, site: &str, parser: Arc<dyn DocumentationParser>) {
        self.parsers.insert(site.to_lowercase(), parser);
    }

    /// Returns the parser for `site`, or the generic one when none is registered
    pub fn resolve(&self, site: &str) -> Arc<dyn DocumentationParser> {
        match self.parsers.get(&site.to_lowercase()) {
            Some(parser) => Arc::clone(parser),
            None => {
                tracing::warn!("No parser registered for site '{}', using default", site);
                self.default_parser()
            }
        }
    }

    /// Returns true if a parser is registered for `site`
    pub fn contains(&self, site: &str) -> bool {
        self.parsers.contains_key(&site.to_lowercase())
    }

    /// Registered site identifiers, sorted
    pub fn sites(&self) -> Vec<String> {
        let mut sites: Vec<String> = self.parsers.keys().cloned().collect();
        sites.sort();
        sites
    }

    fn default_parser(&self) -> Arc<dyn DocumentationParser> {
        match self.parsers.get(DEFAULT_SITE) {
            Some(parser) => Arc::clone(parser),
            None => Arc::new(GenericParser::new()),
        }
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("sites", &self.sites())
            .finish()
    }
}
