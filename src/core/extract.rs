use regex::Regex;

/// Scans free message text for link-like substrings.
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    pub fn new() -> Self {
        // Greedy up to the next whitespace; downstream parsing rejects junk.
        Self {
            pattern: Regex::new(r"https?://\S+").expect("link pattern is valid"),
        }
    }

    /// Yields candidate link strings lazily, preserving input order. No
    /// validation happens here beyond the scheme prefix.
    pub fn extract<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern.find_iter(text).map(|m| m.as_str())
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}
