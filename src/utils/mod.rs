use regex::Regex;

/// Collapses every whitespace run to a single space and trims the ends.
/// Page titles routinely arrive with indentation and embedded newlines.
pub fn collapse_whitespace(text: &str) -> String {
    let pattern = Regex::new(r"\s+").expect("whitespace pattern is valid");
    pattern.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("\n  Hello   World\n"), "Hello World");
        assert_eq!(collapse_whitespace("already clean"), "already clean");
        assert_eq!(collapse_whitespace("tabs\tand\nnewlines"), "tabs and newlines");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
