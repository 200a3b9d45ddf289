//! Deserialization of `Key: Value` header blocks.
//!
//! # Design
//! Headers are kept as an ordered list of pairs rather than a hash map so
//! duplicates survive and the order seen by the transport matches the order
//! written by the caller. Names are compared exactly; no case folding happens
//! at parse time.

/// Ordered header list. Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a newline-separated block of `Key: Value` lines.
    ///
    /// Lines without a `:` are dropped. Spaces and tabs around the key and
    /// the value are trimmed; any other whitespace (including `\r`) is kept.
    pub fn parse(block: &str) -> Self {
        let entries = block
            .split('\n')
            .filter_map(|line| {
                let (key, value) = line.split_once(':')?;
                Some((trim_horizontal(key).to_string(), trim_horizontal(value).to_string()))
            })
            .collect();
        Self { entries }
    }

    /// First value stored under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.entries
    }
}

/// Shorthand for [`HeaderMap::parse`].
pub fn parse_headers(block: &str) -> HeaderMap {
    HeaderMap::parse(block)
}

fn trim_horizontal(s: &str) -> &str {
    s.trim_matches(|c: char| c == ' ' || c == '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(map: &HeaderMap) -> Vec<(&str, &str)> {
        map.iter().collect()
    }

    #[test]
    fn parses_and_trims_values() {
        let map = parse_headers("Content-Type: application/json\nX-Foo:bar");
        assert_eq!(
            pairs(&map),
            vec![("Content-Type", "application/json"), ("X-Foo", "bar")]
        );
    }

    #[test]
    fn drops_lines_without_colon() {
        let map = parse_headers("garbage\nA: 1");
        assert_eq!(pairs(&map), vec![("A", "1")]);
    }

    #[test]
    fn splits_on_first_colon_only() {
        let map = parse_headers("Referer: http://example.com:8080/x");
        assert_eq!(map.get("Referer"), Some("http://example.com:8080/x"));
    }

    #[test]
    fn trims_tabs_and_spaces_around_key() {
        let map = parse_headers(" \tX-Key \t:\t value  ");
        assert_eq!(pairs(&map), vec![("X-Key", "value")]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let map = parse_headers("A: 1\nB: 2\nA: 3");
        assert_eq!(pairs(&map), vec![("A", "1"), ("B", "2"), ("A", "3")]);
        assert_eq!(map.get("A"), Some("1"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let map = parse_headers("x-test: 1");
        assert_eq!(map.get("X-Test"), None);
        assert_eq!(map.get("x-test"), Some("1"));
    }

    #[test]
    fn carriage_return_is_not_trimmed() {
        let map = parse_headers("A: 1\r\nB: 2");
        assert_eq!(map.get("A"), Some("1\r"));
        assert_eq!(map.get("B"), Some("2"));
    }

    #[test]
    fn empty_block_and_trailing_newline() {
        assert!(parse_headers("").is_empty());
        assert_eq!(parse_headers("A: 1\n").len(), 1);
    }

    #[test]
    fn empty_value_is_kept() {
        let map = parse_headers("X-Empty:");
        assert_eq!(map.get("X-Empty"), Some(""));
    }
}
