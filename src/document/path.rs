//! Dot-path segments.
//!
//! A dot path such as `servers.0.host` is split on `.`; empty segments from
//! leading, trailing or doubled dots are skipped. A segment that parses as an
//! integer carries that index alongside its text so callers can address
//! either a sequence element or a mapping key.

/// One non-empty segment of a dot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The raw segment text.
    pub text: &'a str,
    /// The segment as an integer, if it parses as one.
    pub index: Option<i64>,
}

impl<'a> Segment<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            index: text.parse::<i64>().ok(),
        }
    }
}

/// Iterates over the non-empty segments of `path`.
///
/// # Example
///
/// ```
/// use yamlkit::document::path::segments;
///
/// let parts: Vec<&str> = segments(".a..0.").map(|s| s.text).collect();
/// assert_eq!(parts, vec!["a", "0"]);
/// ```
pub fn segments(path: &str) -> impl Iterator<Item = Segment<'_>> {
    path.split('.')
        .filter(|part| !part.is_empty())
        .map(Segment::new)
}
