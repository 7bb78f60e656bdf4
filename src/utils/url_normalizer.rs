//! URL protocol normalization.
//!
//! A URL submitted without `http://` or `https://` is stored and looked up
//! with `https://` prepended. Nothing else about the URL is rewritten, so the
//! stored original stays byte-for-byte what the caller sent apart from the
//! default protocol.

/// Protocol prepended to URLs that carry none.
pub const DEFAULT_PROTOCOL: &str = "https://";

const KNOWN_PROTOCOLS: [&str; 2] = ["https://", "http://"];

/// Returns true if `input` starts with `http://` or `https://` (ASCII
/// case-insensitive).
pub fn has_protocol(input: &str) -> bool {
    KNOWN_PROTOCOLS.iter().any(|protocol| {
        input
            .get(..protocol.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(protocol))
    })
}

/// Prepends [`DEFAULT_PROTOCOL`] unless `input` already has a protocol.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(ensure_protocol("example.com"), "https://example.com");
/// assert_eq!(ensure_protocol("http://example.com"), "http://example.com");
/// ```
pub fn ensure_protocol(input: &str) -> String {
    if has_protocol(input) {
        input.to_string()
    } else {
        format!("{DEFAULT_PROTOCOL}{input}")
    }
}

/// Removes a leading `http://` or `https://`, if any.
pub fn strip_protocol(input: &str) -> &str {
    KNOWN_PROTOCOLS
        .iter()
        .find_map(|protocol| {
            input
                .get(..protocol.len())
                .filter(|prefix| prefix.eq_ignore_ascii_case(protocol))
                .map(|_| &input[protocol.len()..])
        })
        .unwrap_or(input)
}
