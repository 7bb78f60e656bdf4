//! Vocabulary sanitization for the dictionary pool.
//!
//! Candidate tokens must be plain ASCII alphanumerics and must not collide
//! with a path the service itself serves.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Words that would shadow a route or an administrative page.
pub const RESERVED_WORDS: &[&str] = &[
    "login",
    "admin",
    "logout",
    "api",
    "index",
    "index.html",
    "change_pass",
];

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("token regex is valid"));

/// Returns true if `word` may be used as a token.
pub fn is_valid_token(word: &str) -> bool {
    !word.is_empty() && !RESERVED_WORDS.contains(&word) && TOKEN_REGEX.is_match(word)
}

/// Trims, filters and deduplicates candidate words, returning them sorted.
///
/// Empty entries, reserved words and anything outside `[A-Za-z0-9]` are
/// dropped silently.
pub fn sanitize<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| word.as_ref().trim().to_string())
        .filter(|word| is_valid_token(word))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Parses a newline-separated word list and sanitizes it.
pub fn parse_word_list(contents: &str) -> Vec<String> {
    sanitize(contents.lines())
}
