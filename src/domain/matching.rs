//! Ordered matching of free-form deletion input.
//!
//! An administrator may paste any of: a bare token, a short URL with or
//! without protocol, or the original URL with or without protocol. The input
//! is cleaned once, then each strategy proposes at most one [`Lookup`]; the
//! caller tries them in order and stops at the first mapping found.

use crate::domain::lookup::Lookup;
use crate::utils::url_normalizer::{ensure_protocol, has_protocol, strip_protocol};

/// A single matching strategy over cleaned input.
pub type Strategy = fn(&str) -> Option<Lookup>;

/// Original URL with the default protocol filled in.
pub fn original_with_default_protocol(input: &str) -> Option<Lookup> {
    (!has_protocol(input)).then(|| Lookup::original(ensure_protocol(input)))
}

/// Original URL exactly as given.
pub fn original_as_given(input: &str) -> Option<Lookup> {
    Some(Lookup::original(input))
}

/// Bare token.
pub fn token_as_given(input: &str) -> Option<Lookup> {
    Some(Lookup::token(input))
}

/// Strategies applied to every input, in priority order.
pub const STRATEGIES: [Strategy; 3] = [
    original_with_default_protocol,
    original_as_given,
    token_as_given,
];

/// Builds the ordered candidate lookups for a deletion request.
#[derive(Debug, Clone, Default)]
pub struct InputMatcher {
    short_host: Option<String>,
}

impl InputMatcher {
    /// Creates a matcher. `short_host` is the public host short links are
    /// served from (e.g. `s.example.com`); when set, short URLs on that host
    /// are also matched by their token.
    pub fn new(short_host: Option<&str>) -> Self {
        let short_host = short_host
            .map(|host| strip_protocol(host.trim()).trim_end_matches('/').to_ascii_lowercase())
            .filter(|host| !host.is_empty());

        Self { short_host }
    }

    /// Returns lookups to try in order. Empty input yields no lookups.
    pub fn candidates(&self, raw: &str) -> Vec<Lookup> {
        let input = raw.trim().trim_start_matches('/');
        if input.is_empty() {
            return Vec::new();
        }

        let mut lookups: Vec<Lookup> = STRATEGIES
            .iter()
            .filter_map(|strategy| strategy(input))
            .collect();

        if let Some(token) = self.short_url_token(input) {
            let lookup = Lookup::token(token);
            if !lookups.contains(&lookup) {
                lookups.push(lookup);
            }
        }

        lookups
    }

    /// Extracts the token from `[http(s)://]<short_host>/<token>`.
    fn short_url_token<'a>(&self, input: &'a str) -> Option<&'a str> {
        let host = self.short_host.as_deref()?;
        let rest = strip_protocol(input);

        let head = rest.get(..host.len())?;
        if !head.eq_ignore_ascii_case(host) {
            return None;
        }

        let path = &rest[host.len()..];
        if !path.starts_with('/') {
            return None;
        }

        let token = path.trim_matches('/');
        (!token.is_empty() && !token.contains('/')).then_some(token)
    }
}
