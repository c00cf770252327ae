//! # Country Resolution
//!
//! Maps a free-text question onto one of the canonical country names, notices
//! when the question names a country the corpus does not cover, or reports
//! that no country was mentioned at all.

use crate::catalog::{COUNTRY_ALIASES, SUPPORTED_COUNTRIES, UNSUPPORTED_COUNTRIES};
use tracing::{debug, info};

/// Outcome of [`CountryResolver::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryMatch {
    /// A supported country, by canonical name.
    Resolved(&'static str),
    /// A real country or territory the corpus has no guide for.
    Unsupported(&'static str),
    None,
}

/// Resolves countries by substring scans over the country tables.
///
/// The scans run in a fixed priority order: canonical names, then aliases, then
/// the unsupported vocabulary. Inside each table the first entry found in the
/// question wins. That order is the tie-break whenever several names match,
/// e.g. "印度尼西亚" resolves to 印度 because 印度 is listed first.
#[derive(Debug, Clone)]
pub struct CountryResolver {
    supported: &'static [&'static str],
    aliases: &'static [(&'static str, &'static str)],
    unsupported: &'static [&'static str],
}

impl Default for CountryResolver {
    fn default() -> Self {
        Self::new(SUPPORTED_COUNTRIES, COUNTRY_ALIASES, UNSUPPORTED_COUNTRIES)
    }
}

impl CountryResolver {
    pub fn new(
        supported: &'static [&'static str],
        aliases: &'static [(&'static str, &'static str)],
        unsupported: &'static [&'static str],
    ) -> Self {
        Self {
            supported,
            aliases,
            unsupported,
        }
    }

    pub fn resolve(&self, question: &str) -> CountryMatch {
        if let Some(country) = self.supported.iter().copied().find(|c| question.contains(c)) {
            debug!("Resolved country '{}' by canonical name", country);
            return CountryMatch::Resolved(country);
        }

        if let Some((alias, country)) = self
            .aliases
            .iter()
            .copied()
            .find(|(alias, _)| alias_occurs_in(alias, question))
        {
            info!("Resolved country '{}' through alias '{}'", country, alias);
            return CountryMatch::Resolved(country);
        }

        if let Some(country) = self.unsupported.iter().copied().find(|c| question.contains(c)) {
            info!("Question mentions unsupported country '{}'", country);
            return CountryMatch::Unsupported(country);
        }

        CountryMatch::None
    }
}

/// Non-Latin aliases are plain substrings. Latin aliases ignore ASCII case and
/// must not touch other ASCII letters or digits, so "US" does not fire inside
/// "business" but does in "US的加班".
fn alias_occurs_in(alias: &str, question: &str) -> bool {
    if !alias.is_ascii() {
        return question.contains(alias);
    }

    // ASCII lowercasing keeps byte offsets intact, so indices into `lowered`
    // are valid in `question` too.
    let lowered = question.to_ascii_lowercase();
    let needle = alias.to_ascii_lowercase();
    let bytes = lowered.as_bytes();

    lowered.match_indices(&needle).any(|(start, _)| {
        let end = start + needle.len();
        let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        before_ok && after_ok
    })
}
