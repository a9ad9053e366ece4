// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Glob-style URL pattern matching.
//!
//! Route patterns use `*` as a multi-character wildcard and are anchored at
//! both ends. This module is the compile-time mirror of the matcher embedded
//! in the runtime dispatcher: the semantics must stay identical so that a
//! pattern validated at build time behaves the same in the browser.
//!
//! Compilation rule: escape nothing, replace every `*` with a lazy
//! multi-character wildcard, anchor the whole pattern.

use crate::error::{ExtwebError, Result};
use regex::Regex;

/// A compiled URL pattern.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    raw: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compiles a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`ExtwebError::Literal`] when the pattern does not compile
    /// to a valid regular expression (patterns are embedded verbatim, so
    /// stray regex metacharacters can make one uncompilable).
    pub fn compile(pattern: &str) -> Result<Self> {
        let source = format!("^{}$", pattern.replace('*', "(?s:.*?)"));
        let regex = Regex::new(&source)
            .map_err(|e| ExtwebError::Literal(format!("pattern '{}': {}", pattern, e)))?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// Tests a URL against this pattern.
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// The original glob source.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_any_run_of_characters() {
        let p = UrlPattern::compile("*://www.test.com/*").unwrap();
        assert!(p.matches("https://www.test.com/page?x=1"));
        assert!(p.matches("http://www.test.com/"));
        assert!(!p.matches("https://other.com/www.test.com/"));
    }

    #[test]
    fn pattern_is_anchored() {
        let p = UrlPattern::compile("https://example.com/").unwrap();
        assert!(p.matches("https://example.com/"));
        assert!(!p.matches("https://example.com/sub"));
        assert!(!p.matches("xhttps://example.com/"));
    }

    #[test]
    fn star_matches_zero_characters() {
        let p = UrlPattern::compile("https://example.com/*").unwrap();
        assert!(p.matches("https://example.com/"));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        assert!(UrlPattern::compile("https://example.com/(").is_err());
    }
}
