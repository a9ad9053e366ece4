// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Userscript metadata header generation.
//!
//! The header is a fixed-format directive block consumed by the host
//! browser extension:
//!
//! ```text
//! // ==UserScript==
//! // @name         demo
//! // @version      1.0.0
//! // ...
//! // @match        *://www.test.com/*
//! // ==/UserScript==
//! ```
//!
//! Directive order: the fixed fields, then repeated `exclude`/`grant`/
//! `require` lines in that order, then one `match` per distinct URL pattern.
//! Patterns are emitted in sorted order so a rebuild of an unchanged project
//! is byte-identical.

use crate::config::ProjectConfig;
use std::collections::BTreeSet;

const OPEN_MARKER: &str = "// ==UserScript==";
const CLOSE_MARKER: &str = "// ==/UserScript==";

/// Builds the header directive block.
pub struct HeaderBuilder<'a> {
    config: &'a ProjectConfig,
    lines: Vec<String>,
}

impl<'a> HeaderBuilder<'a> {
    /// Starts a header for the given project configuration.
    pub fn new(config: &'a ProjectConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
        }
    }

    fn directive(&mut self, name: &str, value: &str) {
        // Fixed column layout: directive padded to 12 characters.
        self.lines.push(format!("// @{:<12} {}", name, value));
    }

    /// Renders the header with one `match` directive per distinct pattern.
    pub fn build(mut self, patterns: &BTreeSet<String>) -> String {
        let config = self.config;
        self.directive("name", &config.name);
        self.directive("version", &config.version);
        self.directive("description", &config.description);
        self.directive("author", &config.author);
        self.directive("license", &config.license);
        self.directive("run-at", &config.run_at);
        for value in &config.exclude {
            self.directive("exclude", value);
        }
        for value in &config.grant {
            self.directive("grant", value);
        }
        for value in &config.require {
            self.directive("require", value);
        }
        for pattern in patterns {
            self.directive("match", pattern);
        }
        format!(
            "{}\n{}\n{}",
            OPEN_MARKER,
            self.lines.join("\n"),
            CLOSE_MARKER
        )
    }

    /// Renders a development-mode header: the metadata block plus a
    /// `@require file://...` directive pointing at the dev body file.
    pub fn build_dev(self, patterns: &BTreeSet<String>, dev_body: &std::path::Path) -> String {
        let mut header = self.build(patterns);
        let require_line = format!("// @{:<12} file://{}", "require", dev_body.display());
        header = header.replace(
            CLOSE_MARKER,
            &format!("{}\n{}", require_line, CLOSE_MARKER),
        );
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ProjectConfig {
        ProjectConfig::from_value(&json!({
            "name": "demo",
            "version": "2.1.0",
            "license": "MIT",
            "grant": ["GM_setValue"],
            "require": ["https://cdn.example.com/lib.js"],
            "exclude": ["*://skip.me/*"],
        }))
        .unwrap()
    }

    fn patterns(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn header_layout_and_directive_order() {
        let header = HeaderBuilder::new(&config()).build(&patterns(&["*://example.com/*"]));
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines[0], "// ==UserScript==");
        assert_eq!(lines[1], "// @name         demo");
        assert_eq!(lines[2], "// @version      2.1.0");
        assert_eq!(lines[5], "// @license      MIT");
        assert_eq!(lines[6], "// @run-at       document-body");
        assert_eq!(lines[7], "// @exclude      *://skip.me/*");
        assert_eq!(lines[8], "// @grant        GM_setValue");
        assert_eq!(lines[9], "// @require      https://cdn.example.com/lib.js");
        assert_eq!(lines[10], "// @match        *://example.com/*");
        assert_eq!(*lines.last().unwrap(), "// ==/UserScript==");
    }

    #[test]
    fn every_distinct_pattern_exactly_once() {
        let header = HeaderBuilder::new(&config())
            .build(&patterns(&["*://b.com/*", "*://a.com/*", "*://b.com/*"]));
        assert_eq!(header.matches("@match").count(), 2);
        let a = header.find("*://a.com/*").unwrap();
        let b = header.find("*://b.com/*").unwrap();
        assert!(a < b, "patterns are emitted in sorted order");
    }

    #[test]
    fn dev_header_points_at_dev_body() {
        let header = HeaderBuilder::new(&config()).build_dev(
            &patterns(&[]),
            std::path::Path::new("/tmp/demo/dist/demo.dev.js"),
        );
        assert!(header.contains("// @require      file:///tmp/demo/dist/demo.dev.js"));
        assert!(header.ends_with("// ==/UserScript=="));
    }
}
