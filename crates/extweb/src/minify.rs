// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Markup and stylesheet normalization.
//!
//! Route sources are normalized before parsing (comments stripped) and the
//! markup embedded in generated executors is collapsed so repeated builds of
//! an unchanged project stay byte-identical. The CSS minifier handles both
//! `<style>` blocks and `.css` resource files.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref BETWEEN_TAGS: Regex = Regex::new(r">\s+<").unwrap();
    static ref CSS_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    static ref CSS_AROUND_PUNCT: Regex = Regex::new(r"\s*([\{\};:,>])\s*").unwrap();
    static ref WS_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Strips HTML comments from a route source before parsing.
pub fn strip_comments(source: &str) -> String {
    HTML_COMMENT.replace_all(source, "").into_owned()
}

/// Collapses inter-tag whitespace in an HTML fragment.
///
/// Applied to element markup after extraction; the fragment carries no
/// script content, so collapsing runs of whitespace is safe.
pub fn collapse_markup(fragment: &str) -> String {
    let collapsed = WS_RUN.replace_all(fragment.trim(), " ");
    BETWEEN_TAGS.replace_all(&collapsed, "><").into_owned()
}

/// Minifies a stylesheet: strips comments, collapses whitespace and drops
/// trailing semicolons before closing braces.
pub fn minify_css(css: &str) -> String {
    let stripped = CSS_COMMENT.replace_all(css, "");
    let collapsed = WS_RUN.replace_all(stripped.trim(), " ");
    let tightened = CSS_AROUND_PUNCT.replace_all(&collapsed, "$1");
    tightened.replace(";}", "}")
}
