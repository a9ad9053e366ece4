// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Route source parser.
//!
//! A route file is an HTML-like document with three recognized parts:
//!
//! - one root `<script routes="[...]">` node whose body is the options
//!   program and which may carry a `resinject="[...]"` attribute,
//! - an optional single `<style>` block,
//! - zero or more `<elements><el name="...">` blocks, each optionally
//!   carrying one `append`/`prepend`/`replace` insertion directive.
//!
//! Parsing is HTML5-compliant via html5ever. All extraction is threaded
//! through an explicit [`ParsedDocument`] context; there is no shared
//! mutable parse state.

use crate::error::{ExtwebError, Result};
use crate::literal::parse_string_array;
use crate::minify::{collapse_markup, strip_comments};
use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use lazy_static::lazy_static;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// Returns true if `name` is a valid JS identifier.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// How an element block is inserted into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Append to the target's children.
    Append,
    /// Prepend before the target's first child.
    Prepend,
    /// Replace the target's children.
    Replace,
}

impl InsertMode {
    /// The generated-code name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            InsertMode::Append => "append",
            InsertMode::Prepend => "prepend",
            InsertMode::Replace => "replace",
        }
    }
}

/// Insertion directive on an element block.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertDirective {
    /// Insertion mode.
    pub mode: InsertMode,
    /// CSS selector of the insertion target.
    pub target: String,
}

/// A named DOM-fragment declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBlock {
    /// Element name; the fragment is exposed as `$name` in context.
    pub name: String,
    /// Normalized inner markup.
    pub markup: String,
    /// Optional auto-insertion directive.
    pub insert: Option<InsertDirective>,
}

/// The structural pieces extracted from one route file.
#[derive(Debug, Clone)]
pub struct RouteSource {
    /// URL glob patterns from the `routes` attribute.
    pub patterns: Vec<String>,
    /// Resource references from the `resinject` attribute.
    pub resource_refs: Vec<String>,
    /// Style block content. `None` means no `<style>` block at all;
    /// `Some("")` is a deliberately empty one.
    pub style: Option<String>,
    /// Element blocks in declaration order, empty ones filtered out.
    pub elements: Vec<ElementBlock>,
    /// The options program (body of the root script node), embedded verbatim
    /// in the generated executor and never evaluated at build time.
    pub options_source: String,
}

/// Explicit parse context wrapping the document tree of one route file.
pub struct ParsedDocument {
    root: Handle,
}

impl ParsedDocument {
    /// Parses a route source into a document tree.
    pub fn parse(source: &str) -> Result<Self> {
        let normalized = strip_comments(source);
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut normalized.as_bytes())?;
        Ok(Self { root: dom.document })
    }

    /// Depth-first search for the first element satisfying `pred`.
    fn find<F>(&self, pred: &F) -> Option<Handle>
    where
        F: Fn(&str, &Handle) -> bool,
    {
        fn walk<F>(handle: &Handle, pred: &F) -> Option<Handle>
        where
            F: Fn(&str, &Handle) -> bool,
        {
            if let NodeData::Element { name, .. } = &handle.data {
                if pred(name.local.as_ref(), handle) {
                    return Some(handle.clone());
                }
            }
            for child in handle.children.borrow().iter() {
                if let Some(found) = walk(child, pred) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.root, pred)
    }

    fn find_tag(&self, tag: &str) -> Option<Handle> {
        self.find(&|name, _| name == tag)
    }
}

fn attr_value(handle: &Handle, attr: &str) -> Option<String> {
    if let NodeData::Element { attrs, .. } = &handle.data {
        for a in attrs.borrow().iter() {
            if a.name.local.as_ref() == attr {
                return Some(a.value.to_string());
            }
        }
    }
    None
}

/// Concatenated text of all descendant text nodes.
fn text_content(handle: &Handle) -> String {
    let mut out = String::new();
    fn walk(handle: &Handle, out: &mut String) {
        if let NodeData::Text { contents } = &handle.data {
            out.push_str(&contents.borrow());
        }
        for child in handle.children.borrow().iter() {
            walk(child, out);
        }
    }
    walk(handle, &mut out);
    out
}

/// Serializes the children of a node back to HTML.
fn inner_html(handle: &Handle) -> Result<String> {
    let mut buf = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(&mut buf, &SerializableHandle::from(handle.clone()), opts)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn extract_insert(route: &str, name: &str, el: &Handle) -> Result<Option<InsertDirective>> {
    for mode in [InsertMode::Append, InsertMode::Prepend, InsertMode::Replace] {
        if let Some(target) = attr_value(el, mode.as_str()) {
            if target.is_empty() {
                return Err(ExtwebError::route_parse(
                    route,
                    format!("element '{}' has an empty {} selector", name, mode.as_str()),
                ));
            }
            return Ok(Some(InsertDirective {
                mode,
                target,
            }));
        }
    }
    Ok(None)
}

fn extract_elements(route: &str, doc: &ParsedDocument) -> Result<Vec<ElementBlock>> {
    let container = match doc.find_tag("elements") {
        Some(container) => container,
        None => return Ok(Vec::new()),
    };

    let mut blocks = Vec::new();
    for child in container.children.borrow().iter() {
        let is_el = matches!(&child.data, NodeData::Element { name, .. } if name.local.as_ref() == "el");
        if !is_el {
            continue;
        }
        let name = attr_value(child, "name").ok_or_else(|| {
            ExtwebError::route_parse(route, "an <el> block is missing its name attribute")
        })?;
        if !is_identifier(&name) {
            return Err(ExtwebError::route_parse(
                route,
                format!("element name '{}' is not a valid identifier", name),
            ));
        }
        let markup = collapse_markup(&inner_html(child)?);
        // Empty fragments are dropped entirely, not exposed in context.
        if markup.is_empty() {
            continue;
        }
        let insert = extract_insert(route, &name, child)?;
        blocks.push(ElementBlock {
            name,
            markup,
            insert,
        });
    }
    Ok(blocks)
}

/// Structural sanity check on the options program.
///
/// The program is compiled into the generated artifact rather than evaluated
/// here, so validation is limited to what can be checked without executing
/// JS: the body must be non-empty and its brackets must balance outside of
/// strings and comments.
fn validate_options_source(route: &str, source: &str) -> Result<()> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(ExtwebError::route_parse(route, "empty options program"));
    }
    if !trimmed.starts_with('(') && !trimmed.starts_with('{') {
        return Err(ExtwebError::route_parse(
            route,
            "options program must be an object literal",
        ));
    }

    let mut depth: i64 = 0;
    let mut chars = trimmed.chars().peekable();
    let mut in_string: Option<char> = None;
    let mut in_line_comment = false;
    let mut in_block_comment = false;
    while let Some(c) = chars.next() {
        if in_line_comment {
            if c == '\n' {
                in_line_comment = false;
            }
            continue;
        }
        if in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
            }
            continue;
        }
        if let Some(quote) = in_string {
            if c == '\\' {
                chars.next();
            } else if c == quote {
                in_string = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => in_string = Some(c),
            '/' if chars.peek() == Some(&'/') => in_line_comment = true,
            '/' if chars.peek() == Some(&'*') => in_block_comment = true,
            '(' | '{' | '[' => depth += 1,
            ')' | '}' | ']' => {
                depth -= 1;
                if depth < 0 {
                    break;
                }
            }
            _ => {}
        }
    }
    if depth != 0 || in_string.is_some() || in_block_comment {
        return Err(ExtwebError::route_parse(
            route,
            "unbalanced options program",
        ));
    }
    Ok(())
}

/// Parses one route source file into its structural pieces.
///
/// # Errors
///
/// Returns [`ExtwebError::RouteParse`] for any malformed piece; the caller
/// reports it and skips the route without failing the build.
pub fn parse_route_source(route: &str, source: &str) -> Result<RouteSource> {
    let doc = ParsedDocument::parse(source)?;

    let script = doc
        .find(&|name, handle| name == "script" && attr_value(handle, "routes").is_some())
        .ok_or_else(|| {
            ExtwebError::route_parse(route, "missing <script routes=\"[...]\"> block")
        })?;

    let routes_attr = attr_value(&script, "routes").unwrap_or_default();
    let patterns = parse_string_array(&routes_attr)
        .map_err(|e| ExtwebError::route_parse(route, format!("routes attribute: {}", e)))?;
    if patterns.is_empty() {
        return Err(ExtwebError::route_parse(
            route,
            "routes attribute declares no URL patterns",
        ));
    }

    let resource_refs = match attr_value(&script, "resinject") {
        Some(raw) => parse_string_array(&raw)
            .map_err(|e| ExtwebError::route_parse(route, format!("resinject attribute: {}", e)))?,
        None => Vec::new(),
    };

    let options_source = text_content(&script);
    validate_options_source(route, &options_source)?;

    let style = doc.find_tag("style").map(|s| text_content(&s).trim().to_string());
    let elements = extract_elements(route, &doc)?;

    Ok(RouteSource {
        patterns,
        resource_refs,
        style,
        elements,
        options_source: options_source.trim().to_string(),
    })
}
