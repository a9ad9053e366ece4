// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! JS code generation for route executors.
//!
//! Each route compiles to one self-invoking executor unit:
//!
//! ```js
//! const Name = () => {
//!     const options = ( /* authored options program */ );
//!     options.__style__ = extendWebPage.fragment(`<style>...</style>`);
//!     options.__exec__ = function (target, ctx) { /* insertion directives */ };
//!     options.__elements__ = { $card: extendWebPage.fragment(`...`) };
//!     return options;
//! };
//! Name.routes = ['*://www.test.com/*'];
//! Name.require = (path, invoke = true) => { ... };
//! ```
//!
//! The authored options program is embedded verbatim and evaluated only
//! inside the generated artifact, never during the build. The `fragment`
//! and `insert` helpers live on the runtime dispatcher, which precedes all
//! executors in the bundle.

use crate::minify::minify_css;
use crate::parser::{ElementBlock, RouteSource};

/// Escapes a string for embedding in a JS template literal.
pub fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Renders a single-quoted JS string literal.
pub fn js_string(s: &str) -> String {
    format!(
        "'{}'",
        s.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n")
    )
}

/// Renders a JS array of single-quoted strings.
pub fn js_string_array(items: &[String]) -> String {
    let rendered: Vec<String> = items.iter().map(|s| js_string(s)).collect();
    format!("[{}]", rendered.join(", "))
}

/// Generates the `__style__` assignment.
///
/// An absent style block emits explicit `undefined`; a deliberately empty
/// one still emits an (empty) style element.
fn style_code(style: &Option<String>) -> String {
    match style {
        None => "options.__style__ = undefined;".to_string(),
        Some(css) => format!(
            "options.__style__ = extendWebPage.fragment(`<style>{}</style>`);",
            escape_template(&minify_css(css))
        ),
    }
}

/// Generates the `__elements__` mapping.
fn elements_code(elements: &[ElementBlock]) -> String {
    let mut entries = String::new();
    for el in elements {
        entries.push_str(&format!(
            " ${}: extendWebPage.fragment(`{}`),",
            el.name,
            escape_template(&el.markup)
        ));
    }
    format!("options.__elements__ = {{{} }};", entries)
}

/// Generates the synthesized `__exec__` hook from insertion directives.
///
/// Returns `None` when no element declares a directive; elements without
/// one stay available in context but are not auto-inserted.
fn exec_code(elements: &[ElementBlock]) -> Option<String> {
    let mut statements = String::new();
    for el in elements {
        if let Some(insert) = &el.insert {
            statements.push_str(&format!(
                " extendWebPage.insert('{}', {}, ctx.elements.${});",
                insert.mode.as_str(),
                js_string(&insert.target),
                el.name
            ));
        }
    }
    if statements.is_empty() {
        None
    } else {
        Some(format!(
            "options.__exec__ = function (target, ctx) {{{} }};",
            statements
        ))
    }
}

/// Assembles the executor unit for one route.
///
/// `require_code` is the resource-loader statement produced by the resource
/// injector, when the route declares `resinject` references.
pub fn generate_executor(name: &str, source: &RouteSource, require_code: Option<&str>) -> String {
    let mut unit = String::new();
    unit.push_str(&format!("const {} = () => {{\n", name));
    // The closer sits on its own line so a trailing line comment in the
    // authored program cannot swallow it.
    unit.push_str(&format!(
        "    const options = ({}\n    );\n",
        wrap_options(&source.options_source)
    ));
    unit.push_str(&format!("    {}\n", style_code(&source.style)));
    if let Some(exec) = exec_code(&source.elements) {
        unit.push_str(&format!("    {}\n", exec));
    }
    unit.push_str(&format!("    {}\n", elements_code(&source.elements)));
    unit.push_str("    return options;\n");
    unit.push_str("};\n");
    unit.push_str(&format!(
        "{}.routes = {};\n",
        name,
        js_string_array(&source.patterns)
    ));
    if let Some(require) = require_code {
        unit.push_str(require);
        unit.push('\n');
    }
    unit
}

/// Strips redundant outer parentheses so the embedding site can add its own.
///
/// Strips only when the leading `(` actually pairs with the trailing `)`;
/// a shape like `(a)(b)` keeps its parentheses.
fn wrap_options(source: &str) -> String {
    let trimmed = source.trim();
    if outer_parens_pair(trimmed) {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// True when the program's first character is `(` and that paren closes at
/// the last character. Scans with the same string and comment awareness as
/// the options validator.
fn outer_parens_pair(source: &str) -> bool {
    if !(source.starts_with('(') && source.ends_with(')')) {
        return false;
    }
    let mut depth: i64 = 0;
    let mut in_string: Option<char> = None;
    let mut in_line_comment = false;
    let mut in_block_comment = false;
    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if in_line_comment {
            if c == '\n' {
                in_line_comment = false;
            }
            continue;
        }
        if in_block_comment {
            if c == '*' && matches!(chars.peek(), Some((_, '/'))) {
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
            '/' if matches!(chars.peek(), Some((_, '/'))) => in_line_comment = true,
            '/' if matches!(chars.peek(), Some((_, '*'))) => in_block_comment = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i == source.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_route_source;

    fn source(markup: &str) -> RouteSource {
        parse_route_source("Test", markup).unwrap()
    }

    #[test]
    fn executor_shape_for_minimal_route() {
        let src = source("<script routes=\"['*://a.com/*']\">({ public: {} })</script>");
        let code = generate_executor("Test", &src, None);
        assert!(code.starts_with("const Test = () => {"));
        assert!(code.contains("options.__style__ = undefined;"));
        assert!(code.contains("options.__elements__ = { };"));
        assert!(!code.contains("__exec__"));
        assert!(code.contains("Test.routes = ['*://a.com/*'];"));
        assert!(!code.contains("Test.require"));
    }

    #[test]
    fn style_block_is_minified_and_embedded() {
        let src = source(
            "<style>.a { color: red; }</style><script routes=\"['*']\">({})</script>",
        );
        let code = generate_executor("Test", &src, None);
        assert!(code.contains("fragment(`<style>.a{color:red}</style>`)"));
    }

    #[test]
    fn empty_style_block_emits_empty_style_element() {
        let src = source("<style></style><script routes=\"['*']\">({})</script>");
        let code = generate_executor("Test", &src, None);
        assert!(code.contains("fragment(`<style></style>`)"));
    }

    #[test]
    fn insertion_directives_synthesize_exec_hook() {
        let src = source(
            "<elements><el name=\"card\" append=\"#main\"><b>x</b></el></elements>\
             <script routes=\"['*']\">({})</script>",
        );
        let code = generate_executor("Test", &src, None);
        assert!(code.contains(
            "options.__exec__ = function (target, ctx) { \
             extendWebPage.insert('append', '#main', ctx.elements.$card); };"
        ));
        assert!(code.contains("$card: extendWebPage.fragment(`<b>x</b>`)"));
    }

    #[test]
    fn trailing_line_comment_cannot_swallow_the_closer() {
        let src = source("<script routes=\"['*']\">({ public: { x: 1 } }) // done</script>");
        let code = generate_executor("Test", &src, None);
        let comment_line = code.lines().find(|l| l.contains("// done")).unwrap();
        assert!(!comment_line.contains(");"));
        assert!(code.contains("\n    );\n"));
    }

    #[test]
    fn outer_parens_strip_only_when_paired() {
        assert_eq!(wrap_options("({ a: 1 })"), "{ a: 1 }");
        assert_eq!(wrap_options("(a)(b)"), "(a)(b)");
        assert_eq!(wrap_options("({ s: ')' })"), "{ s: ')' }");
        assert_eq!(wrap_options("{ a: 1 }"), "{ a: 1 }");
    }

    #[test]
    fn template_escaping() {
        assert_eq!(escape_template("a`b${c}\\d"), "a\\`b\\${c}\\\\d");
        assert_eq!(js_string("it's"), "'it\\'s'");
    }
}
