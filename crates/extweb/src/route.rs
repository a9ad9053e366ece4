// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Route compilation.
//!
//! Ties the parser, pattern validation, resource injector and code
//! generator together: one route source file in, one compiled executor unit
//! out. Route parse failures are per-route and non-fatal; resource failures
//! abort the build.

use crate::codegen::generate_executor;
use crate::error::{ExtwebError, Result};
use crate::parser::{is_identifier, parse_route_source, RouteSource};
use crate::pattern::UrlPattern;
use crate::resource::ResourceInjector;

/// One route definition, immutable after parse.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    /// Route name, derived from the file stem. A valid JS identifier.
    pub name: String,
    /// The extracted structural pieces.
    pub source: RouteSource,
}

impl RouteDefinition {
    /// Parses a route source file into a definition.
    ///
    /// Validates that the name is usable as a generated-code identifier and
    /// that every declared pattern compiles under the dispatcher's glob
    /// semantics.
    pub fn parse(name: &str, markup: &str) -> Result<Self> {
        if !is_identifier(name) {
            return Err(ExtwebError::route_parse(
                name,
                format!("route file name '{}' is not a valid identifier", name),
            ));
        }
        let source = parse_route_source(name, markup)?;
        for pattern in &source.patterns {
            UrlPattern::compile(pattern)
                .map_err(|e| ExtwebError::route_parse(name, e.to_string()))?;
        }
        Ok(Self {
            name: name.to_string(),
            source,
        })
    }
}

/// A compiled route: its name, URL patterns and generated executor unit.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    /// Route name, also the executor's JS identifier.
    pub name: String,
    /// URL patterns, in declaration order.
    pub patterns: Vec<String>,
    /// The generated executor source.
    pub executor: String,
}

/// Compiles one route, claiming its resources in the project-wide injector.
///
/// # Errors
///
/// [`ExtwebError::RouteParse`] (non-fatal, skip the route) or
/// [`ExtwebError::ResourceRef`] (fatal to the build).
pub fn compile_route(
    name: &str,
    markup: &str,
    injector: &mut ResourceInjector,
) -> Result<CompiledRoute> {
    let definition = RouteDefinition::parse(name, markup)?;
    let require_code = injector.inject(name, &definition.source.resource_refs)?;
    let executor = generate_executor(name, &definition.source, require_code.as_deref());
    Ok(CompiledRoute {
        name: definition.name,
        patterns: definition.source.patterns,
        executor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn compiles_a_complete_route() {
        let dir = TempDir::new().unwrap();
        let mut injector = ResourceInjector::new(dir.path());
        let markup = r#"
<style>.badge { color: red; }</style>
<elements>
    <el name="badge" prepend="body"><span class="badge">new</span></el>
</elements>
<script routes="[ '*://www.test.com/*', 'https://alt.test.com/*' ]">
    ({
        public: { greeting: 'hi' },
        startExec(target, ctx) { target.started = true; },
        loadExec(target, ctx) { document.write(target.greeting); }
    })
</script>
"#;
        let compiled = compile_route("Test", markup, &mut injector).unwrap();
        assert_eq!(compiled.name, "Test");
        assert_eq!(compiled.patterns.len(), 2);
        assert!(compiled.executor.contains("const Test = () => {"));
        assert!(compiled.executor.contains("extendWebPage.insert('prepend', 'body', ctx.elements.$badge);"));
        assert!(compiled.executor.contains(".badge{color:red}"));
    }

    #[test]
    fn invalid_name_is_a_route_parse_error() {
        let dir = TempDir::new().unwrap();
        let mut injector = ResourceInjector::new(dir.path());
        let err = compile_route("bad-name", "<script routes=\"['*']\">({})</script>", &mut injector)
            .unwrap_err();
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("not a valid identifier"));
    }

    #[test]
    fn uncompilable_pattern_is_a_route_parse_error() {
        let dir = TempDir::new().unwrap();
        let mut injector = ResourceInjector::new(dir.path());
        let err = compile_route(
            "Test",
            "<script routes=\"['https://a.com/(']\">({})</script>",
            &mut injector,
        )
        .unwrap_err();
        assert!(!err.is_fatal());
    }
}
