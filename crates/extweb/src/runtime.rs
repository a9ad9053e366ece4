// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Runtime dispatcher asset.
//!
//! The dispatcher (`extendWebPage`) executes in the browser at page-load
//! time: it matches the current URL against every compiled route's patterns
//! and drives the lifecycle hooks of matching routes. Its source is embedded
//! in this crate and emitted verbatim at the top of every bundle body.
//!
//! Per-route lifecycle: Unmatched -> Matched -> { Starting -> BodyPending ->
//! Loaded }. Patterns are evaluated once, at dispatcher construction; hooks
//! receive the shared target explicitly plus a `{ style, elements,
//! loadResource }` context.

/// The dispatcher source shipped into every bundle.
pub const DISPATCHER_SOURCE: &str = include_str!("runtime/extend_web_page.js");

/// Global name the dispatcher invocation result is assigned to.
pub const EXPORT_NAME: &str = "window.extendApp";

/// Renders the manifest-invocation statement that wires all route executors
/// into the dispatcher, in discovery order.
pub fn invocation(route_names: &[String]) -> String {
    format!(
        "{} = extendWebPage([{}]);",
        EXPORT_NAME,
        route_names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatcher_defines_the_entry_point() {
        assert!(DISPATCHER_SOURCE.contains("function extendWebPage(routeExecs)"));
        assert!(DISPATCHER_SOURCE.contains("window.extendWebPage = extendWebPage;"));
    }

    #[test]
    fn hooks_run_in_lifecycle_order() {
        // startExec and the synthesized __exec__ run synchronously, in that
        // order; bodyExec and loadExec bind as one-shot listeners.
        let start = DISPATCHER_SOURCE.find("options.startExec(target, ctx)").unwrap();
        let exec = DISPATCHER_SOURCE.find("options.__exec__(target, ctx)").unwrap();
        let body = DISPATCHER_SOURCE.find("'DOMContentLoaded'").unwrap();
        let load = DISPATCHER_SOURCE.find("'load'").unwrap();
        assert!(start < exec && exec < body && body < load);
        assert_eq!(DISPATCHER_SOURCE.matches("{ once: true }").count(), 2);
    }

    #[test]
    fn dispatcher_ships_page_utilities() {
        for helper in ["saveTextToFile", "setClipboardText", "getDOM"] {
            assert!(DISPATCHER_SOURCE.contains(&format!("function {}(", helper)));
            assert!(DISPATCHER_SOURCE
                .contains(&format!("extendWebPage.{} = {};", helper, helper)));
        }
    }

    #[test]
    fn late_injection_still_runs_body_and_load_hooks() {
        // Past-the-event documents invoke the hook directly instead of
        // binding a listener that will never fire.
        let body_guard = DISPATCHER_SOURCE
            .find("document.readyState !== 'loading'")
            .unwrap();
        let load_guard = DISPATCHER_SOURCE
            .find("document.readyState === 'complete'")
            .unwrap();
        assert!(body_guard < load_guard);
        assert_eq!(
            DISPATCHER_SOURCE.matches("options.bodyExec(target, ctx)").count(),
            2
        );
        assert_eq!(
            DISPATCHER_SOURCE.matches("options.loadExec(target, ctx)").count(),
            2
        );
    }

    #[test]
    fn invocation_preserves_discovery_order() {
        let names = vec!["Alpha".to_string(), "Beta".to_string()];
        assert_eq!(
            invocation(&names),
            "window.extendApp = extendWebPage([Alpha, Beta]);"
        );
    }
}
