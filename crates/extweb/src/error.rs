// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the extweb build core.
//!
//! This module defines [`ExtwebError`], the main error enum, shared by the
//! route compiler, resource injector and bundle assembler.
//!
//! # Error Categories
//!
//! - **Route parse errors**: malformed route source files. Reported per
//!   route; the route is skipped and the build continues.
//! - **Resource errors**: invalid resource references or unreadable asset
//!   files. Fatal to the build.
//! - **Config errors**: malformed `userscript.json`. Fatal before any
//!   compilation begins.
//! - **IO errors**: output files that cannot be created or written. Fatal.

use thiserror::Error;

/// The main error type for extweb operations.
#[derive(Error, Debug)]
pub enum ExtwebError {
    /// A route source file could not be parsed.
    ///
    /// Non-fatal: the failing route is excluded from the manifest and the
    /// remaining routes still compile.
    #[error("'{route}.html': {message}")]
    RouteParse {
        /// The route name (file stem) that failed.
        route: String,
        /// Description of the parse failure.
        message: String,
    },

    /// A resource reference violated the `@/` namespace rule, or the
    /// referenced asset could not be read or categorized.
    #[error("resource '{reference}': {message}")]
    ResourceRef {
        /// The offending logical resource path.
        reference: String,
        /// Description of the failure.
        message: String,
    },

    /// `userscript.json` is missing or contains a field of the wrong type.
    #[error("userscript.json: {0}")]
    Config(String),

    /// File I/O error (reading sources, writing the bundle).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A `routes` or `resinject` attribute is not a closed data literal.
    #[error("invalid literal: {0}")]
    Literal(String),
}

impl From<serde_json::Error> for ExtwebError {
    fn from(e: serde_json::Error) -> Self {
        ExtwebError::Literal(e.to_string())
    }
}

impl ExtwebError {
    /// Builds a per-route parse error.
    pub fn route_parse(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RouteParse {
            route: route.into(),
            message: message.into(),
        }
    }

    /// Builds a resource reference error.
    pub fn resource(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResourceRef {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// True for errors that abort the whole build, false for per-route
    /// diagnostics.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::RouteParse { .. })
    }
}

/// Convenience type alias for Results with [`ExtwebError`].
pub type Result<T> = std::result::Result<T, ExtwebError>;
