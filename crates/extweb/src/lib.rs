// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # EXTWEB
//!
//! Build core for userscript projects: compiles a directory of declarative
//! route files (HTML-like fragments, each a URL-matching rule plus a
//! DOM-manipulation program) into a single distributable userscript.
//!
//! ## Pipeline
//!
//! - Parse each `routes/*.html` file into its structural pieces (patterns,
//!   style, element blocks, options program).
//! - Resolve `resinject` references into inline loaders, deduplicated
//!   across routes.
//! - Generate one JS executor unit per route.
//! - Assemble dispatcher + executors + manifest invocation, wrap with the
//!   userscript metadata header and write the artifact(s).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use extweb::{Bundler, BuildMode, ProjectConfig};
//!
//! let config = ProjectConfig::load(project_dir)?;
//! let bundler = Bundler::new(project_dir, &config);
//! let output = bundler.build(BuildMode::Release).await?;
//! ```

/// Bundle assembly and build orchestration.
pub mod bundle;
/// JS code generation for route executors.
pub mod codegen;
/// Project configuration (`userscript.json`).
pub mod config;
/// Error types and reporting.
pub mod error;
/// Userscript metadata header generation.
pub mod header;
/// Restricted literal-expression parser.
pub mod literal;
/// Markup and stylesheet normalization.
pub mod minify;
/// Route source parser.
pub mod parser;
/// Glob-style URL pattern matching.
pub mod pattern;
/// Resource injection.
pub mod resource;
/// Route compilation.
pub mod route;
/// Runtime dispatcher asset.
pub mod runtime;

pub use bundle::{BuildMode, BuildOutput, Bundler, CompiledManifest, DIST_DIR, ROUTES_DIR};
pub use config::{is_url_friendly, ProjectConfig, CONFIG_FILE};
pub use error::{ExtwebError, Result};
pub use parser::{ElementBlock, InsertDirective, InsertMode, RouteSource};
pub use pattern::UrlPattern;
pub use resource::{ResourceInjector, ResourceKind, RESOURCE_PREFIX};
pub use route::{compile_route, CompiledRoute, RouteDefinition};
pub use runtime::DISPATCHER_SOURCE;
