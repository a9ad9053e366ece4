// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Bundle assembly.
//!
//! Discovers every route file in `routes/`, compiles each into an executor
//! unit, and concatenates dispatcher + executors + manifest invocation into
//! the distributable artifact(s):
//!
//! - **Release**: one `dist/<name>.user.js` containing header and body.
//! - **Develop**: `dist/<name>.dev.js` with the body and a header-only
//!   `dist/<name>.user.js` whose `@require file://` directive points at it,
//!   so the extension reloads the body from disk without reinstalling.
//!
//! Discovery order is the sorted directory listing; compilation is
//! sequential, which the resource-ownership map depends on (the first
//! discovered route owns a shared resource). Building an unchanged project
//! twice yields byte-identical output.

use crate::config::ProjectConfig;
use crate::error::{ExtwebError, Result};
use crate::header::HeaderBuilder;
use crate::resource::ResourceInjector;
use crate::route::compile_route;
use crate::runtime::{invocation, DISPATCHER_SOURCE};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Directory of route source files, relative to the project root.
pub const ROUTES_DIR: &str = "routes";

/// Output directory, relative to the project root.
pub const DIST_DIR: &str = "dist";

/// Optional project-level prelude included at the top of the bundle body.
pub const PRELUDE_FILE: &str = "index.js";

/// Build flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Single self-contained `.user.js`.
    Release,
    /// Split header + dev body pair for fast reload.
    Develop,
}

/// Aggregate compiler output.
///
/// Invariant: `route_names.len() == executors.len()`, and both follow
/// discovery order. `url_patterns` is the deduplicated set of every pattern
/// declared by any compiled route.
#[derive(Debug, Default)]
pub struct CompiledManifest {
    /// Compiled route names, in discovery order.
    pub route_names: Vec<String>,
    /// Distinct URL patterns across all compiled routes.
    pub url_patterns: BTreeSet<String>,
    /// Generated executor units, one per compiled route.
    pub executors: Vec<String>,
    /// Routes that failed to parse: `(route, diagnostic)`. Reported by the
    /// caller; their absence from the manifest is the only other effect.
    pub skipped: Vec<(String, String)>,
}

/// Result of one build.
#[derive(Debug)]
pub struct BuildOutput {
    /// Files written, primary artifact first.
    pub files: Vec<PathBuf>,
    /// Number of routes compiled into the bundle.
    pub route_count: usize,
    /// Per-route diagnostics for skipped routes.
    pub skipped: Vec<(String, String)>,
}

/// Compiles a project directory into userscript bundles.
pub struct Bundler<'a> {
    project_dir: PathBuf,
    config: &'a ProjectConfig,
}

impl<'a> Bundler<'a> {
    /// Creates a bundler for a project rooted at `project_dir`.
    pub fn new(project_dir: impl Into<PathBuf>, config: &'a ProjectConfig) -> Self {
        Self {
            project_dir: project_dir.into(),
            config,
        }
    }

    /// Discovers and compiles every route, in sorted directory order.
    ///
    /// Route parse failures are collected in `skipped`; resource and IO
    /// failures abort.
    pub fn compile_routes(&self) -> Result<CompiledManifest> {
        let mut manifest = CompiledManifest::default();
        let mut injector = ResourceInjector::new(&self.project_dir);

        let routes_dir = self.project_dir.join(ROUTES_DIR);
        if !routes_dir.is_dir() {
            return Err(ExtwebError::Config(format!(
                "project has no '{}' directory",
                ROUTES_DIR
            )));
        }

        let mut entries: Vec<PathBuf> = std::fs::read_dir(&routes_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("html")
            })
            .collect();
        entries.sort();

        for path in entries {
            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let markup = std::fs::read_to_string(&path)?;
            match compile_route(&name, &markup, &mut injector) {
                Ok(compiled) => {
                    manifest
                        .url_patterns
                        .extend(compiled.patterns.iter().cloned());
                    manifest.route_names.push(compiled.name);
                    manifest.executors.push(compiled.executor);
                }
                Err(e) if !e.is_fatal() => {
                    tracing::warn!(route = %name, "skipping route: {}", e);
                    manifest.skipped.push((name, e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        debug_assert_eq!(manifest.route_names.len(), manifest.executors.len());
        Ok(manifest)
    }

    /// Assembles the bundle body: dispatcher, then the project prelude and
    /// all executors inside one IIFE, then the manifest invocation.
    pub fn assemble_body(&self, manifest: &CompiledManifest) -> Result<String> {
        let prelude_path = self.project_dir.join(PRELUDE_FILE);
        let prelude = if prelude_path.is_file() {
            let code = std::fs::read_to_string(&prelude_path)?;
            let trimmed = code.trim();
            if trimmed.is_empty() {
                String::new()
            } else {
                format!("{}\n", trimmed)
            }
        } else {
            String::new()
        };

        Ok(format!(
            "{}\n;(function () {{\n{}{}\n{}\n}})();\n",
            DISPATCHER_SOURCE.trim_end(),
            prelude,
            manifest.executors.join("\n"),
            invocation(&manifest.route_names)
        ))
    }

    /// Runs a full build and writes the artifact(s).
    ///
    /// The write is the only asynchronous step; callers must await it
    /// before reporting success.
    pub async fn build(&self, mode: BuildMode) -> Result<BuildOutput> {
        let manifest = self.compile_routes()?;
        let body = self.assemble_body(&manifest)?;

        let dist_dir = self.project_dir.join(DIST_DIR);
        tokio::fs::create_dir_all(&dist_dir).await?;

        let user_file = dist_dir.join(format!("{}.user.js", self.config.name));
        let mut files = Vec::new();

        match mode {
            BuildMode::Release => {
                let header = HeaderBuilder::new(self.config).build(&manifest.url_patterns);
                let artifact = format!("{}\n\n{}", header, body);
                tokio::fs::write(&user_file, artifact).await?;
                files.push(user_file);
            }
            BuildMode::Develop => {
                let dev_file = dist_dir.join(format!("{}.dev.js", self.config.name));
                let dev_target = absolute(&dev_file);
                let header =
                    HeaderBuilder::new(self.config).build_dev(&manifest.url_patterns, &dev_target);
                tokio::fs::write(&dev_file, &body).await?;
                tokio::fs::write(&user_file, header).await?;
                files.push(user_file);
                files.push(dev_file);
            }
        }

        Ok(BuildOutput {
            files,
            route_count: manifest.route_names.len(),
            skipped: manifest.skipped,
        })
    }
}

/// Best-effort absolute path for the dev-body `@require` directive.
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
