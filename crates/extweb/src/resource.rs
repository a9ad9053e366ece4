// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Resource injection.
//!
//! A route's `resinject` references are resolved into inline loaders keyed
//! by logical path. The first route to reference a logical path owns its
//! embedding; later routes borrow the owner's loader by reference, so each
//! distinct resource is embedded at most once per bundle.
//!
//! Loader side effects (the head-append a `.css` loader performs) fire
//! exactly once per logical resource regardless of how many routes load it:
//! the runtime dispatcher caches loader values in a bundle-global map.

use crate::codegen::{escape_template, js_string};
use crate::error::{ExtwebError, Result};
use crate::minify::minify_css;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The fixed namespace prefix marking a reference as project-relative.
pub const RESOURCE_PREFIX: &str = "@/";

/// The project subdirectory the prefix maps onto.
pub const ASSETS_DIR: &str = "assets";

/// Content category of a referenced asset, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Image or font bytes, embedded as a base64 data URI.
    Binary(&'static str),
    /// JSON document, re-embedded as a data literal.
    Json,
    /// Script, embedded as the loader's executed body.
    Script,
    /// Stylesheet, minified and head-appended by its loader.
    Stylesheet,
}

impl ResourceKind {
    /// Categorizes a file extension. Returns `None` for unsupported kinds.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(Self::Binary("image/jpeg")),
            "png" => Some(Self::Binary("image/png")),
            "webp" => Some(Self::Binary("image/webp")),
            "bmp" => Some(Self::Binary("image/bmp")),
            "gif" => Some(Self::Binary("image/gif")),
            "woff" => Some(Self::Binary("font/woff")),
            "woff2" => Some(Self::Binary("font/woff2")),
            "json" => Some(Self::Json),
            "js" => Some(Self::Script),
            "css" => Some(Self::Stylesheet),
            _ => None,
        }
    }
}

/// Project-wide resource ownership map, threaded through every route's
/// injection call in discovery order.
pub struct ResourceInjector {
    assets_dir: PathBuf,
    owners: HashMap<String, String>,
}

impl ResourceInjector {
    /// Creates an injector rooted at `project_dir`.
    pub fn new(project_dir: &Path) -> Self {
        Self {
            assets_dir: project_dir.join(ASSETS_DIR),
            owners: HashMap::new(),
        }
    }

    /// Which route owns a logical path, if any.
    pub fn owner_of(&self, logical: &str) -> Option<&str> {
        self.owners.get(logical).map(String::as_str)
    }

    /// Generates the `require` loader statement for one route.
    ///
    /// Returns `None` when the route declares no references. Mutates the
    /// ownership map: unclaimed paths become owned by `route_name`.
    ///
    /// # Errors
    ///
    /// [`ExtwebError::ResourceRef`] for prefix violations, unreadable files
    /// and unsupported extensions. These are fatal to the build.
    pub fn inject(&mut self, route_name: &str, refs: &[String]) -> Result<Option<String>> {
        if refs.is_empty() {
            return Ok(None);
        }

        let mut entries = String::new();
        for logical in refs {
            match self.owners.get(logical.as_str()) {
                // Duplicate reference within the same route: already in the table.
                Some(owner) if owner == route_name => continue,
                // Borrow the owning route's raw loader, auto-invoke suppressed.
                Some(owner) => {
                    entries.push_str(&format!(
                        "        {}: {}.require({}, false),\n",
                        js_string(logical),
                        owner,
                        js_string(logical)
                    ));
                }
                None => {
                    let loader = self.embed(logical)?;
                    self.owners.insert(logical.clone(), route_name.to_string());
                    entries.push_str(&format!(
                        "        {}: {},\n",
                        js_string(logical),
                        loader
                    ));
                }
            }
        }

        Ok(Some(format!(
            "{}.require = (path, invoke = true) => {{\n    const table = {{\n{}    }};\n    const entry = table[path];\n    return invoke ? entry() : entry;\n}};",
            route_name, entries
        )))
    }

    /// Builds the inline loader expression for a newly claimed path.
    fn embed(&self, logical: &str) -> Result<String> {
        let relative = logical.strip_prefix(RESOURCE_PREFIX).ok_or_else(|| {
            ExtwebError::resource(logical, format!("must start with '{}'", RESOURCE_PREFIX))
        })?;
        let path = self.assets_dir.join(relative);
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ExtwebError::resource(logical, "missing file extension"))?;
        let kind = ResourceKind::from_extension(&ext).ok_or_else(|| {
            ExtwebError::resource(logical, format!("unsupported resource kind '.{}'", ext))
        })?;

        match kind {
            ResourceKind::Binary(mime) => {
                let bytes = std::fs::read(&path).map_err(|e| {
                    ExtwebError::resource(logical, format!("cannot read '{}': {}", path.display(), e))
                })?;
                Ok(format!(
                    "() => `data:{};base64,{}`",
                    mime,
                    STANDARD.encode(bytes)
                ))
            }
            ResourceKind::Json => {
                let text = read_text(&path, logical)?;
                let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
                    ExtwebError::resource(logical, format!("invalid JSON: {}", e))
                })?;
                Ok(format!("() => ({})", serde_json::to_string(&value)?))
            }
            ResourceKind::Script => {
                let code = read_text(&path, logical)?;
                Ok(format!("() => {{ {} }}", code.trim()))
            }
            ResourceKind::Stylesheet => {
                let css = minify_css(&read_text(&path, logical)?);
                Ok(format!(
                    "() => {{ const css = `<style>{}</style>`; document.head.insertAdjacentHTML('beforeend', css); return css; }}",
                    escape_template(&css)
                ))
            }
        }
    }
}

fn read_text(path: &Path, logical: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ExtwebError::resource(logical, format!("cannot read '{}': {}", path.display(), e))
    })
}
