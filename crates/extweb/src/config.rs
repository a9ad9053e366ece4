// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project configuration loaded from `userscript.json`.
//!
//! Every extweb project carries a `userscript.json` at its root describing
//! the metadata that ends up in the generated userscript header.
//!
//! # Example Configuration
//!
//! ```json
//! {
//!     "name": "my-userscript",
//!     "version": "1.0.0",
//!     "description": "",
//!     "author": "",
//!     "license": "MIT",
//!     "runAt": "document-body",
//!     "require": [],
//!     "exclude": [],
//!     "grant": []
//! }
//! ```
//!
//! Fields are validated individually so a wrong type produces a diagnostic
//! naming the offending field rather than a generic deserialization error.

use crate::error::{ExtwebError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::path::Path;

/// File name of the project configuration.
pub const CONFIG_FILE: &str = "userscript.json";

lazy_static! {
    static ref URL_FRIENDLY: Regex =
        Regex::new(r#"^[^\s~`!#$%\^&*+=\[\]\{|};:"'<>,/?]+$"#).unwrap();
}

/// Returns true if `name` contains only URL-friendly characters.
///
/// Used by project initialization to reject names that would break the
/// `@require file://` directive emitted in development mode.
pub fn is_url_friendly(name: &str) -> bool {
    URL_FRIENDLY.is_match(name)
}

/// Validated project configuration.
///
/// The bundle assembler treats this as an already-validated precondition;
/// all validation happens in [`ProjectConfig::load`].
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Userscript name; also names the output files in `dist/`.
    pub name: String,
    /// Userscript version string.
    pub version: String,
    /// One-line description.
    pub description: String,
    /// Author string.
    pub author: String,
    /// License identifier.
    pub license: String,
    /// `@run-at` directive value (default `document-body`).
    pub run_at: String,
    /// External `@require` URLs.
    pub require: Vec<String>,
    /// `@exclude` URL patterns.
    pub exclude: Vec<String>,
    /// `@grant` permissions.
    pub grant: Vec<String>,
    /// Optional override for the watch-mode ignore pattern.
    pub ignored: Option<String>,
}

impl ProjectConfig {
    /// Loads and validates `userscript.json` from `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtwebError::Config`] when the file is missing, is not
    /// valid JSON, or a recognized field has the wrong type.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Err(ExtwebError::Config(format!(
                "not found - run in the directory containing {}",
                CONFIG_FILE
            )));
        }
        let data = std::fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&data)
            .map_err(|e| ExtwebError::Config(format!("invalid JSON: {}", e)))?;
        Self::from_value(&value)
    }

    /// Validates a parsed JSON document field by field.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| ExtwebError::Config("top level must be an object".into()))?;

        let string_field = |key: &str, default: &str| -> Result<String> {
            match obj.get(key) {
                None => Ok(default.to_string()),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(ExtwebError::Config(format!(
                    "config item '{}' must be of type string",
                    key
                ))),
            }
        };
        let list_field = |key: &str| -> Result<Vec<String>> {
            match obj.get(key) {
                None => Ok(Vec::new()),
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|v| {
                        v.as_str().map(str::to_string).ok_or_else(|| {
                            ExtwebError::Config(format!(
                                "config item '{}' must be an array of strings",
                                key
                            ))
                        })
                    })
                    .collect(),
                Some(_) => Err(ExtwebError::Config(format!(
                    "config item '{}' must be of type array",
                    key
                ))),
            }
        };

        Ok(Self {
            name: string_field("name", "")?,
            version: string_field("version", "1.0.0")?,
            description: string_field("description", "")?,
            author: string_field("author", "")?,
            license: string_field("license", "")?,
            run_at: string_field("runAt", "document-body")?,
            require: list_field("require")?,
            exclude: list_field("exclude")?,
            grant: list_field("grant")?,
            ignored: match obj.get("ignored") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(_) => {
                    return Err(ExtwebError::Config(
                        "config item 'ignored' must be of type string".into(),
                    ))
                }
            },
        })
    }
}
