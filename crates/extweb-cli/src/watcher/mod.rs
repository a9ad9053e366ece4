// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! File system watching for rebuild-on-change.
//!
//! This module provides `FileWatcher` for monitoring a userscript project
//! and triggering rebuilds.
//!
//! # Features
//!
//! - Debounced file change events (750ms)
//! - Filters for relevant file types (.html, .css, .js, .json)
//! - Ignore pattern for build output and editor noise
//! - Recursive directory watching

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebouncedEvent, Debouncer, RecommendedCache};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

/// The default ignore pattern applied when the project config declares none.
pub const DEFAULT_IGNORED: &str = r"dist|\.DS_Store|\.idea|\.vscode|node_modules|\.git";

/// Watches a project directory for changes to route sources and assets.
///
/// Uses debouncing to prevent multiple rapid rebuilds and filters events to
/// only trigger on relevant file types.
pub struct FileWatcher {
    // RecommendedCache, not FileIdMap: new_debouncer picks the platform
    // cache, which is NoCache on Linux.
    #[allow(dead_code)]
    debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
    #[allow(dead_code)]
    rx: mpsc::Receiver<Result<Vec<DebouncedEvent>, Vec<notify::Error>>>,
}

impl FileWatcher {
    /// Creates a new file watcher for the given project directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Project directory to watch recursively
    /// * `ignored` - Regex of path fragments to ignore (defaults applied by
    ///   the caller)
    /// * `on_change` - Callback invoked with the changed paths
    pub fn new<F>(path: &Path, ignored: Regex, on_change: F) -> anyhow::Result<Self>
    where
        F: Fn(Vec<PathBuf>) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let base_path = path.to_path_buf();

        let mut debouncer = new_debouncer(
            Duration::from_millis(750),
            None,
            move |result: Result<Vec<DebouncedEvent>, Vec<notify::Error>>| {
                if let Ok(events) = &result {
                    let changed_paths: Vec<PathBuf> = events
                        .iter()
                        .flat_map(|e| e.paths.iter())
                        .filter(|p| {
                            let ext = p.extension().and_then(|e| e.to_str());
                            matches!(ext, Some("html") | Some("css") | Some("js") | Some("json"))
                        })
                        .filter(|p| {
                            let relative = p.strip_prefix(&base_path).unwrap_or(p);
                            !ignored.is_match(&relative.to_string_lossy())
                        })
                        .map(|p| p.strip_prefix(&base_path).unwrap_or(p).to_path_buf())
                        .collect();

                    if !changed_paths.is_empty() {
                        on_change(changed_paths);
                    }
                }
                let _ = tx.send(result);
            },
        )?;

        debouncer.watch(path, RecursiveMode::Recursive)?;

        Ok(Self { debouncer, rx })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn watcher_starts_on_a_real_directory() {
        let dir = TempDir::new().unwrap();
        let ignored = Regex::new(DEFAULT_IGNORED).unwrap();
        let watcher = FileWatcher::new(dir.path(), ignored, |_paths| {});
        assert!(watcher.is_ok());
    }
}
