// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Development build command with optional watch mode.

use console::style;
use extweb::{BuildMode, ProjectConfig};
use regex::Regex;
use std::path::PathBuf;

use crate::commands::build::build_in;
use crate::watcher::{FileWatcher, DEFAULT_IGNORED};

/// Runs a development build, optionally watching for changes.
pub async fn run(watch: bool, quiet: bool) -> anyhow::Result<()> {
    let working_dir = std::env::current_dir()?;

    let output = build_in(&working_dir, BuildMode::Develop, quiet).await?;
    if !quiet {
        for file in &output.files {
            println!(
                "{} {}",
                style("Written:").cyan(),
                file.display()
            );
        }
    }

    if !watch {
        return Ok(());
    }

    let config = ProjectConfig::load(&working_dir)?;
    let ignored = Regex::new(config.ignored.as_deref().unwrap_or(DEFAULT_IGNORED))
        .map_err(|e| anyhow::anyhow!("config item 'ignored' is not a valid pattern: {}", e))?;

    // Single-slot queue: a change during a rebuild coalesces into one
    // pending rebuild instead of piling up.
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Vec<PathBuf>>(1);

    let _watcher = FileWatcher::new(&working_dir, ignored, move |paths| {
        let _ = tx.try_send(paths);
    })?;

    if !quiet {
        println!(
            "{} {}",
            style("Status:").cyan(),
            style("Watching for changes...").dim()
        );
    }

    loop {
        tokio::select! {
            changed = rx.recv() => {
                let Some(paths) = changed else { break };
                if !quiet {
                    let display = paths
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("{} {}", style("Changed:").cyan(), style(display).dim());
                }
                if let Err(e) = build_in(&working_dir, BuildMode::Develop, quiet).await {
                    eprintln!("{} {}", style("error:").red(), e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                if !quiet {
                    println!();
                    println!("{}", style("Stopped.").dim());
                }
                break;
            }
        }
    }

    Ok(())
}
