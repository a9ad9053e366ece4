// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Build command for compiling a userscript project in release mode.

use console::style;
use extweb::{BuildMode, BuildOutput, Bundler, ProjectConfig};
use std::path::Path;
use std::time::Instant;

/// Runs a release build in the current directory.
pub async fn run(quiet: bool) -> anyhow::Result<()> {
    let working_dir = std::env::current_dir()?;
    let output = build_in(&working_dir, BuildMode::Release, quiet).await?;
    if !quiet {
        println!(
            "{} {}",
            style("Written userscript to:").cyan(),
            output.files[0].display()
        );
    }
    Ok(())
}

/// Compiles `project_dir` in the given mode, printing per-route diagnostics
/// for skipped routes. Shared by the build and dev commands.
pub async fn build_in(
    project_dir: &Path,
    mode: BuildMode,
    quiet: bool,
) -> anyhow::Result<BuildOutput> {
    let config = ProjectConfig::load(project_dir)?;
    let bundler = Bundler::new(project_dir, &config);

    let start = Instant::now();
    let output = bundler.build(mode).await?;
    let elapsed = start.elapsed();

    for (route, message) in &output.skipped {
        eprintln!("{} {}", style("error:").red(), message);
        tracing::debug!(route = %route, "route excluded from the bundle");
    }

    if !quiet {
        println!(
            "{} {} route(s) {}",
            style("Compiled").green(),
            output.route_count,
            style(format!("in {}ms", elapsed.as_millis())).dim()
        );
    }
    Ok(output)
}
