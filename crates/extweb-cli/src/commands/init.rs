// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project initialization command for creating new userscript projects.

use extweb::config::{is_url_friendly, CONFIG_FILE};
use include_dir::{include_dir, Dir, DirEntry};
use std::fs;
use std::path::Path;

static DEFAULT_TEMPLATE: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates/default");

/// Initializes a new userscript project from the built-in template.
pub async fn run(name: Option<String>) -> anyhow::Result<()> {
    // Handle "." or no argument to init in current directory
    let is_current_dir = matches!(name.as_deref(), Some(".") | None);
    let (project_dir, project_name) = resolve_project_path(name)?;

    if !is_url_friendly(&project_name) {
        anyhow::bail!(
            "project name '{}' contains characters that are not URL-friendly",
            project_name
        );
    }

    if project_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!(
            "'{}' already contains a {} - refusing to overwrite",
            project_name,
            CONFIG_FILE
        );
    }

    if project_dir.exists() {
        tracing::info!(
            "Initializing userscript project in existing directory: {}",
            project_name
        );
    } else {
        fs::create_dir_all(&project_dir)?;
        tracing::info!("Created project directory: {}", project_name);
    }

    extract_template(&DEFAULT_TEMPLATE, &project_dir, &project_name)?;

    // Create empty directories that aren't in the template
    fs::create_dir_all(project_dir.join("assets"))?;

    print_success(&project_name, is_current_dir);

    Ok(())
}

fn resolve_project_path(name: Option<String>) -> anyhow::Result<(std::path::PathBuf, String)> {
    match name.as_deref() {
        Some(".") | None => {
            let current_dir = std::env::current_dir()?;
            let dir_name = current_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "my-userscript".to_string());
            Ok((current_dir, dir_name))
        }
        Some(name) => {
            let project_path = Path::new(name).to_path_buf();
            let dir_name = project_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.to_string());
            Ok((project_path, dir_name))
        }
    }
}

fn extract_template(template: &Dir, target: &Path, project_name: &str) -> anyhow::Result<()> {
    for entry in template.entries() {
        extract_entry(entry, target, project_name)?;
    }
    Ok(())
}

fn extract_entry(entry: &DirEntry, target: &Path, project_name: &str) -> anyhow::Result<()> {
    match entry {
        DirEntry::Dir(dir) => {
            let dir_path = target.join(dir.path());
            fs::create_dir_all(&dir_path)?;
            for child in dir.entries() {
                extract_entry(child, target, project_name)?;
            }
        }
        DirEntry::File(file) => {
            let file_path = file.path();
            let file_name = file_path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid file name: {:?}", file_path))?;

            // Handle special file names
            let target_name: &str = match file_name {
                "gitignore" => ".gitignore",
                name if name.ends_with(".tmpl") => &name[..name.len() - 5],
                name => name,
            };

            let target_path = if let Some(parent) = file_path.parent() {
                target.join(parent).join(target_name)
            } else {
                target.join(target_name)
            };

            // Ensure parent directory exists
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let content = file
                .contents_utf8()
                .ok_or_else(|| anyhow::anyhow!("Non-UTF8 file: {:?}", file_path))?;

            // Substitute project name in .tmpl files
            let content = if file_name.ends_with(".tmpl") {
                content.replace("{{project_name}}", project_name)
            } else {
                content.to_string()
            };

            fs::write(&target_path, content)?;
        }
    }
    Ok(())
}

fn print_success(project_name: &str, is_current_dir: bool) {
    println!("Created userscript project: {}", project_name);
    println!();
    println!("Next steps:");
    if !is_current_dir {
        println!("  cd {}", project_name);
    }
    println!("  extweb build");
    println!();
    println!("Then install dist/{}.user.js in your userscript manager.", project_name);
}
