// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for the init and build commands.
//!
//! These exercise the scaffolding and compilation pipeline end to end
//! against a project in a temp directory.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use extweb::BuildMode;
use extweb_cli::commands::build::build_in;
use extweb_cli::commands::init;

fn write_route(dir: &Path, name: &str, source: &str) {
    fs::create_dir_all(dir.join("routes")).unwrap();
    fs::write(dir.join("routes").join(format!("{}.html", name)), source).unwrap();
}

#[tokio::test]
async fn init_scaffolds_a_buildable_project() {
    let tmp = tempdir().unwrap();
    let project = tmp.path().join("demo-script");

    init::run(Some(project.to_string_lossy().into_owned()))
        .await
        .unwrap();

    // Scaffolded layout
    assert!(project.join("userscript.json").exists());
    assert!(project.join("routes/Example.html").exists());
    assert!(project.join("assets").is_dir());
    assert!(project.join(".gitignore").exists());

    // Template substitution happened
    let config = fs::read_to_string(project.join("userscript.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&config).unwrap();
    assert_eq!(parsed["name"], "demo-script");

    // The scaffold compiles cleanly
    let output = build_in(&project, BuildMode::Release, true).await.unwrap();
    assert_eq!(output.route_count, 1);
    assert!(output.skipped.is_empty());

    let bundle = fs::read_to_string(&output.files[0]).unwrap();
    assert!(bundle.starts_with("// ==UserScript=="));
    assert!(bundle.contains("// @name         demo-script"));
    assert!(bundle.contains("window.extendApp = extendWebPage([Example]);"));
}

#[tokio::test]
async fn init_refuses_an_existing_project() {
    let tmp = tempdir().unwrap();
    let project = tmp.path().join("taken");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("userscript.json"), "{}").unwrap();

    let err = init::run(Some(project.to_string_lossy().into_owned()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("refusing to overwrite"));
}

#[tokio::test]
async fn init_rejects_unfriendly_names() {
    let tmp = tempdir().unwrap();
    let project = tmp.path().join("bad name");

    let err = init::run(Some(project.to_string_lossy().into_owned()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("URL-friendly"));
}

#[tokio::test]
async fn develop_build_writes_split_artifacts() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::write(
        project.join("userscript.json"),
        r#"{ "name": "dev-demo", "version": "0.1.0" }"#,
    )
    .unwrap();
    write_route(
        project,
        "Main",
        r#"<script routes="[ '*://example.com/*' ]">({ public: {} })</script>"#,
    );

    let output = build_in(project, BuildMode::Develop, true).await.unwrap();
    assert_eq!(output.files.len(), 2);

    let body_path = project.join("dist/dev-demo.dev.js");
    let header_path = project.join("dist/dev-demo.user.js");
    assert!(body_path.exists());
    assert!(header_path.exists());

    // The installable stub requires the body from disk
    let header = fs::read_to_string(&header_path).unwrap();
    assert!(header.contains("// @require"));
    assert!(header.contains("file://"));
    assert!(header.contains("dev-demo.dev.js"));
    assert!(!header.contains("extendWebPage"));

    let body = fs::read_to_string(&body_path).unwrap();
    assert!(body.contains("window.extendApp = extendWebPage([Main]);"));
}

#[tokio::test]
async fn broken_routes_are_reported_not_fatal() {
    let tmp = tempdir().unwrap();
    let project = tmp.path();
    fs::write(
        project.join("userscript.json"),
        r#"{ "name": "mixed", "version": "0.1.0" }"#,
    )
    .unwrap();
    write_route(
        project,
        "Good",
        r#"<script routes="[ '*://a.com/*' ]">({})</script>"#,
    );
    write_route(project, "Bad", "<style>.x{}</style>");

    let output = build_in(project, BuildMode::Release, true).await.unwrap();
    assert_eq!(output.route_count, 1);
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].0, "Bad");
}
