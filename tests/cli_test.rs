use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use httpmock::prelude::*;

fn gw2_snapshot(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gw2-snapshot"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("gw2-snapshot runs")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn build_server() -> MockServer {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/build");
        then.status(200).body(r#"{"id": 12345}"#);
    });
    server
}

fn write_catalog(dir: &Path) -> String {
    let catalog = dir.join("catalog.txt");
    fs::write(&catalog, "# build only\n/v2/build\n").unwrap();
    catalog.to_string_lossy().into_owned()
}

#[test]
fn successful_run_exits_zero_with_summary_last() {
    let server = build_server();
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());
    let out = dir.path().join("out");

    let output = gw2_snapshot(
        &[
            "--base-url",
            &server.base_url(),
            "--catalog",
            &catalog,
            "--out",
            &out.to_string_lossy(),
            "--no-color",
        ],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().last(), Some("Endpoints responding: 1/1 = 100%"));
    assert!(out.join("v2/build.json").is_file());
}

#[test]
fn zero_concurrency_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    let output = gw2_snapshot(
        &["--base-url", "http://127.0.0.1:1", "--catalog", &catalog, "--concurrency", "0"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Concurrency must be at least 1"));
    assert!(output.stdout.is_empty());
}

#[test]
fn unwritable_output_directory_exits_one() {
    let server = build_server();
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path());
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let output = gw2_snapshot(
        &[
            "--base-url",
            &server.base_url(),
            "--catalog",
            &catalog,
            "--out",
            &blocker.to_string_lossy(),
        ],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: I/O error on"));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Endpoints responding"));
}

#[test]
fn scaffold_rejects_non_rust_input() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("foo.py"), "print('hi')\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gw2-scaffold"))
        .arg("foo.py")
        .current_dir(dir.path())
        .output()
        .expect("gw2-scaffold runs");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Not a Rust source file: foo.py"));
    assert!(output.stdout.is_empty());
}
