use std::fs;
use std::path::Path;
use std::time::Duration;

use gw2_snapshot::{snapshot, Catalog, Endpoint, Options, RunReport, Summary};
use httpmock::prelude::*;

fn options(out: &Path) -> Options {
    Options {
        concurrency: 4,
        output_dir: out.to_path_buf(),
        color: false,
    }
}

fn run(catalog: &Catalog, out: &Path) -> (RunReport, Vec<String>) {
    let mut console = Vec::new();
    let report = snapshot(catalog, &options(out), &mut console).expect("expected Ok(_)");
    let lines = String::from_utf8(console)
        .expect("console output is UTF-8")
        .lines()
        .map(str::to_string)
        .collect();
    (report, lines)
}

#[test]
fn build_endpoint_is_persisted_with_four_space_indent() {
    let server = MockServer::start();
    let build = server.mock(|when, then| {
        when.method(GET).path("/v2/build");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id": 12345}"#);
    });
    let out = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_paths(&server.base_url(), ["/v2/build"]).unwrap();

    let (report, lines) = run(&catalog, out.path());

    build.assert();
    let artifact = out.path().join("v2/build.json");
    assert_eq!(fs::read_to_string(&artifact).unwrap(), "{\n    \"id\": 12345\n}");
    assert_eq!(report.written, [artifact]);
    assert_eq!(lines[0], format!("[200] {}/v2/build is... ok.", server.base_url()));
    assert_eq!(lines[1], "Endpoints responding: 1/1 = 100%");
}

#[test]
fn not_found_endpoint_writes_nothing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v2/guild/search");
        then.status(404).body(r#"{"text": "no such endpoint"}"#);
    });
    let out = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_paths(&server.base_url(), ["/v2/guild/search"]).unwrap();

    let (report, lines) = run(&catalog, out.path());

    assert!(report.written.is_empty());
    assert_eq!(report.summary, Summary { responding: 0, total: 1 });
    assert!(!out.path().join("v2").exists());
    assert_eq!(
        lines,
        [
            format!("[404] {}/v2/guild/search is... not responding.", server.base_url()),
            "Endpoints responding: 0/1 = 0%".to_string(),
        ]
    );
}

#[test]
fn red_line_for_not_found_when_colored() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v2/guild/search");
        then.status(404);
    });
    let out = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_paths(&server.base_url(), ["/v2/guild/search"]).unwrap();
    let options = Options {
        color: true,
        ..options(out.path())
    };

    let mut console = Vec::new();
    snapshot(&catalog, &options, &mut console).unwrap();
    let console = String::from_utf8(console).unwrap();

    assert!(console.starts_with("[\x1b[0;31m404\x1b[0m]"));
    assert!(console.contains("\x1b[0;31mnot responding\x1b[0m."));
    // The summary line is never colored.
    assert!(console.ends_with("\nEndpoints responding: 0/1 = 0%\n"));
}

#[test]
fn json_suffix_is_not_doubled() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v1/build.json");
        then.status(200).body(r#"{"build_id": 115267}"#);
    });
    let out = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_paths(&server.base_url(), ["/v1/build.json"]).unwrap();

    run(&catalog, out.path());

    assert!(out.path().join("v1/build.json").is_file());
    assert!(!out.path().join("v1/build.json.json").exists());
}

#[test]
fn non_json_body_is_skipped_and_run_continues() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v2/build");
        then.status(200).body("<html>API maintenance</html>");
    });
    server.mock(|when, then| {
        when.path("/v2/colors");
        then.status(200).body("[1, 2, 3]");
    });
    let out = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_paths(&server.base_url(), ["/v2/build", "/v2/colors"]).unwrap();

    let (report, lines) = run(&catalog, out.path());

    assert!(!out.path().join("v2/build.json").exists());
    assert!(out.path().join("v2/colors.json").is_file());
    assert_eq!(report.undecodable, [format!("{}/v2/build", server.base_url())]);
    assert_eq!(lines.len(), 3);
}

#[test]
fn bad_request_and_unauthorized_count_as_responding() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v2/account");
        then.status(401).body(r#"{"text": "Invalid access token"}"#);
    });
    server.mock(|when, then| {
        when.path("/v2/recipes/search");
        then.status(400).body(r#"{"text": "missing input or output"}"#);
    });
    server.mock(|when, then| {
        when.path("/v2/pvp/games");
        then.status(503).body(r#"{"text": "API not active"}"#);
    });
    let out = tempfile::tempdir().unwrap();
    let catalog =
        Catalog::from_paths(&server.base_url(), ["/v2/account", "/v2/recipes/search", "/v2/pvp/games"]).unwrap();

    let (report, lines) = run(&catalog, out.path());

    assert_eq!(report.summary, Summary { responding: 2, total: 3 });
    assert_eq!(lines.last().unwrap(), "Endpoints responding: 2/3 = 66%");
    assert!(out.path().join("v2/account.json").is_file());
    assert!(out.path().join("v2/recipes/search.json").is_file());
    assert!(!out.path().join("v2/pvp").exists());
}

#[test]
fn output_follows_catalog_order_not_completion_order() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v2/slow");
        then.status(200).delay(Duration::from_millis(400)).body("{}");
    });
    for path in ["/v2/a", "/v2/b", "/v2/c", "/v2/d"] {
        server.mock(|when, then| {
            when.path(path);
            then.status(200).body("{}");
        });
    }
    let out = tempfile::tempdir().unwrap();
    let paths = ["/v2/slow", "/v2/a", "/v2/b", "/v2/c", "/v2/d"];
    let catalog = Catalog::from_paths(&server.base_url(), paths).unwrap();

    let (report, lines) = run(&catalog, out.path());

    for (line, path) in lines.iter().zip(paths) {
        assert!(line.contains(&format!("{}{path} ", server.base_url())), "{line} vs {path}");
    }
    let written: Vec<_> = report
        .written
        .iter()
        .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written, ["slow", "a", "b", "c", "d"]);
}

#[test]
fn unreachable_endpoint_does_not_abort_the_batch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v2/build");
        then.status(200).body(r#"{"id": 1}"#);
    });
    let out = tempfile::tempdir().unwrap();
    let catalog: Catalog = [
        Endpoint::new("http://127.0.0.1:1", "/v2/build").unwrap(),
        Endpoint::new(&server.base_url(), "/v2/build").unwrap(),
    ]
    .into_iter()
    .collect();

    let (report, lines) = run(&catalog, out.path());

    assert_eq!(report.transport_failures, ["http://127.0.0.1:1/v2/build"]);
    assert_eq!(report.summary, Summary { responding: 1, total: 2 });
    assert_eq!(lines[0], "[ERR] http://127.0.0.1:1/v2/build is... not responding.");
    assert!(out.path().join("v2/build.json").is_file());
}

#[test]
fn every_endpoint_is_requested_exactly_once() {
    let server = MockServer::start();
    let mocks: Vec<_> = (0..12)
        .map(|i| {
            let path = format!("/v2/items/{i}");
            server.mock(move |when, then| {
                when.path(path);
                then.status(200).body(format!(r#"{{"id": {i}}}"#));
            })
        })
        .collect();
    let out = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_paths(&server.base_url(), (0..12).map(|i| format!("/v2/items/{i}"))).unwrap();

    let (report, _) = run(&catalog, out.path());

    assert_eq!(report.summary.total, catalog.len());
    assert_eq!(report.written.len(), 12);
    for mock in &mocks {
        assert_eq!(mock.hits(), 1);
    }
}

#[test]
fn second_run_produces_identical_artifacts() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v2/worlds");
        then.status(200).body(r#"[{"id": 1001, "name": "Anvil Rock", "population": "Medium"}]"#);
    });
    let out = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_paths(&server.base_url(), ["/v2/worlds"]).unwrap();
    let artifact = out.path().join("v2/worlds.json");

    run(&catalog, out.path());
    let first = fs::read(&artifact).unwrap();
    run(&catalog, out.path());
    let second = fs::read(&artifact).unwrap();

    assert_eq!(first, second);
    assert!(String::from_utf8(second).unwrap().starts_with("[\n    {\n        \"id\": 1001,"));
}

#[test]
fn zero_concurrency_is_a_configuration_error() {
    let out = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_paths("http://127.0.0.1:1", ["/v2/build"]).unwrap();
    let options = Options {
        concurrency: 0,
        ..options(out.path())
    };

    let result = snapshot(&catalog, &options, &mut Vec::new());
    assert!(matches!(result, Err(gw2_snapshot::Error::InvalidConcurrency)));
}

#[test]
fn integers_beyond_64_bits_are_persisted_exactly() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v2/build");
        then.status(200)
            .body(r#"{"id": 123456789012345678901234567890, "coins": 18446744073709551616}"#);
    });
    let out = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_paths(&server.base_url(), ["/v2/build"]).unwrap();

    run(&catalog, out.path());

    assert_eq!(
        fs::read_to_string(out.path().join("v2/build.json")).unwrap(),
        "{\n    \"id\": 123456789012345678901234567890,\n    \"coins\": 18446744073709551616\n}"
    );
}
