//! Conformance tests: runs every YAML fixture under `ext/test/fixtures`.
//!
//! Run with: cargo test -p rure-test --test conformance

use rure_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn load(path: &Path) -> Vec<Fixture> {
    let yaml = fs::read_to_string(path).expect("read yaml");
    Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    })
}

fn run_file(name: &str) {
    let path = fixtures_dir().join(name);
    for fixture in load(&path) {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn basics() {
    run_file("basics.yaml");
}

#[test]
fn flags() {
    run_file("flags.yaml");
}

#[test]
fn bounds() {
    run_file("bounds.yaml");
}

#[test]
fn empty_matches() {
    run_file("empty.yaml");
}

#[test]
fn errors() {
    run_file("errors.yaml");
}

#[test]
fn every_fixture_file_parses() {
    let dir = fixtures_dir();
    assert!(dir.exists(), "Fixtures directory does not exist: {}", dir.display());

    let mut total = 0;
    for entry in fs::read_dir(&dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        if !path
            .extension()
            .map_or(false, |e| e == "yaml" || e == "yml")
        {
            continue;
        }
        let fixtures = load(&path);
        assert!(!fixtures.is_empty(), "{} holds no fixtures", path.display());
        total += fixtures.len();
    }
    assert!(total > 0, "no fixtures found in {}", dir.display());
}

#[test]
fn failures_are_reported_per_case() {
    let fixture = Fixture::from_yaml(
        r#"
name: deliberately wrong
pattern: 'b'
cases:
  - name: right
    text: "ab"
    expect:
      - span: [1, 2]
  - name: wrong
    text: "ab"
    expect:
      - span: [0, 1]
"#,
    )
    .unwrap();

    let results = fixture.run();
    // Lazy and eager capture modes each run both cases.
    assert_eq!(results.len(), 4);
    let failed: Vec<_> = results.iter().filter(|r| !r.passed).collect();
    assert_eq!(failed.len(), 2);
    assert!(failed.iter().all(|r| r.case_name == "wrong"));
}
