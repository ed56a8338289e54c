use predicates::prelude::*;
use wpc_browse::test_utils::PayloadFixture;

use crate::common::{TestWorkspace, fixture_file};

#[test]
fn test_missing_source_file() {
    let workspace = TestWorkspace::new().unwrap();

    workspace
        .command()
        .args(["inspect", "does-not-exist.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("I/O error"))
        .stderr(predicate::str::contains("Check that the file exists"));
}

#[test]
fn test_invalid_json() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_file("broken.json", "{\"features\": ").unwrap();

    workspace
        .command()
        .args(["compat", &source])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Check that the input is valid JSON"));
}

#[test]
fn test_unknown_resource_type_suggestion() {
    let workspace = TestWorkspace::new().unwrap();

    workspace
        .command()
        .args(["inspect", &fixture_file("misspelled_type.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown resource type: featurs"))
        .stderr(predicate::str::contains("Did you mean 'features'?"));
}

/// Specification payloads without compat metadata cannot render a compat table
#[test]
fn test_compat_without_compat_table() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_fixture(&PayloadFixture::spec_references()).unwrap();

    workspace
        .command()
        .args(["compat", &source])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Payload has no compat_table metadata"))
        .stderr(predicate::str::contains("view_features"));
}

#[test]
fn test_specs_on_collection() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_fixture(&PayloadFixture::browser_page()).unwrap();

    workspace
        .command()
        .args(["specs", &source])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Payload has no primary resource"));
}

/// Warnings for missing related data go to stderr, output still succeeds
#[test]
fn test_missing_related_data_warns() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace
        .write_file(
            "partial.json",
            r#"{
                "features": {"id": "1", "name": {"en": "grid"}, "links": {"children": ["2"], "supports": ["10"]}},
                "linked": {"browsers": [{"id": "7", "name": {"en": "Firefox"}}]},
                "meta": {"compat_table": {
                    "tabs": [{"name": {"en": "Desktop"}, "browsers": ["7"]}],
                    "supports": {"1": {"7": ["10"]}},
                    "notes": {}
                }}
            }"#,
        )
        .unwrap();

    workspace
        .command()
        .args(["compat", &source, "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Basic support  ?"))
        .stderr(predicate::str::contains("WARN"));
}
