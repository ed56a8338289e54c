use predicates::prelude::*;
use wpc_browse::test_utils::PayloadFixture;

use crate::common::{TestWorkspace, fixture_file};

#[test]
fn test_specs_html() {
    let workspace = TestWorkspace::new().unwrap();

    workspace
        .command()
        .args(["specs", &fixture_file("view_feature_footnotes.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<a href=\"https://drafts.csswg.org/css-backgrounds-3/#border-radius\">CSS Backgrounds and Borders Module Level 3",
        ))
        .stdout(predicate::str::contains("<span class=\"maturity-CR\">Candidate Recommendation</span>"))
        .stdout(predicate::str::contains("<td>Initial definition.</td>"));
}

#[test]
fn test_specs_text_through_references() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_fixture(&PayloadFixture::spec_references()).unwrap();
    let output = workspace.run(&["specs", &source, "--format", "text"]);

    assert!(output.success, "stderr: {}", output.stderr);
    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].contains("Initial definition."));
    assert!(lines[3].contains("Fallback comment."));
}

/// A feature without sections or references renders an empty table
#[test]
fn test_specs_empty_table() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_file("bare.json", r#"{"features": {"id": "9", "name": {"en": "grid"}}}"#).unwrap();

    workspace
        .command()
        .args(["specs", &source])
        .assert()
        .success()
        .stdout(predicate::str::contains("<tbody>\n</tbody>"));
}
