use predicates::prelude::*;
use wpc_browse::test_utils::PayloadFixture;

use crate::common::{TestWorkspace, fixture_file, serve_json};

/// Default output is the HTML fragment
#[test]
fn test_compat_html() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_fixture(&PayloadFixture::feature_view()).unwrap();

    workspace
        .command()
        .args(["compat", &source])
        .assert()
        .success()
        .stdout(predicate::str::contains("<div class=\"compat-panel\" id=\"wpc-compat-5\">"))
        .stdout(predicate::str::contains("<th>Firefox</th>"))
        .stdout(predicate::str::contains("id=\"wpc-compat-5-note-1\""));
}

/// The footnotes revision shows the inline note and numbered footnotes
#[test]
fn test_compat_text_footnotes_revision() {
    let workspace = TestWorkspace::new().unwrap();
    let output = workspace.run(&["compat", &fixture_file("view_feature_footnotes.json"), "--format", "text"]);

    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.starts_with("Desktop Browsers\n"));
    assert!(output.stdout.contains("1.0 -moz- (prefixed) [1]"));
    assert!(output.stdout.contains("9.0"));
    assert!(output.stdout.contains("4.0 (partial) [2]"));
    assert!(output.stdout.contains("Elliptical corners This deprecated API should no longer be used"));
    assert!(output.stdout.contains("[1] Firefox 1.0 to 3.6 need the -moz- prefix."));
    assert!(output.stdout.contains("[2] Percentages are not supported."));
}

/// A missing cell renders as the unknown marker
#[test]
fn test_compat_unknown_cell() {
    let workspace = TestWorkspace::new().unwrap();
    let output = workspace.run(&["compat", &fixture_file("view_feature_footnotes.json"), "-f", "text"]);

    let row = output.stdout.lines().find(|line| line.starts_with("Elliptical corners")).unwrap();
    assert!(row.trim_end().ends_with('?'));
}

/// Release notes turn the version into a link, footnote ids use the revision's label
#[test]
fn test_compat_html_footnotes_revision() {
    let workspace = TestWorkspace::new().unwrap();

    workspace
        .command()
        .args(["compat", &fixture_file("view_feature_footnotes.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("<a href=\"https://developer.mozilla.org/Firefox/Releases/4\">4.0</a>"))
        .stdout(predicate::str::contains("<p id=\"wpc-compat-100-footnote-2\">"))
        .stdout(predicate::str::contains("<span class=\"support-note\">(prefixed)</span>"));
}

#[test]
fn test_compat_json() {
    let workspace = TestWorkspace::new().unwrap();
    let output = workspace.run(&["compat", &fixture_file("view_feature_footnotes.json"), "-f", "json"]);
    assert!(output.success);

    let table: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(table["id"], "wpc-compat-100");
    assert_eq!(table["tabs"][0]["id"], "wpc-compat-100_0");
    assert_eq!(table["tabs"][0]["rows"][1]["cells"][1]["state"], "unknown");
    assert_eq!(table["notes"].as_array().map(Vec::len), Some(2));
}

/// `--lang` resolves translated labels
#[test]
fn test_compat_language() {
    let workspace = TestWorkspace::new().unwrap();
    let output = workspace.run(&["--lang", "fr", "compat", &fixture_file("view_feature_footnotes.json"), "-f", "text"]);

    assert!(output.success);
    assert!(output.stdout.contains("Coins elliptiques"));
    // Untranslated strings fall back to English
    assert!(output.stdout.contains("Internet Explorer"));
}

/// SOURCE may be a URL; the request asks for JSON:API
#[tokio::test(flavor = "multi_thread")]
async fn test_compat_from_url() {
    let (base, server) = serve_json(vec![(200, PayloadFixture::feature_view().to_json())]).await.unwrap();
    let workspace = TestWorkspace::new().unwrap();
    let url = format!("{base}/api/v1/view_features/5");

    let output = tokio::task::spawn_blocking(move || {
        let output = workspace.run(&["compat", &url, "-f", "text", "--tab", "Mobile Browsers"]);
        drop(workspace);
        output
    })
    .await
    .unwrap();

    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Safari Mobile"));
    assert!(output.stdout.contains("7.0"));

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET /api/v1/view_features/5 "));
    assert!(requests[0].to_lowercase().contains("accept: application/vnd.api+json"));
}
