use wpc_browse::test_utils::PayloadFixture;

use crate::common::{TestWorkspace, fixture_file};

#[test]
fn test_inspect_feature_view() {
    let workspace = TestWorkspace::new().unwrap();
    let output = workspace.run(&["inspect", &fixture_file("view_feature_footnotes.json")]);

    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("feature 100 border-radius"));
    assert!(output.stdout.contains("name: en: border-radius, fr: border-radius (coins arrondis)"));
    assert!(output.stdout.contains("links: 2 Versions, 1 Child, 0 References"));
    assert!(output.stdout.contains("specifications: via sections"));
    assert!(output.stdout.contains("languages: en, fr"));
    assert!(output.stdout.contains("maturities"));
}

#[test]
fn test_inspect_collection() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_fixture(&PayloadFixture::browser_page()).unwrap();
    let output = workspace.run(&["inspect", &source]);

    assert!(output.success);
    assert!(output.stdout.starts_with("browsers (2 listed)"));
}
