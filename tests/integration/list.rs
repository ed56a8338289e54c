use wpc_browse::test_utils::PayloadFixture;

use crate::common::{TestWorkspace, serve_json};

#[test]
fn test_list_first_page() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_fixture(&PayloadFixture::browser_page()).unwrap();
    let output = workspace.run(&["list", &source]);

    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("1  Firefox"));
    assert!(output.stdout.contains("2  Chrome"));
    assert!(output.stdout.contains("2 browsers of 3 (use --all to load the rest)"));
}

/// `--all` fetches the remaining pages from the configured API
#[tokio::test(flavor = "multi_thread")]
async fn test_list_all_pages() {
    let (base, server) = serve_json(vec![(200, PayloadFixture::browser_page_two().to_json())]).await.unwrap();
    let workspace = TestWorkspace::new().unwrap();
    workspace.write_home_config(&format!("[api]\nbase_url = \"{base}\"\n")).unwrap();
    let source = workspace.write_fixture(&PayloadFixture::browser_page()).unwrap();

    let output = tokio::task::spawn_blocking(move || workspace.run(&["list", &source, "--all"])).await.unwrap();

    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("3  Safari"));
    assert!(output.stdout.trim_end().ends_with("3 browsers"));

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /api/v1/browsers?page=2 "));
}

/// A failed page fetch is reported and exits non-zero
#[tokio::test(flavor = "multi_thread")]
async fn test_list_all_fetch_error() {
    let (base, server) = serve_json(vec![(500, "{}".to_string())]).await.unwrap();
    let workspace = TestWorkspace::new().unwrap();
    workspace.write_home_config(&format!("[api]\nbase_url = \"{base}\"\n")).unwrap();
    let source = workspace.write_fixture(&PayloadFixture::browser_page()).unwrap();

    let output = tokio::task::spawn_blocking(move || workspace.run(&["list", &source, "--all"])).await.unwrap();

    assert!(!output.success);
    assert!(output.stderr.contains("HTTP 500"));
    assert!(output.stderr.contains("Check the API base URL"));
    server.await.unwrap();
}

#[test]
fn test_list_rejects_single_resource() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_fixture(&PayloadFixture::feature_view()).unwrap();
    let output = workspace.run(&["list", &source]);

    assert!(!output.success);
    assert!(output.stderr.contains("payload is not a collection"));
}
