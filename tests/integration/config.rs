use wpc_browse::test_utils::PayloadFixture;

use crate::common::TestWorkspace;

/// `~/.wpc-browse/config.toml` sets the id prefix and root label
#[test]
fn test_home_config_applies() {
    let workspace = TestWorkspace::new().unwrap();
    workspace.write_home_config("[render]\nid_prefix = \"mdn\"\nroot_label = \"Basic\"\n").unwrap();
    let source = workspace.write_fixture(&PayloadFixture::feature_view()).unwrap();

    let output = workspace.run(&["compat", &source]);
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("id=\"mdn-5\""));
    assert!(output.stdout.contains("<td>Basic</td>"));
}

/// `--config` wins over the home file, `--lang` over both
#[test]
fn test_explicit_config_and_lang_override() {
    let workspace = TestWorkspace::new().unwrap();
    workspace.write_home_config("[render]\nid_prefix = \"home\"\n").unwrap();
    let explicit = workspace.write_file("custom.toml", "language = \"de\"\n[render]\nid_prefix = \"custom\"\n").unwrap();
    let source = workspace.write_fixture(&PayloadFixture::feature_view()).unwrap();

    let output = workspace.run(&["--config", &explicit, "compat", &source, "-f", "json"]);
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("\"custom-5\""));
    assert!(!output.stdout.contains("home-5"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let workspace = TestWorkspace::new().unwrap();
    let source = workspace.write_fixture(&PayloadFixture::feature_view()).unwrap();
    let missing = workspace.path().join("absent.toml");

    let output = workspace.run(&["--config", &missing.to_string_lossy(), "compat", &source]);
    assert!(!output.success);
    assert!(output.stderr.contains("Configuration error"));
    assert!(output.stderr.contains("Fix or remove the configuration file"));
}

#[test]
fn test_invalid_home_config_fails() {
    let workspace = TestWorkspace::new().unwrap();
    workspace.write_home_config("language = \n").unwrap();
    let source = workspace.write_fixture(&PayloadFixture::feature_view()).unwrap();

    let output = workspace.run(&["inspect", &source]);
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("Failed to parse"));
}
