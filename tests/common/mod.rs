//! Common test utilities for wpc-browse integration tests
//!
//! [`TestWorkspace`] owns a temporary directory that doubles as `HOME` for
//! the binary, so a developer's own `~/.wpc-browse/config.toml` never leaks
//! into a test run.

// Allow dead code because not every test file uses every helper
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wpc_browse::test_utils::PayloadFixture;

/// Captured result of one binary invocation.
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// A temporary directory holding payloads and configuration.
pub struct TestWorkspace {
    temp: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write a canned payload and return its path as a string argument.
    pub fn write_fixture(&self, fixture: &PayloadFixture) -> Result<String> {
        let path = fixture.write_to(self.path())?;
        Ok(path.to_string_lossy().into_owned())
    }

    /// Write arbitrary file content relative to the workspace.
    pub fn write_file(&self, name: &str, content: &str) -> Result<String> {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path.to_string_lossy().into_owned())
    }

    /// Write `~/.wpc-browse/config.toml` inside the fake home.
    pub fn write_home_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.path().join(".wpc-browse").join("config.toml");
        self.write_file(".wpc-browse/config.toml", content)?;
        Ok(path)
    }

    /// The binary with `HOME` pointed at the workspace and logging unset.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("wpc-browse").expect("binary is built");
        cmd.env("HOME", self.path()).env("USERPROFILE", self.path()).env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> CommandOutput {
        let output = self.command().args(args).output().expect("binary runs");
        CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Path of a JSON file under `tests/fixtures/`.
pub fn fixture_file(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name).to_string_lossy().into_owned()
}

/// Serve canned JSON responses, one per connection, and collect the request heads.
pub async fn serve_json(responses: Vec<(u16, String)>) -> Result<(String, JoinHandle<Vec<String>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            requests.push(String::from_utf8_lossy(&buf).into_owned());

            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/vnd.api+json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        requests
    });
    Ok((base, handle))
}
