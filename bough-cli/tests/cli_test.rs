use std::str;

use anyhow::Result;
use assert_cmd::cargo::cargo_bin_cmd;
use bough_test_utils::payloads;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `bough` command isolated from the user's configuration and tokens.
fn bough(config_home: &TempDir) -> assert_cmd::Command {
  let mut cmd = cargo_bin_cmd!("bough");
  cmd
    .env("NO_COLOR", "1")
    .env("XDG_CONFIG_HOME", config_home.path())
    .env("XDG_CACHE_HOME", config_home.path())
    .env_remove("BOUGH_TOKEN")
    .env_remove("BOUGH_GITHUB_API_URL")
    .env_remove("BOUGH_GITLAB_API_URL")
    .env_remove("BOUGH_BITBUCKET_API_URL")
    .env_remove("BOUGH_REQUEST_TIMEOUT_SECS");
  cmd
}

#[test]
fn incomplete_identity_keeps_current_branch() -> Result<()> {
  let home = TempDir::new()?;

  bough(&home)
    .args(["branches", "--owner", "octocat", "--current", "trunk"])
    .assert()
    .success()
    .stderr(predicate::str::contains("Repository information is incomplete"))
    .stdout(predicate::str::contains("Will use: trunk"))
    .stdout(predicate::str::contains("develop").not());

  Ok(())
}

#[test]
fn unsupported_provider_shows_default_branches() -> Result<()> {
  let home = TempDir::new()?;

  bough(&home)
    .args(["branches", "--owner", "o", "--repo", "r", "--provider", "gitea"])
    .assert()
    .success()
    .stderr(predicate::str::contains("Unsupported repository type: gitea"))
    .stdout(predicate::str::contains("master"))
    .stdout(predicate::str::contains("develop"))
    .stdout(predicate::str::contains("Will use: main"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn lists_branches_as_json() -> Result<()> {
  let mock_server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/repos/octocat/hello/branches"))
    .and(header("Authorization", "token ghp_cli"))
    .respond_with(ResponseTemplate::new(200).set_body_json(payloads::github_branches(
      "octocat",
      "hello",
      &[("main", "6dcb09b5b57875f334f61aebed695e2e4193db5e"), ("feature/x", "abc")],
    )))
    .expect(1)
    .mount(&mock_server)
    .await;

  let home = TempDir::new()?;
  let uri = mock_server.uri();
  let output = tokio::task::spawn_blocking(move || {
    bough(&home)
      .env("BOUGH_GITHUB_API_URL", uri)
      .env("BOUGH_TOKEN", "ghp_cli")
      .args(["branches", "--owner", "octocat", "--repo", "hello", "--format", "json"])
      .assert()
      .success()
      .get_output()
      .clone()
  })
  .await?;

  let listing: Value = serde_json::from_str(str::from_utf8(&output.stdout)?)?;
  assert_eq!(listing["status"], "success");
  assert_eq!(listing["branches"][0]["name"], "main");
  assert_eq!(
    listing["branches"][0]["commit_sha"],
    "6dcb09b5b57875f334f61aebed695e2e4193db5e"
  );
  assert_eq!(listing["branches"][1]["name"], "feature/x");
  assert_eq!(listing["selected"], "main");
  assert!(listing.get("error").is_none());

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_reports_error_kind_in_json() -> Result<()> {
  let mock_server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(404))
    .mount(&mock_server)
    .await;

  let home = TempDir::new()?;
  let uri = mock_server.uri();
  let output = tokio::task::spawn_blocking(move || {
    bough(&home)
      .env("BOUGH_BITBUCKET_API_URL", uri)
      .args(["branches", "--url", "git@bitbucket.org:team/gone.git", "--format", "json"])
      .assert()
      .success()
      .get_output()
      .clone()
  })
  .await?;

  let listing: Value = serde_json::from_str(str::from_utf8(&output.stdout)?)?;
  assert_eq!(listing["status"], "failure");
  assert_eq!(listing["error_kind"], "not_found");
  assert_eq!(listing["error"], "Repository not found or no access");
  assert_eq!(listing["branches"].as_array().map(Vec::len), Some(3));
  assert_eq!(listing["branches"][0]["commit_sha"], "unknown");

  Ok(())
}

#[test]
fn pick_with_incomplete_identity_keeps_current() -> Result<()> {
  let home = TempDir::new()?;

  let assert = bough(&home)
    .args(["pick", "--repo", "hello", "--current", "release"])
    .assert()
    .success()
    .stderr(predicate::str::contains("Repository information is incomplete"))
    .stderr(predicate::str::contains("Will use: release"));

  let stdout = str::from_utf8(&assert.get_output().stdout)?;
  assert_eq!(stdout, "release\n");

  Ok(())
}

#[test]
fn config_path_points_into_config_home() -> Result<()> {
  let home = TempDir::new()?;

  let assert = bough(&home).args(["config", "path"]).assert().success();
  let stdout = str::from_utf8(&assert.get_output().stdout)?;
  assert!(stdout.trim().ends_with("config.toml"));
  if cfg!(target_os = "linux") {
    assert!(stdout.trim().starts_with(home.path().to_str().unwrap_or_default()));
  }

  Ok(())
}

#[test]
fn config_show_applies_env_overrides() -> Result<()> {
  let home = TempDir::new()?;

  bough(&home)
    .env("BOUGH_REQUEST_TIMEOUT_SECS", "7")
    .args(["config", "show"])
    .assert()
    .success()
    .stdout(predicate::str::contains("request_timeout_secs = 7"))
    .stdout(predicate::str::contains("https://api.github.com"));

  Ok(())
}

#[test]
fn outside_a_repository_without_identity_fails() -> Result<()> {
  let home = TempDir::new()?;
  let not_a_repo = TempDir::new()?;

  bough(&home)
    .current_dir(not_a_repo.path())
    .args(["branches"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to open git repository"));

  Ok(())
}
