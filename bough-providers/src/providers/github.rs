//! GitHub REST v3 branch listing.

use bough_core::{BranchRecord, ProviderKind};
use serde::Deserialize;
use serde_json::Value;

use super::ProviderStrategy;

/// `GET /repos/{owner}/{repo}/branches`, authenticated with `token`.
#[derive(Debug, Clone, Copy)]
pub struct GitHub;

#[derive(Deserialize)]
struct GitHubBranch {
  name: String,
  commit: GitHubCommitRef,
}

#[derive(Deserialize)]
struct GitHubCommitRef {
  sha: String,
  url: String,
}

impl ProviderStrategy for GitHub {
  fn kind(&self) -> ProviderKind {
    ProviderKind::GitHub
  }

  fn branches_path(&self, owner: &str, repo: &str) -> Vec<String> {
    vec!["repos".into(), owner.into(), repo.into(), "branches".into()]
  }

  fn auth_header(&self, token: &str) -> (&'static str, String) {
    ("Authorization", format!("token {token}"))
  }

  fn branch_elements<'a>(&self, payload: &'a Value) -> Option<&'a [Value]> {
    payload.as_array().map(Vec::as_slice)
  }

  fn normalize_element(&self, element: &Value) -> Result<BranchRecord, serde_json::Error> {
    let branch = GitHubBranch::deserialize(element)?;
    Ok(BranchRecord::new(branch.name, branch.commit.sha, branch.commit.url))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_normalize_element() {
    let element = json!({
        "name": "master",
        "commit": {
            "sha": "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc",
            "url": "https://api.github.com/repos/octocat/Hello-World/commits/c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc"
        },
        "protected": true
    });

    let record = GitHub.normalize_element(&element).unwrap();
    assert_eq!(record.name, "master");
    assert_eq!(record.commit_sha, "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc");
    assert!(record.commit_url.ends_with("/commits/c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc"));
  }

  #[test]
  fn test_missing_commit_is_an_error() {
    let err = GitHub.normalize_element(&json!({ "name": "dev" })).unwrap_err();
    assert!(err.to_string().contains("commit"));
  }

  #[test]
  fn test_branch_elements_requires_array() {
    assert!(GitHub.branch_elements(&json!({ "message": "Not Found" })).is_none());
    assert_eq!(GitHub.branch_elements(&json!([])).map(<[Value]>::len), Some(0));
  }

  #[test]
  fn test_auth_header() {
    assert_eq!(
      GitHub.auth_header("ghp_123"),
      ("Authorization", "token ghp_123".to_string())
    );
  }
}
