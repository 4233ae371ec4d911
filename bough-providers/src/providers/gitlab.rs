//! GitLab REST v4 branch listing.

use bough_core::{BranchRecord, ProviderKind};
use serde::Deserialize;
use serde_json::Value;

use super::ProviderStrategy;

/// `GET /projects/{owner%2Frepo}/repository/branches`, authenticated with a
/// `PRIVATE-TOKEN` header.
#[derive(Debug, Clone, Copy)]
pub struct GitLab;

#[derive(Deserialize)]
struct GitLabBranch {
  name: String,
  commit: GitLabCommit,
}

#[derive(Deserialize)]
struct GitLabCommit {
  id: String,
  web_url: String,
}

impl ProviderStrategy for GitLab {
  fn kind(&self) -> ProviderKind {
    ProviderKind::GitLab
  }

  fn branches_path(&self, owner: &str, repo: &str) -> Vec<String> {
    // The project is addressed by its full path as a single segment
    vec![
      "projects".into(),
      format!("{owner}/{repo}"),
      "repository".into(),
      "branches".into(),
    ]
  }

  fn auth_header(&self, token: &str) -> (&'static str, String) {
    ("PRIVATE-TOKEN", token.to_string())
  }

  fn branch_elements<'a>(&self, payload: &'a Value) -> Option<&'a [Value]> {
    payload.as_array().map(Vec::as_slice)
  }

  fn normalize_element(&self, element: &Value) -> Result<BranchRecord, serde_json::Error> {
    let branch = GitLabBranch::deserialize(element)?;
    Ok(BranchRecord::new(branch.name, branch.commit.id, branch.commit.web_url))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_normalize_element() {
    let element = json!({
        "name": "main",
        "merged": false,
        "commit": {
            "id": "7b5c3cc8be40ee161ae89a06bba6229da1032a0c",
            "short_id": "7b5c3cc",
            "web_url": "https://gitlab.com/gitlab-org/gitlab-test/-/commit/7b5c3cc8be40ee161ae89a06bba6229da1032a0c"
        }
    });

    let record = GitLab.normalize_element(&element).unwrap();
    assert_eq!(record.name, "main");
    assert_eq!(record.commit_sha, "7b5c3cc8be40ee161ae89a06bba6229da1032a0c");
    assert!(record.commit_url.contains("/-/commit/"));
  }

  #[test]
  fn test_github_shaped_element_is_rejected() {
    let element = json!({ "name": "main", "commit": { "sha": "abc", "url": "u" } });
    assert!(GitLab.normalize_element(&element).is_err());
  }

  #[test]
  fn test_project_path_is_one_segment() {
    assert_eq!(
      GitLab.branches_path("group", "project"),
      ["projects", "group/project", "repository", "branches"]
    );
  }
}
