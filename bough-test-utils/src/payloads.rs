//! Branch-list payloads shaped like each provider's REST response.
//!
//! Every builder takes `(name, sha)` pairs and fills in the URLs the real
//! APIs return, so tests can assert on the canonical mapping.

use serde_json::{Value, json};

/// `GET /repos/{owner}/{repo}/branches` on GitHub.
pub fn github_branches(owner: &str, repo: &str, branches: &[(&str, &str)]) -> Value {
  Value::Array(
    branches
      .iter()
      .map(|(name, sha)| {
        json!({
          "name": name,
          "commit": {
            "sha": sha,
            "url": format!("https://api.github.com/repos/{owner}/{repo}/commits/{sha}"),
          },
          "protected": false,
        })
      })
      .collect(),
  )
}

/// `GET /projects/{id}/repository/branches` on GitLab.
pub fn gitlab_branches(owner: &str, repo: &str, branches: &[(&str, &str)]) -> Value {
  Value::Array(
    branches
      .iter()
      .map(|(name, sha)| {
        json!({
          "name": name,
          "merged": false,
          "protected": *name == "main",
          "default": *name == "main",
          "commit": {
            "id": sha,
            "short_id": &sha[..sha.len().min(8)],
            "web_url": format!("https://gitlab.com/{owner}/{repo}/-/commit/{sha}"),
          },
        })
      })
      .collect(),
  )
}

/// `GET /repositories/{workspace}/{repo}/refs/branches` on Bitbucket.
pub fn bitbucket_branches(owner: &str, repo: &str, branches: &[(&str, &str)]) -> Value {
  let values: Vec<Value> = branches
    .iter()
    .map(|(name, sha)| {
      json!({
        "name": name,
        "type": "branch",
        "target": {
          "hash": sha,
          "type": "commit",
          "links": {
            "html": { "href": format!("https://bitbucket.org/{owner}/{repo}/commits/{sha}") },
          },
        },
      })
    })
    .collect();

  json!({
    "pagelen": 10,
    "size": values.len(),
    "page": 1,
    "values": values,
  })
}
