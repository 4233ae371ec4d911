//! Bitbucket Cloud 2.0 branch listing.

use bough_core::{BranchRecord, ProviderKind};
use serde::Deserialize;
use serde_json::Value;

use super::ProviderStrategy;

/// `GET /repositories/{workspace}/{repo}/refs/branches`, authenticated with a
/// bearer token. Results arrive wrapped in a paginated `values` envelope.
#[derive(Debug, Clone, Copy)]
pub struct Bitbucket;

#[derive(Deserialize)]
struct BitbucketBranch {
  name: String,
  target: BitbucketTarget,
}

#[derive(Deserialize)]
struct BitbucketTarget {
  hash: String,
  links: BitbucketLinks,
}

#[derive(Deserialize)]
struct BitbucketLinks {
  html: BitbucketLink,
}

#[derive(Deserialize)]
struct BitbucketLink {
  href: String,
}

impl ProviderStrategy for Bitbucket {
  fn kind(&self) -> ProviderKind {
    ProviderKind::Bitbucket
  }

  fn branches_path(&self, owner: &str, repo: &str) -> Vec<String> {
    vec![
      "repositories".into(),
      owner.into(),
      repo.into(),
      "refs".into(),
      "branches".into(),
    ]
  }

  fn auth_header(&self, token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
  }

  fn branch_elements<'a>(&self, payload: &'a Value) -> Option<&'a [Value]> {
    payload.get("values")?.as_array().map(Vec::as_slice)
  }

  fn normalize_element(&self, element: &Value) -> Result<BranchRecord, serde_json::Error> {
    let branch = BitbucketBranch::deserialize(element)?;
    Ok(BranchRecord::new(
      branch.name,
      branch.target.hash,
      branch.target.links.html.href,
    ))
  }
}
