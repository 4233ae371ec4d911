//! Canonical branch records shared by every provider.

use serde::{Deserialize, Serialize};

/// Commit hash placeholder used only by fallback records.
pub const UNKNOWN_SHA: &str = "unknown";

/// Branch names offered when resolution fails.
pub const FALLBACK_BRANCH_NAMES: [&str; 3] = ["main", "master", "develop"];

/// Length of the abbreviated commit hash shown in listings.
pub const SHORT_SHA_LEN: usize = 7;

/// A branch as presented to the picker, independent of the hosting provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
  pub name: String,
  pub commit_sha: String,
  pub commit_url: String,
}

impl BranchRecord {
  pub fn new(name: impl Into<String>, commit_sha: impl Into<String>, commit_url: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      commit_sha: commit_sha.into(),
      commit_url: commit_url.into(),
    }
  }

  /// A record with no known commit, used for the fallback list.
  pub fn placeholder(name: impl Into<String>) -> Self {
    Self::new(name, UNKNOWN_SHA, "")
  }

  /// Whether this record carries the `unknown` sentinel instead of a hash.
  pub fn is_placeholder(&self) -> bool {
    self.commit_sha == UNKNOWN_SHA
  }

  /// First seven characters of the commit hash, or `None` for placeholders.
  pub fn short_sha(&self) -> Option<&str> {
    if self.is_placeholder() {
      return None;
    }
    let end = self
      .commit_sha
      .char_indices()
      .nth(SHORT_SHA_LEN)
      .map_or(self.commit_sha.len(), |(idx, _)| idx);
    Some(&self.commit_sha[..end])
  }
}

/// The default branch set used when resolution fails after a request was made.
pub fn fallback_branches() -> Vec<BranchRecord> {
  FALLBACK_BRANCH_NAMES.into_iter().map(BranchRecord::placeholder).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fallback_branches() {
    let fallback = fallback_branches();
    let names: Vec<&str> = fallback.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["main", "master", "develop"]);
    assert!(fallback.iter().all(|b| b.commit_sha == "unknown" && b.commit_url.is_empty()));
    assert!(fallback.iter().all(BranchRecord::is_placeholder));
  }

  #[test]
  fn test_short_sha() {
    let record = BranchRecord::new("main", "6dcb09b5b57875f334f61aebed695e2e4193db5e", "");
    assert_eq!(record.short_sha(), Some("6dcb09b"));

    let short = BranchRecord::new("main", "abc", "");
    assert_eq!(short.short_sha(), Some("abc"));

    assert_eq!(BranchRecord::placeholder("main").short_sha(), None);
  }
}
