//! # Provider Strategies
//!
//! One strategy per hosting provider. A strategy knows where the provider
//! lists branches, how it authenticates, and how one element of its branch
//! payload maps onto a [`BranchRecord`]. Adding a provider means adding a
//! module here and a [`ProviderKind`] variant; nothing else branches on the
//! provider.

use bough_core::{BranchRecord, ProviderKind};
use serde_json::Value;

mod bitbucket;
mod github;
mod gitlab;

pub use bitbucket::Bitbucket;
pub use github::GitHub;
pub use gitlab::GitLab;

/// Provider-specific request and payload knowledge.
pub trait ProviderStrategy: Send + Sync {
  /// The provider this strategy serves.
  fn kind(&self) -> ProviderKind;

  /// Path segments, relative to the API base URL, of the branch listing.
  ///
  /// Segments are percent-encoded when appended, so a segment may contain
  /// `/` (GitLab project paths rely on this).
  fn branches_path(&self, owner: &str, repo: &str) -> Vec<String>;

  /// Header carrying `token`.
  fn auth_header(&self, token: &str) -> (&'static str, String);

  /// The branch elements inside a successful response body, or `None` when
  /// the body does not have the provider's shape.
  fn branch_elements<'a>(&self, payload: &'a Value) -> Option<&'a [Value]>;

  /// Convert one branch element into the canonical record.
  fn normalize_element(&self, element: &Value) -> Result<BranchRecord, serde_json::Error>;
}

/// The strategy for `kind`.
pub fn strategy_for(kind: ProviderKind) -> &'static dyn ProviderStrategy {
  match kind {
    ProviderKind::GitHub => &GitHub,
    ProviderKind::GitLab => &GitLab,
    ProviderKind::Bitbucket => &Bitbucket,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_strategy_for_matches_kind() {
    for kind in ProviderKind::ALL {
      assert_eq!(strategy_for(kind).kind(), kind);
    }
  }
}
