//! Git repository management for testing
//!
//! Temporary git repositories with configurable remotes, used to exercise
//! identity discovery from a working copy.

use std::path::Path;

use anyhow::Result;
use git2::Repository;
use tempfile::TempDir;

/// A test guard that owns a temporary git repository.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new test git repository
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repo = Repository::init(temp_dir.path()).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Bough Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "bough-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_dir.path().join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Point the repository's `origin` remote at `url`, creating it if needed.
pub fn set_origin(repo: &Repository, url: &str) -> Result<()> {
  if repo.find_remote("origin").is_ok() {
    repo.remote_set_url("origin", url)?;
  } else {
    repo.remote("origin", url)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_set_origin_twice() {
    let guard = GitRepoTestGuard::new();
    set_origin(&guard.repo, "https://github.com/a/b.git").unwrap();
    set_origin(&guard.repo, "https://gitlab.com/c/d.git").unwrap();

    let remote = guard.repo.find_remote("origin").unwrap();
    assert_eq!(remote.url(), Some("https://gitlab.com/c/d.git"));
  }
}
