//! Repository identity arguments shared by the branch commands.

use std::path::PathBuf;

use anyhow::Result;
use bough_core::RepositoryIdentity;
use clap::Args;
use tracing::debug;

const DEFAULT_PROVIDER: &str = "github";

/// Which repository to resolve, and the caller's current branch
#[derive(Args, Debug, Clone)]
pub struct IdentityArgs {
  /// Repository owner (user, organization, group or workspace)
  #[arg(long, value_name = "OWNER", conflicts_with = "url")]
  pub owner: Option<String>,

  /// Repository name
  #[arg(long, value_name = "REPO", conflicts_with = "url")]
  pub repo: Option<String>,

  /// Hosting provider: github, gitlab or bitbucket (defaults to github, or
  /// to the provider detected from a remote)
  #[arg(long, value_name = "PROVIDER")]
  pub provider: Option<String>,

  /// Access token for private repositories and higher rate limits
  #[arg(long, env = "BOUGH_TOKEN", hide_env_values = true, value_name = "TOKEN")]
  pub token: Option<String>,

  /// Remote URL to derive owner, repo and provider from
  #[arg(long, value_name = "URL")]
  pub url: Option<String>,

  /// Repository whose origin remote identifies the repository (defaults to
  /// the current directory)
  #[arg(long, value_name = "PATH", conflicts_with_all = ["owner", "repo", "url"])]
  pub path: Option<PathBuf>,

  /// The branch you are currently on
  #[arg(long, value_name = "BRANCH", default_value = "main")]
  pub current: String,
}

impl IdentityArgs {
  /// Build the repository identity from the arguments.
  ///
  /// Explicit `--owner`/`--repo` win, then `--url`, then the `origin`
  /// remote of `--path` or the current directory. An explicit `--provider`
  /// overrides the one detected from a remote.
  pub fn to_identity(&self) -> Result<RepositoryIdentity> {
    let token = self.token.clone();

    if self.owner.is_some() || self.repo.is_some() {
      return Ok(RepositoryIdentity::new(
        self.owner.clone().unwrap_or_default(),
        self.repo.clone().unwrap_or_default(),
        self.provider.as_deref().unwrap_or(DEFAULT_PROVIDER),
        token,
      ));
    }

    let detected = match &self.url {
      Some(url) => RepositoryIdentity::from_remote_url(url, token)?,
      None => {
        let path = self.path.clone().unwrap_or_else(|| PathBuf::from("."));
        RepositoryIdentity::from_git_origin(&path, token)?
      }
    };
    debug!(identity = %detected, "Detected repository from remote");

    Ok(match &self.provider {
      Some(provider) => RepositoryIdentity::new(
        detected.owner(),
        detected.repo(),
        provider.as_str(),
        self.token.clone(),
      ),
      None => detected,
    })
  }
}
