//! # Repository Identity
//!
//! The owner/repo/provider/token tuple that keys a branch resolution. Any
//! change to one of the fields invalidates earlier results.
//!
//! Identities can be built directly, parsed from a remote URL (https or
//! scp-style ssh), or discovered from the `origin` remote of a local git
//! repository.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use git2::Repository as Git2Repository;
use url::Url;

use crate::error::ResolveError;
use crate::provider::ProviderKind;

/// Identifies one repository on one hosting provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RepositoryIdentity {
  owner: String,
  repo: String,
  provider: String,
  token: Option<String>,
}

impl RepositoryIdentity {
  /// Create an identity from its raw parts.
  ///
  /// The provider tag is kept as given; it is only interpreted when a request
  /// is built, so unsupported tags surface as an `UnsupportedProvider`
  /// resolution failure rather than a construction error.
  pub fn new(
    owner: impl Into<String>,
    repo: impl Into<String>,
    provider: impl Into<String>,
    token: Option<String>,
  ) -> Self {
    Self {
      owner: owner.into(),
      repo: repo.into(),
      provider: provider.into(),
      token,
    }
  }

  pub fn owner(&self) -> &str {
    &self.owner
  }

  pub fn repo(&self) -> &str {
    &self.repo
  }

  /// The raw provider tag.
  pub fn provider(&self) -> &str {
    &self.provider
  }

  /// Interpret the provider tag.
  pub fn provider_kind(&self) -> Result<ProviderKind, ResolveError> {
    self.provider.parse()
  }

  /// The token, if one is present and not blank.
  pub fn token(&self) -> Option<&str> {
    self.token.as_deref().filter(|token| !token.trim().is_empty())
  }

  /// Whether requests for this identity are authenticated.
  pub fn has_token(&self) -> bool {
    self.token().is_some()
  }

  /// Both owner and repository name are non-empty.
  pub fn is_complete(&self) -> bool {
    !self.owner.trim().is_empty() && !self.repo.trim().is_empty()
  }

  /// Return a copy of this identity carrying a different token.
  pub fn with_token(mut self, token: Option<String>) -> Self {
    self.token = token;
    self
  }

  /// Parse an identity from a remote URL.
  ///
  /// Accepts `https://host/owner/repo(.git)`, `ssh://git@host/owner/repo.git`
  /// and scp-style `git@host:owner/repo.git`. The provider is detected from
  /// the host. GitLab namespaces may be nested (`group/sub/repo`); for the
  /// other providers only the first two path segments are used.
  pub fn from_remote_url(remote_url: &str, token: Option<String>) -> Result<Self> {
    let (host, path) =
      split_remote(remote_url).with_context(|| format!("Could not parse remote URL: {remote_url}"))?;

    let provider = ProviderKind::from_host(&host)
      .with_context(|| format!("Unrecognized hosting provider '{host}' in remote URL: {remote_url}"))?;

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let segments: Vec<&str> = match provider {
      // GitLab puts UI routes behind a `/-/` separator
      ProviderKind::GitLab => path
        .split("/-/")
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect(),
      ProviderKind::GitHub | ProviderKind::Bitbucket => path.split('/').filter(|s| !s.is_empty()).take(2).collect(),
    };

    match segments.as_slice() {
      [namespace @ .., repo] if !namespace.is_empty() => {
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        Ok(Self::new(namespace.join("/"), repo.to_string(), provider.as_str(), token))
      }
      _ => Err(anyhow::anyhow!(
        "Could not extract owner and repo from URL: {remote_url}"
      )),
    }
  }

  /// Discover the identity from the `origin` remote of a local repository.
  pub fn from_git_origin<P: AsRef<Path>>(repo_path: P, token: Option<String>) -> Result<Self> {
    let repo = Git2Repository::discover(repo_path.as_ref())
      .with_context(|| format!("Failed to open git repository at {}", repo_path.as_ref().display()))?;

    let remote = repo.find_remote("origin").context("Failed to find remote 'origin'")?;
    let remote_url = remote.url().context("Remote 'origin' has no URL")?;

    Self::from_remote_url(remote_url, token)
  }
}

impl fmt::Debug for RepositoryIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RepositoryIdentity")
      .field("owner", &self.owner)
      .field("repo", &self.repo)
      .field("provider", &self.provider)
      .field("token", &self.token().map(|_| "<redacted>"))
      .finish()
  }
}

impl fmt::Display for RepositoryIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}/{}", self.provider, self.owner, self.repo)
  }
}

/// Split a remote URL into host and path, handling scp-style syntax.
fn split_remote(remote_url: &str) -> Option<(String, String)> {
  let trimmed = remote_url.trim();

  if let Ok(url) = Url::parse(trimmed)
    && let Some(host) = url.host_str()
  {
    return Some((host.to_string(), url.path().to_string()));
  }

  // scp-style: user@host:path
  let (_, rest) = trimmed.split_once('@')?;
  let (host, path) = rest.split_once(':')?;
  if host.is_empty() || path.starts_with("//") {
    return None;
  }
  Some((host.to_string(), path.to_string()))
}
