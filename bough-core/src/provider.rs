//! Source-control hosting providers known to bough.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// The closed set of hosting providers that have a branch-listing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
  GitHub,
  GitLab,
  Bitbucket,
}

impl ProviderKind {
  /// All supported providers, in display order.
  pub const ALL: [ProviderKind; 3] = [Self::GitHub, Self::GitLab, Self::Bitbucket];

  /// The lowercase tag used on the command line and in identities.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::GitHub => "github",
      Self::GitLab => "gitlab",
      Self::Bitbucket => "bitbucket",
    }
  }

  /// The public web host of the provider.
  pub const fn web_host(self) -> &'static str {
    match self {
      Self::GitHub => "github.com",
      Self::GitLab => "gitlab.com",
      Self::Bitbucket => "bitbucket.org",
    }
  }

  /// Detect a provider from a remote host name such as `github.com`.
  pub fn from_host(host: &str) -> Option<Self> {
    let host = host.trim().trim_start_matches("www.").to_ascii_lowercase();
    Self::ALL.into_iter().find(|kind| kind.web_host() == host)
  }
}

impl fmt::Display for ProviderKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ProviderKind {
  type Err = ResolveError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "github" => Ok(Self::GitHub),
      "gitlab" => Ok(Self::GitLab),
      "bitbucket" => Ok(Self::Bitbucket),
      _ => Err(ResolveError::UnsupportedProvider(s.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_known_providers() {
    assert_eq!("github".parse::<ProviderKind>().unwrap(), ProviderKind::GitHub);
    assert_eq!("GitLab".parse::<ProviderKind>().unwrap(), ProviderKind::GitLab);
    assert_eq!(" bitbucket ".parse::<ProviderKind>().unwrap(), ProviderKind::Bitbucket);
  }

  #[test]
  fn test_parse_unsupported_provider_names_the_kind() {
    let err = "gitea".parse::<ProviderKind>().unwrap_err();
    assert_eq!(err, ResolveError::UnsupportedProvider("gitea".into()));
  }

  #[test]
  fn test_from_host() {
    assert_eq!(ProviderKind::from_host("github.com"), Some(ProviderKind::GitHub));
    assert_eq!(ProviderKind::from_host("www.GitLab.com"), Some(ProviderKind::GitLab));
    assert_eq!(ProviderKind::from_host("bitbucket.org"), Some(ProviderKind::Bitbucket));
    assert_eq!(ProviderKind::from_host("example.com"), None);
  }
}
