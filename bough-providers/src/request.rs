//! # Branch Request Construction
//!
//! Turns a [`RepositoryIdentity`] into a concrete provider request without
//! performing any I/O.

use std::collections::BTreeMap;
use std::fmt;

use bough_core::{ProviderEndpoints, ProviderKind, RepositoryIdentity, ResolveError};
use url::Url;

use crate::consts::ACCEPT_JSON;
use crate::providers::strategy_for;

/// A fully described provider request.
#[derive(Clone, PartialEq, Eq)]
pub struct BranchRequest {
  pub url: Url,
  pub headers: BTreeMap<String, String>,
  pub kind: ProviderKind,
  /// Whether a token header is attached.
  pub authenticated: bool,
}

impl BranchRequest {
  /// Value of the header `name`, matched case-insensitively.
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(key, _)| key.eq_ignore_ascii_case(name))
      .map(|(_, value)| value.as_str())
  }
}

impl fmt::Debug for BranchRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let headers: BTreeMap<&str, &str> = self
      .headers
      .iter()
      .map(|(key, value)| {
        if is_secret_header(key) {
          (key.as_str(), "<redacted>")
        } else {
          (key.as_str(), value.as_str())
        }
      })
      .collect();

    f.debug_struct("BranchRequest")
      .field("url", &self.url.as_str())
      .field("headers", &headers)
      .field("kind", &self.kind)
      .field("authenticated", &self.authenticated)
      .finish()
  }
}

fn is_secret_header(name: &str) -> bool {
  name.eq_ignore_ascii_case("authorization") || name.eq_ignore_ascii_case("private-token")
}

/// Build the branch-list request for `identity`.
///
/// Fails with `UnsupportedProvider` for an unknown provider tag and with
/// `Transport` when the configured base URL cannot hold a path.
pub fn build_branch_request(
  identity: &RepositoryIdentity,
  endpoints: &ProviderEndpoints,
) -> Result<BranchRequest, ResolveError> {
  let kind = identity.provider_kind()?;
  let strategy = strategy_for(kind);

  let base = endpoints.base_url(kind);
  let mut url =
    Url::parse(base).map_err(|e| ResolveError::Transport(format!("invalid {kind} API base URL '{base}': {e}")))?;
  {
    let mut segments = url
      .path_segments_mut()
      .map_err(|()| ResolveError::Transport(format!("{kind} API base URL '{base}' cannot hold a path")))?;
    segments.pop_if_empty();
    for segment in strategy.branches_path(identity.owner(), identity.repo()) {
      segments.push(&segment);
    }
  }

  let mut headers = BTreeMap::new();
  headers.insert("Accept".to_string(), ACCEPT_JSON.to_string());

  let authenticated = match identity.token() {
    Some(token) => {
      let (name, value) = strategy.auth_header(token);
      headers.insert(name.to_string(), value);
      true
    }
    None => false,
  };

  Ok(BranchRequest {
    url,
    headers,
    kind,
    authenticated,
  })
}
