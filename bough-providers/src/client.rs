//! # Branch List Client
//!
//! Executes branch-list requests against a provider and classifies the
//! outcome. One call per invocation, never retried; the whole exchange is
//! bounded by the configured timeout.

use std::time::Duration;

use bough_core::{BoughConfig, BranchRecord, ProviderEndpoints, RepositoryIdentity, ResolveError};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::consts::{DEFAULT_TIMEOUT_SECS, USER_AGENT};
use crate::normalize::normalize_branches;
use crate::request::{BranchRequest, build_branch_request};

/// Fetches and normalizes branch lists.
#[derive(Debug, Clone)]
pub struct BranchClient {
  pub(crate) client: Client,
  pub(crate) endpoints: ProviderEndpoints,
  pub(crate) timeout: Duration,
  pub(crate) strict: bool,
}

impl BranchClient {
  /// Create a client for the given provider endpoints with default settings.
  pub fn new(endpoints: ProviderEndpoints) -> Self {
    let client = Client::new();
    Self {
      client,
      endpoints,
      timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      strict: false,
    }
  }

  /// Create a client from user settings.
  pub fn from_config(config: &BoughConfig) -> Self {
    Self::new(config.providers.clone())
      .with_timeout(config.request_timeout())
      .with_strict_parsing(config.strict_parsing)
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Fail the whole list on the first malformed element.
  pub fn with_strict_parsing(mut self, strict: bool) -> Self {
    self.strict = strict;
    self
  }

  pub fn endpoints(&self) -> &ProviderEndpoints {
    &self.endpoints
  }

  /// Describe the request for `identity` without sending it.
  pub fn build_request(&self, identity: &RepositoryIdentity) -> Result<BranchRequest, ResolveError> {
    build_branch_request(identity, &self.endpoints)
  }

  /// Send `request` and return the parsed JSON body of a 2xx response.
  #[instrument(skip(self, request), fields(url = %request.url, provider = %request.kind))]
  pub async fn fetch(&self, request: &BranchRequest) -> Result<Value, ResolveError> {
    match tokio::time::timeout(self.timeout, self.send(request)).await {
      Ok(result) => result,
      Err(_) => {
        warn!("Branch request timed out after {:?}", self.timeout);
        Err(ResolveError::Transport(format!(
          "request timed out after {}s",
          self.timeout.as_secs_f64()
        )))
      }
    }
  }

  async fn send(&self, request: &BranchRequest) -> Result<Value, ResolveError> {
    let mut builder = self.client.get(request.url.clone()).header("User-Agent", USER_AGENT);
    for (name, value) in &request.headers {
      builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder
      .send()
      .await
      .map_err(|e| ResolveError::Transport(e.to_string()))?;

    let status = response.status();
    debug!(%status, "Provider responded");
    if let Some(error) = classify_status(status, request.authenticated) {
      return Err(error);
    }

    let body = response
      .bytes()
      .await
      .map_err(|e| ResolveError::Transport(e.to_string()))?;
    serde_json::from_slice(&body).map_err(|e| ResolveError::Transport(format!("invalid JSON response: {e}")))
  }

  /// Build, fetch and normalize the branch list for `identity`.
  #[instrument(skip(self), fields(identity = %identity))]
  pub async fn list_branches(&self, identity: &RepositoryIdentity) -> Result<Vec<BranchRecord>, ResolveError> {
    let request = self.build_request(identity)?;
    let payload = self.fetch(&request).await?;
    normalize_branches(request.kind, &payload, self.strict)
  }
}

/// Map a response status onto the resolution error vocabulary.
///
/// Returns `None` for 2xx.
pub fn classify_status(status: StatusCode, authenticated: bool) -> Option<ResolveError> {
  if status.is_success() {
    return None;
  }

  let error = match status {
    StatusCode::NOT_FOUND => ResolveError::NotFound,
    StatusCode::FORBIDDEN if authenticated => ResolveError::AccessDenied,
    StatusCode::FORBIDDEN => ResolveError::AuthRequired,
    StatusCode::TOO_MANY_REQUESTS => ResolveError::RateLimited,
    other => ResolveError::RequestFailed(
      other
        .canonical_reason()
        .map_or_else(|| other.as_str().to_string(), str::to_string),
    ),
  };
  Some(error)
}
