//! # Resolution Errors
//!
//! The closed error vocabulary shared by every stage of branch resolution.
//! Each variant maps to one [`ErrorKind`] and carries a human readable
//! message that the picker can show verbatim.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Fieldless classification of a [`ResolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  UnsupportedProvider,
  NotFound,
  AuthRequired,
  AccessDenied,
  RateLimited,
  RequestFailed,
  TransportError,
  MalformedBranchData,
  IncompleteIdentity,
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Self::UnsupportedProvider => "unsupported provider",
      Self::NotFound => "not found",
      Self::AuthRequired => "authentication required",
      Self::AccessDenied => "access denied",
      Self::RateLimited => "rate limited",
      Self::RequestFailed => "request failed",
      Self::TransportError => "transport error",
      Self::MalformedBranchData => "malformed branch data",
      Self::IncompleteIdentity => "incomplete identity",
    };
    f.write_str(label)
  }
}

/// Errors produced while resolving the branch list of a repository.
///
/// None of these are fatal to the process; the selection state turns every
/// one of them into a `Failure` that still carries a usable branch list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// The identity names a hosting provider that has no request strategy.
  #[error("Unsupported repository type: {0}")]
  UnsupportedProvider(String),

  /// HTTP 404.
  #[error("Repository not found or no access")]
  NotFound,

  /// HTTP 403 on an unauthenticated request.
  #[error("Repository requires authentication. Please add an access token.")]
  AuthRequired,

  /// HTTP 403 on an authenticated request.
  #[error("Access denied - check your token permissions")]
  AccessDenied,

  /// HTTP 429.
  #[error("Rate limit exceeded. Please try again later or add an access token.")]
  RateLimited,

  /// Any other non-2xx response, carrying the provider's status text.
  #[error("Failed to fetch branches: {0}")]
  RequestFailed(String),

  /// The request never produced a usable response body.
  #[error("Failed to reach provider: {0}")]
  Transport(String),

  /// The payload did not have the shape the provider promises.
  #[error("Malformed branch data: {0}")]
  MalformedBranchData(String),

  /// Owner or repository name is empty; no request is attempted.
  #[error("Repository information is incomplete")]
  IncompleteIdentity,
}

impl ResolveError {
  /// Classification of this error.
  pub const fn kind(&self) -> ErrorKind {
    match self {
      Self::UnsupportedProvider(_) => ErrorKind::UnsupportedProvider,
      Self::NotFound => ErrorKind::NotFound,
      Self::AuthRequired => ErrorKind::AuthRequired,
      Self::AccessDenied => ErrorKind::AccessDenied,
      Self::RateLimited => ErrorKind::RateLimited,
      Self::RequestFailed(_) => ErrorKind::RequestFailed,
      Self::Transport(_) => ErrorKind::TransportError,
      Self::MalformedBranchData(_) => ErrorKind::MalformedBranchData,
      Self::IncompleteIdentity => ErrorKind::IncompleteIdentity,
    }
  }

  /// Whether the error was raised before any network call was attempted.
  pub const fn is_short_circuit(&self) -> bool {
    matches!(self, Self::UnsupportedProvider(_) | Self::IncompleteIdentity)
  }
}

/// A single branch element that could not be converted to a canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("branch element #{index} is malformed: {reason}")]
pub struct MalformedBranchData {
  /// Position of the element in the provider payload.
  pub index: usize,
  /// What was missing or wrong.
  pub reason: String,
}

impl From<MalformedBranchData> for ResolveError {
  fn from(err: MalformedBranchData) -> Self {
    Self::MalformedBranchData(err.to_string())
  }
}
