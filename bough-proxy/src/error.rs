//! Error responses of the proxy route.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Failures that end a proxied request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
  /// The upstream answered with a non-2xx status, which is passed through.
  #[error("Backend service responded with status: {}", .0.as_u16())]
  Upstream(StatusCode),

  /// The upstream could not be reached or sent an unusable body.
  #[error("{0}")]
  Transport(String),
}

impl ProxyError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Upstream(status) => *status,
      Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<reqwest::Error> for ProxyError {
  fn from(err: reqwest::Error) -> Self {
    Self::Transport(err.to_string())
  }
}

impl IntoResponse for ProxyError {
  fn into_response(self) -> Response {
    (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
  }
}
