//! # Proxy Routes
//!
//! `GET` forwards the upstream model-configuration document, `OPTIONS`
//! answers browser preflight requests.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::patch::ensure_iflow_model;

/// Path served by the proxy.
pub const MODELS_CONFIG_ROUTE: &str = "/api/models/config";

#[derive(Clone)]
struct AppState {
  client: Client,
  config: Arc<ProxyConfig>,
}

/// Build the proxy router for `config`.
pub fn router(config: ProxyConfig) -> Router {
  let state = AppState {
    client: Client::new(),
    config: Arc::new(config),
  };

  Router::new()
    .route(MODELS_CONFIG_ROUTE, get(get_models_config).options(preflight))
    .with_state(state)
}

async fn get_models_config(State(state): State<AppState>) -> Result<Json<Value>, ProxyError> {
  match fetch_models_config(&state).await {
    Ok(document) => Ok(Json(document)),
    Err(err) => {
      error!(upstream = %state.config.upstream_base_url, "Error fetching model configurations: {err}");
      Err(err)
    }
  }
}

async fn fetch_models_config(state: &AppState) -> Result<Value, ProxyError> {
  let url = state.config.upstream_models_url();
  let response = state
    .client
    .get(&url)
    .header(header::ACCEPT, "application/json")
    .send()
    .await?;

  let status = response.status();
  if !status.is_success() {
    return Err(ProxyError::Upstream(status));
  }

  let mut document: Value = response.json().await?;
  if ensure_iflow_model(&mut document) {
    debug!("Added qwen3-coder-plus to the iflow provider");
  }
  Ok(document)
}

async fn preflight() -> Response {
  (
    StatusCode::NO_CONTENT,
    [
      (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
      (header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET")),
      (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
      ),
    ],
  )
    .into_response()
}
