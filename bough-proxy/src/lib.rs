//! # Bough Proxy
//!
//! A single-route HTTP proxy in front of the model-configuration service.
//! Documents are forwarded unchanged except that the `iflow` provider is
//! guaranteed to offer `qwen3-coder-plus`.

pub mod config;
pub mod error;
pub mod patch;
pub mod server;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use patch::ensure_iflow_model;
pub use server::{MODELS_CONFIG_ROUTE, router};
