//! Proxy runtime settings.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use bough_core::{BoughConfig, ProxySettings};

/// Where the proxy listens and which server it forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
  pub upstream_base_url: String,
  pub bind_addr: SocketAddr,
}

impl ProxyConfig {
  pub fn new(upstream_base_url: impl Into<String>, bind_addr: SocketAddr) -> Self {
    Self {
      upstream_base_url: upstream_base_url.into(),
      bind_addr,
    }
  }

  /// Build from the `[proxy]` section of the user settings.
  pub fn from_settings(settings: &ProxySettings) -> Result<Self> {
    let bind_addr = settings
      .bind_addr
      .parse()
      .with_context(|| format!("Invalid proxy bind address '{}'", settings.bind_addr))?;
    Ok(Self::new(settings.upstream_base_url.clone(), bind_addr))
  }

  /// Build from user settings with command-line overrides applied on top.
  pub fn resolve(config: &BoughConfig, upstream: Option<String>, bind: Option<String>) -> Result<Self> {
    let mut settings = config.proxy.clone();
    if let Some(upstream) = upstream {
      settings.upstream_base_url = upstream;
    }
    if let Some(bind) = bind {
      settings.bind_addr = bind;
    }
    Self::from_settings(&settings)
  }

  /// URL of the upstream model-configuration document.
  pub fn upstream_models_url(&self) -> String {
    format!("{}/models/config", self.upstream_base_url.trim_end_matches('/'))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = ProxyConfig::from_settings(&ProxySettings::default()).unwrap();
    assert_eq!(config.upstream_models_url(), "http://localhost:8001/models/config");
    assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
  }

  #[test]
  fn test_overrides() {
    let config = ProxyConfig::resolve(
      &BoughConfig::default(),
      Some("http://backend:9000/".into()),
      Some("0.0.0.0:8080".into()),
    )
    .unwrap();
    assert_eq!(config.upstream_models_url(), "http://backend:9000/models/config");
    assert_eq!(config.bind_addr.port(), 8080);
  }

  #[test]
  fn test_invalid_bind() {
    let err = ProxyConfig::resolve(&BoughConfig::default(), None, Some("localhost".into())).unwrap_err();
    assert!(err.to_string().contains("Invalid proxy bind address"));
  }
}
