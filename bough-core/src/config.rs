//! # Configuration Management
//!
//! Handles the per-user configuration directories and the `config.toml`
//! settings file, including environment overrides for provider endpoints,
//! request timeout and the model-config proxy.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

/// Environment variable overriding the GitHub API base URL.
pub const ENV_GITHUB_API_URL: &str = "BOUGH_GITHUB_API_URL";
/// Environment variable overriding the GitLab API base URL.
pub const ENV_GITLAB_API_URL: &str = "BOUGH_GITLAB_API_URL";
/// Environment variable overriding the Bitbucket API base URL.
pub const ENV_BITBUCKET_API_URL: &str = "BOUGH_BITBUCKET_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "BOUGH_REQUEST_TIMEOUT_SECS";
/// Environment variable naming the model-config upstream server.
pub const ENV_SERVER_BASE_URL: &str = "SERVER_BASE_URL";
/// Environment variable overriding the proxy listen address.
pub const ENV_PROXY_BIND: &str = "BOUGH_PROXY_BIND";

/// Public GitHub REST API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Public GitLab REST API.
pub const DEFAULT_GITLAB_API_URL: &str = "https://gitlab.com/api/v4";
/// Public Bitbucket Cloud REST API.
pub const DEFAULT_BITBUCKET_API_URL: &str = "https://api.bitbucket.org/2.0";

/// Represents the configuration directories for the bough application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub cache_dir: Option<PathBuf>,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("dev", "bough", "bough").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      cache_dir: Some(proj_dirs.cache_dir().to_path_buf()),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the settings file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Load the settings file and apply environment overrides
  pub fn load_config(&self) -> Result<BoughConfig> {
    let mut config = BoughConfig::load_from_path(self.config_path())?;
    config.apply_env_overrides()?;
    Ok(config)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoughConfig {
  /// Upper bound on a single branch-list request.
  pub request_timeout_secs: u64,
  /// Fail the whole list on the first malformed branch element instead of
  /// dropping it.
  pub strict_parsing: bool,
  pub providers: ProviderEndpoints,
  pub proxy: ProxySettings,
}

impl Default for BoughConfig {
  fn default() -> Self {
    Self {
      request_timeout_secs: 30,
      strict_parsing: false,
      providers: ProviderEndpoints::default(),
      proxy: ProxySettings::default(),
    }
  }
}

impl BoughConfig {
  /// Load settings from `path`, falling back to defaults when it is missing.
  pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
  }

  /// Write settings to `path`, creating parent directories as needed.
  pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))
  }

  /// Overlay values from the process environment.
  pub fn apply_env_overrides(&mut self) -> Result<()> {
    if let Some(url) = env_value(ENV_GITHUB_API_URL) {
      self.providers.github_api_url = url;
    }
    if let Some(url) = env_value(ENV_GITLAB_API_URL) {
      self.providers.gitlab_api_url = url;
    }
    if let Some(url) = env_value(ENV_BITBUCKET_API_URL) {
      self.providers.bitbucket_api_url = url;
    }
    if let Some(secs) = env_value(ENV_REQUEST_TIMEOUT_SECS) {
      self.request_timeout_secs = secs
        .parse()
        .with_context(|| format!("{ENV_REQUEST_TIMEOUT_SECS} must be a whole number of seconds, got '{secs}'"))?;
    }
    if let Some(url) = env_value(ENV_SERVER_BASE_URL) {
      self.proxy.upstream_base_url = url;
    }
    if let Some(bind) = env_value(ENV_PROXY_BIND) {
      self.proxy.bind_addr = bind;
    }
    Ok(())
  }

  pub const fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}

/// Base URLs of the provider REST APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoints {
  pub github_api_url: String,
  pub gitlab_api_url: String,
  pub bitbucket_api_url: String,
}

impl Default for ProviderEndpoints {
  fn default() -> Self {
    Self {
      github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
      gitlab_api_url: DEFAULT_GITLAB_API_URL.to_string(),
      bitbucket_api_url: DEFAULT_BITBUCKET_API_URL.to_string(),
    }
  }
}

impl ProviderEndpoints {
  /// Point every provider at the same base URL; handy for test servers.
  pub fn all(base_url: &str) -> Self {
    Self {
      github_api_url: base_url.to_string(),
      gitlab_api_url: base_url.to_string(),
      bitbucket_api_url: base_url.to_string(),
    }
  }

  /// Base URL for a provider.
  pub fn base_url(&self, kind: ProviderKind) -> &str {
    match kind {
      ProviderKind::GitHub => &self.github_api_url,
      ProviderKind::GitLab => &self.gitlab_api_url,
      ProviderKind::Bitbucket => &self.bitbucket_api_url,
    }
  }
}

/// Settings for the model-config proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
  pub upstream_base_url: String,
  pub bind_addr: String,
}

impl Default for ProxySettings {
  fn default() -> Self {
    Self {
      upstream_base_url: "http://localhost:8001".to_string(),
      bind_addr: "127.0.0.1:3000".to_string(),
    }
  }
}

fn env_value(name: &str) -> Option<String> {
  env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use bough_test_utils::{EnvTestGuard, EnvVarGuard};
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_defaults() {
    let config = BoughConfig::default();
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert!(!config.strict_parsing);
    assert_eq!(config.providers.base_url(ProviderKind::GitHub), "https://api.github.com");
    assert_eq!(config.providers.base_url(ProviderKind::GitLab), "https://gitlab.com/api/v4");
    assert_eq!(
      config.providers.base_url(ProviderKind::Bitbucket),
      "https://api.bitbucket.org/2.0"
    );
    assert_eq!(config.proxy.upstream_base_url, "http://localhost:8001");
  }

  #[test]
  fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = BoughConfig::load_from_path(temp_dir.path().join("config.toml")).unwrap();
    assert_eq!(config, BoughConfig::default());
  }

  #[test]
  fn test_partial_file_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
      &path,
      r#"
strict_parsing = true

[providers]
gitlab_api_url = "https://gitlab.internal/api/v4"
"#,
    )
    .unwrap();

    let config = BoughConfig::load_from_path(&path).unwrap();
    assert!(config.strict_parsing);
    assert_eq!(config.providers.gitlab_api_url, "https://gitlab.internal/api/v4");
    assert_eq!(config.providers.github_api_url, DEFAULT_GITHUB_API_URL);
    assert_eq!(config.request_timeout_secs, 30);
  }

  #[test]
  fn test_invalid_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();

    let err = BoughConfig::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
  }

  #[test]
  fn test_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");
    let mut config = BoughConfig::default();
    config.request_timeout_secs = 5;
    config.save_to_path(&path).unwrap();

    assert_eq!(BoughConfig::load_from_path(&path).unwrap(), config);
  }

  #[test]
  fn test_env_overrides() {
    let github = EnvVarGuard::new(ENV_GITHUB_API_URL);
    let timeout = EnvVarGuard::new(ENV_REQUEST_TIMEOUT_SECS);
    let upstream = EnvVarGuard::new(ENV_SERVER_BASE_URL);
    github.set("http://127.0.0.1:9000");
    timeout.set("3");
    upstream.set("http://backend:8001");

    let mut config = BoughConfig::default();
    config.apply_env_overrides().unwrap();

    assert_eq!(config.providers.github_api_url, "http://127.0.0.1:9000");
    assert_eq!(config.request_timeout(), Duration::from_secs(3));
    assert_eq!(config.proxy.upstream_base_url, "http://backend:8001");

    timeout.set("soon");
    assert!(config.apply_env_overrides().is_err());
  }

  #[test]
  fn test_config_dirs_follow_xdg() {
    let env = EnvTestGuard::new();
    let config_dirs = ConfigDirs::new().unwrap();

    if cfg!(target_os = "linux") {
      assert!(config_dirs.config_dir().starts_with(env.config_dir()));
    }
    assert!(config_dirs.config_path().ends_with("config.toml"));
  }
}
