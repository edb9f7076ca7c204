//! Project configuration (`Solas.toml`).
//!
//! ```toml
//! [credentials]
//! api_key = "SOLAS_DEMO_TOKEN_123"
//!
//! [network]
//! timeout_secs = 30
//! user_agent = "solas/0.1"
//! ```
//!
//! Every table and field is optional. The file is discovered by walking up
//! from the source file's directory.

use indexmap::IndexMap;
use serde::Deserialize;
use solas_codegen::Credentials;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "Solas.toml";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SolasConfig {
  /// Credential name to secret, consulted by `secure with`.
  pub credentials: IndexMap<String, String>,

  pub network: NetworkConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
  /// Per-request timeout applied by the HTTP transport.
  pub timeout_secs: u64,

  pub user_agent: String,
}

impl Default for NetworkConfig {
  fn default() -> Self {
    Self {
      timeout_secs: 30,
      user_agent: format!("solas/{}", env!("CARGO_PKG_VERSION")),
    }
  }
}

impl SolasConfig {
  pub fn from_toml(contents: &str) -> ConfigResult<Self> {
    toml::from_str(contents).map_err(ConfigError::Parse)
  }

  pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::from_toml(&contents)?;
    tracing::debug!(
      path = %path.display(),
      credentials = config.credentials.len(),
      "loaded configuration"
    );
    Ok(config)
  }

  /// Load the nearest `Solas.toml` at or above `start`, or the defaults when
  /// there is none.
  pub fn discover(start: impl AsRef<Path>) -> ConfigResult<Self> {
    match find_config(start.as_ref()) {
      Some(path) => Self::from_file(path),
      None => Ok(Self::default()),
    }
  }

  /// The credential mapping handed to lowering.
  pub fn credentials(&self) -> Credentials {
    self
      .credentials
      .iter()
      .map(|(name, secret)| (name.as_str(), secret.as_str()))
      .collect()
  }
}

/// Nearest `Solas.toml` at or above `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
  start
    .ancestors()
    .map(|dir| dir.join(CONFIG_FILE_NAME))
    .find(|candidate| candidate.is_file())
}

/// Parse a `NAME=VALUE` credential override.
pub fn parse_credential_override(raw: &str) -> ConfigResult<(String, String)> {
  match raw.split_once('=') {
    Some((name, value)) if !name.trim().is_empty() => {
      Ok((name.trim().to_string(), value.to_string()))
    }
    _ => Err(ConfigError::InvalidOverride(raw.to_string())),
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse Solas.toml: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("invalid credential '{0}', expected NAME=VALUE")]
  InvalidOverride(String),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_full_config() {
    let config = SolasConfig::from_toml(
      r#"
        [credentials]
        api_key = "SOLAS_DEMO_TOKEN_123"

        [network]
        timeout_secs = 5
        user_agent = "probe"
      "#,
    )
    .unwrap();

    assert_eq!(config.network.timeout_secs, 5);
    assert_eq!(config.network.user_agent, "probe");
    assert_eq!(config.credentials().get("api_key"), Some("SOLAS_DEMO_TOKEN_123"));
  }

  #[test]
  fn every_table_is_optional() {
    let config = SolasConfig::from_toml("").unwrap();
    assert_eq!(config, SolasConfig::default());
    assert!(config.credentials().is_empty());
    assert_eq!(config.network.timeout_secs, 30);

    let partial = SolasConfig::from_toml("[network]\ntimeout_secs = 2\n").unwrap();
    assert_eq!(partial.network.timeout_secs, 2);
    assert!(partial.network.user_agent.starts_with("solas/"));
  }

  #[test]
  fn rejects_malformed_toml() {
    let err = SolasConfig::from_toml("[credentials\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn discovers_config_in_ancestor() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
      dir.path().join(CONFIG_FILE_NAME),
      "[credentials]\ntoken = \"t\"\n",
    )
    .unwrap();

    let config = SolasConfig::discover(&nested).unwrap();
    assert_eq!(config.credentials().get("token"), Some("t"));
  }

  #[test]
  fn discovery_without_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(find_config(dir.path()), None);
    assert_eq!(SolasConfig::discover(dir.path()).unwrap(), SolasConfig::default());
  }

  #[test]
  fn credential_overrides() {
    assert_eq!(
      parse_credential_override("api_key=abc=def").unwrap(),
      ("api_key".to_string(), "abc=def".to_string())
    );
    assert!(parse_credential_override("novalue").is_err());
    assert!(parse_credential_override("=x").is_err());
  }
}
