//! The network collaborator.
//!
//! Lowering only describes requests; a [`Transport`] performs them. The CLI
//! provides an HTTP implementation, tests script responses in memory.

use solas_codegen::FetchIntent;
use thiserror::Error;

pub trait Transport {
  /// Perform one GET. Any error counts as a failed attempt.
  fn get(&mut self, intent: &FetchIntent) -> Result<serde_json::Value, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
  fn get(&mut self, intent: &FetchIntent) -> Result<serde_json::Value, FetchError> {
    (**self).get(intent)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
  #[error("request to {url} failed: {reason}")]
  Request { url: String, reason: String },

  #[error("HTTP status {status} from {url}")]
  Status { url: String, status: u16 },

  #[error("response from {url} is not valid JSON: {reason}")]
  Decode { url: String, reason: String },
}

/// A transport with no network: every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl Transport for Offline {
  fn get(&mut self, intent: &FetchIntent) -> Result<serde_json::Value, FetchError> {
    Err(FetchError::Request {
      url: intent.url.clone(),
      reason: "network access is disabled".to_string(),
    })
  }
}
