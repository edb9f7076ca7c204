#![allow(dead_code)]

use serde_json::Value as Json;
use solas_codegen::FetchIntent;
use solas_lang::{FetchError, Transport};
use std::collections::VecDeque;

/// Replays canned responses in order and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
  responses: VecDeque<Result<Json, FetchError>>,
  pub requests: Vec<FetchIntent>,
}

impl ScriptedTransport {
  pub fn new(responses: impl IntoIterator<Item = Result<Json, FetchError>>) -> Self {
    Self {
      responses: responses.into_iter().collect(),
      requests: Vec::new(),
    }
  }
}

impl Transport for ScriptedTransport {
  fn get(&mut self, intent: &FetchIntent) -> Result<Json, FetchError> {
    self.requests.push(intent.clone());
    self.responses.pop_front().unwrap_or_else(|| {
      Err(FetchError::Request {
        url: intent.url.clone(),
        reason: "no scripted response".to_string(),
      })
    })
  }
}

pub fn status(code: u16) -> Result<Json, FetchError> {
  Err(FetchError::Status {
    url: "https://example.com/todos/1".to_string(),
    status: code,
  })
}
