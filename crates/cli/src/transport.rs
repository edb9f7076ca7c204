//! Blocking HTTP transport for `stream` statements.

use serde_json::Value as Json;
use solas_codegen::FetchIntent;
use solas_lang::config::NetworkConfig;
use solas_lang::{FetchError, Transport};
use std::time::Duration;

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(network: &NetworkConfig) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(network.user_agent.as_str())
            .timeout(Duration::from_secs(network.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    /// Non-success statuses and undecodable bodies are failures.
    fn get(&mut self, intent: &FetchIntent) -> Result<Json, FetchError> {
        let mut request = self.client.get(&intent.url);
        for (name, value) in &intent.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().map_err(|e| FetchError::Request {
            url: intent.url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: intent.url.clone(),
                status: status.as_u16(),
            });
        }
        tracing::debug!(url = %intent.url, status = status.as_u16(), "response received");

        response.json::<Json>().map_err(|e| FetchError::Decode {
            url: intent.url.clone(),
            reason: e.to_string(),
        })
    }
}
