use crate::config::MotConfig;
use crate::error::{CheckerError, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the MOT history API
pub struct MotClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl MotClient {
    pub fn new(config: &MotConfig, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch the test history for a registration.
    ///
    /// The body is returned as-is whatever the status: the API answers
    /// unknown registrations with a JSON error document, which callers pass
    /// through. A body that is not JSON is an error.
    pub async fn fetch_history(&self, vrn: &str) -> Result<Value> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("registration", vrn)])
            .header("X-Api-Key", self.api_key.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(vrn, %status, "MOT history request was not successful");
        }

        let body = response.bytes().await?;
        let data: Value =
            serde_json::from_slice(&body).map_err(CheckerError::InvalidMotResponse)?;
        debug!(vrn, bytes = body.len(), "MOT history received");

        Ok(data)
    }
}
