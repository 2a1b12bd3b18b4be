use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::reading::{SavePayload, SaveResponse};

/// Errors raised while forwarding a reading to the save endpoint
#[derive(Debug, Error)]
pub enum SaveClientError {
    /// The endpoint could not be reached or timed out
    #[error("Save endpoint unreachable: {0}")]
    Unreachable(String),

    /// The endpoint answered with a non-success HTTP status
    #[error("Save endpoint returned HTTP {0}")]
    HttpStatus(u16),

    /// The endpoint answered with a body that is not the expected JSON
    #[error("Invalid response from save endpoint: {0}")]
    InvalidResponse(String),

    /// The client could not be constructed
    #[error("Save client configuration error: {0}")]
    Config(String),
}

/// Outbound channel for persisting readings outside this service
#[async_trait]
pub trait SaveEndpointTrait {
    /// Post a reading and return the endpoint's decoded answer
    async fn save(&self, payload: &SavePayload) -> Result<SaveResponse, SaveClientError>;

    /// Where readings are sent, for diagnostics
    fn endpoint(&self) -> &str;
}

/// reqwest-backed client for the save endpoint
#[derive(Debug, Clone)]
pub struct HttpSaveClient {
    client: reqwest::Client,
    url: String,
}

impl HttpSaveClient {
    /// Create a client posting to `url` with the given request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SaveClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SaveClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SaveEndpointTrait for HttpSaveClient {
    #[instrument(skip(self, payload), fields(url = %self.url, username = %payload.username))]
    async fn save(&self, payload: &SavePayload) -> Result<SaveResponse, SaveClientError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SaveClientError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SaveClientError::HttpStatus(status.as_u16()));
        }

        let body = response
            .json::<SaveResponse>()
            .await
            .map_err(|e| SaveClientError::InvalidResponse(e.to_string()))?;

        debug!("Save endpoint answered with status {}", body.status);
        Ok(body)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// Mock save endpoint for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted behaviour of [`MockSaveEndpoint`]
    #[derive(Debug, Clone)]
    pub enum MockSaveBehavior {
        /// Answer `{"status": "success"}`
        Accept,
        /// Answer a non-success status with the given message
        Reject(String),
        /// Fail as if the endpoint were down
        Unreachable,
    }

    /// Mock implementation of SaveEndpointTrait that records every payload
    pub struct MockSaveEndpoint {
        behavior: MockSaveBehavior,
        received: Mutex<Vec<SavePayload>>,
    }

    impl MockSaveEndpoint {
        pub fn new(behavior: MockSaveBehavior) -> Self {
            Self {
                behavior,
                received: Mutex::new(Vec::new()),
            }
        }

        /// Payloads received so far
        pub fn received(&self) -> Vec<SavePayload> {
            self.received.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl SaveEndpointTrait for MockSaveEndpoint {
        async fn save(&self, payload: &SavePayload) -> Result<SaveResponse, SaveClientError> {
            if let Ok(mut received) = self.received.lock() {
                received.push(payload.clone());
            }

            match &self.behavior {
                MockSaveBehavior::Accept => Ok(SaveResponse {
                    status: "success".to_string(),
                    message: None,
                }),
                MockSaveBehavior::Reject(message) => Ok(SaveResponse {
                    status: "error".to_string(),
                    message: Some(message.clone()),
                }),
                MockSaveBehavior::Unreachable => Err(SaveClientError::Unreachable(
                    "connection refused".to_string(),
                )),
            }
        }

        fn endpoint(&self) -> &str {
            "mock://save"
        }
    }
}
