use crate::config::LlmConfig;
use crate::domain::model::ChatMessage;
use crate::domain::ports::ChatModel;
use crate::utils::error::{RecapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Client for an Ollama server's `/api/chat` endpoint, non-streaming.
pub struct OllamaClient {
    client: Client,
    host: String,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            host: config.endpoint(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn unavailable(&self, error: reqwest::Error) -> RecapError {
        if error.is_connect() || error.is_timeout() {
            RecapError::ModelUnavailable {
                host: self.host.clone(),
                message: error.to_string(),
            }
        } else {
            RecapError::HttpError(error)
        }
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/api/chat", self.host);
        let request = ChatRequest {
            model,
            messages,
            stream: false,
        };

        tracing::debug!("Sending {} messages to {} ({})", messages.len(), url, model);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.unavailable(e))?;

        let status = response.status();
        tracing::debug!("Model response status: {}", status);
        if !status.is_success() {
            return Err(RecapError::TransportError {
                status: status.as_u16(),
                url,
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| self.unavailable(e))?;
        Ok(body.message.content)
    }
}
