use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ChatRequest, ChatTransport, TransportError};

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessageResponse,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessageResponse {
    content: Option<String>,
}

/// Chat-completion transport for OpenAI and compatible endpoints.
#[derive(Clone)]
pub struct OpenAITransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAITransport {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatTransport for OpenAITransport {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, TransportError> {
        log::debug!(
            "POST {} model={} messages={}",
            self.endpoint(),
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Request(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: OpenAIResponse = response.json().await.map_err(|e| {
            TransportError::Request(format!("Failed to parse OpenAI response: {}", e))
        })?;

        Ok(first_content(body))
    }
}

fn first_content(body: OpenAIResponse) -> Option<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
}
