//! OpenAI chat-completions narrative client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::ports::narrative::{NarrativeError, NarrativeGenerator};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat-completions client used for token narratives.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Result<Self, NarrativeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NarrativeError::Api(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model: "gpt-3.5-turbo-0125".to_string(),
            max_tokens: 250,
            temperature: 0.7,
        })
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl NarrativeGenerator for OpenAiClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, NarrativeError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt}
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature
        });

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NarrativeError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Api(format!(
                "status {}: {}",
                status, detail
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| NarrativeError::MalformedResponse(e.to_string()))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                NarrativeError::MalformedResponse("missing choices[0].message.content".to_string())
            })?;

        debug!(model = %self.model, chars = content.len(), "narrative generated");
        Ok(content.to_string())
    }
}
