//! OpenAI implementation of the CompletionModel trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use estimator::ai::OpenAI;
//! use estimator::Estimator;
//!
//! let model = OpenAI::from_env()?.with_model("gpt-4.1");
//! let estimator = Estimator::new(model);
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};

use crate::error::{EstimatorError, Result};
use crate::model::{Completion, CompletionModel, Turn};

/// OpenAI-backed completion model.
#[derive(Clone)]
pub struct OpenAI {
    client: OpenAIClient,
    model: String,
}

impl OpenAI {
    /// Create a new OpenAI model with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: "gpt-4.1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| EstimatorError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4.1).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionModel for OpenAI {
    async fn complete(&self, turns: &[Turn]) -> Result<Completion> {
        let messages = turns
            .iter()
            .map(|turn| Message {
                role: turn.role.as_str().to_string(),
                content: turn.content.clone(),
            })
            .collect();

        let response = self
            .client
            .chat_completion(ChatRequest::with_messages(self.model.clone(), messages))
            .await
            .map_err(|e| EstimatorError::Completion(Box::new(e)))?;

        Ok(Completion {
            text: response.content,
            total_tokens: response.usage.map(|usage| usage.total_tokens),
        })
    }
}
