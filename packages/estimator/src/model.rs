//! Completion model trait and conversation types.
//!
//! The [`CompletionModel`] trait abstracts the LLM provider: anything that
//! accepts an ordered list of conversation turns and returns generated text
//! plus optional token usage can drive the estimator. Implementations wrap
//! specific providers (OpenAI, a local router, a test mock) and handle the
//! specifics of transport and response parsing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire-format role string.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One conversation turn: a role plus its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A provider reply: generated text plus usage metadata when reported.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Text of the first returned choice
    pub text: String,

    /// Total tokens consumed by the request, if the provider reports usage
    pub total_tokens: Option<u32>,
}

/// Completion model trait.
///
/// One call per invocation; no streaming, no tool use. Providers are
/// substitutable as long as they expose a first-choice text field and an
/// optional total-token count.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Send the turn list to the provider and return its reply.
    async fn complete(&self, turns: &[Turn]) -> Result<Completion>;
}
