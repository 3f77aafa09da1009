//! Testing utilities including a mock completion model.
//!
//! Useful for exercising the estimator without real LLM calls: script reply
//! sequences per question, inject transport failures, and assert on the
//! requests actually made.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{EstimatorError, Result};
use crate::model::{Completion, CompletionModel, Role, Turn};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A successful completion with optional usage metadata.
    Text {
        content: String,
        total_tokens: Option<u32>,
    },

    /// A transport failure surfaced as a completion error.
    TransportFailure(String),
}

impl MockReply {
    /// A text reply without usage metadata.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            total_tokens: None,
        }
    }

    /// A text reply with a total-token count.
    pub fn text_with_tokens(content: impl Into<String>, total_tokens: u32) -> Self {
        Self::Text {
            content: content.into(),
            total_tokens: Some(total_tokens),
        }
    }

    /// A transport failure with the given reason.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::TransportFailure(reason.into())
    }
}

/// A mock completion model for testing.
///
/// Replies are keyed by the question (the last user turn's content) and
/// consumed in order; when a question's queue is empty, the default reply
/// is returned. Every call is recorded for assertions. Clones share reply
/// queues and call history, so a clone kept outside the estimator can
/// observe the calls the estimator makes.
#[derive(Clone)]
pub struct MockModel {
    replies: Arc<RwLock<HashMap<String, VecDeque<MockReply>>>>,
    default_reply: String,
    calls: Arc<RwLock<Vec<Vec<Turn>>>>,
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockModel {
    /// Create a mock whose default reply contains a parseable count.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(RwLock::new(HashMap::new())),
            default_reply: "Bedrooms: 3, Bathrooms: 2".to_string(),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Script a reply sequence for a question.
    pub fn with_replies(
        self,
        question: impl Into<String>,
        replies: impl IntoIterator<Item = MockReply>,
    ) -> Self {
        self.replies
            .write()
            .unwrap()
            .insert(question.into(), replies.into_iter().collect());
        self
    }

    /// Set the reply used when no scripted reply remains.
    pub fn with_default_reply(mut self, content: impl Into<String>) -> Self {
        self.default_reply = content.into();
        self
    }

    /// All turn lists sent to the model, in call order.
    pub fn calls(&self) -> Vec<Vec<Turn>> {
        self.calls.read().unwrap().clone()
    }

    /// Number of completion calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    fn next_reply(&self, question: &str) -> MockReply {
        let mut replies = self.replies.write().unwrap();
        replies
            .get_mut(question)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| MockReply::text(self.default_reply.clone()))
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    async fn complete(&self, turns: &[Turn]) -> Result<Completion> {
        self.calls.write().unwrap().push(turns.to_vec());

        let question = turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(|turn| turn.content.as_str())
            .unwrap_or_default();

        match self.next_reply(question) {
            MockReply::Text {
                content,
                total_tokens,
            } => Ok(Completion {
                text: content,
                total_tokens,
            }),
            MockReply::TransportFailure(reason) => {
                Err(EstimatorError::Completion(reason.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_consumed_in_order() {
        let model = MockModel::new().with_replies(
            "Q",
            vec![MockReply::text("first"), MockReply::text("second")],
        );

        let turns = vec![Turn::user("Q")];
        assert_eq!(model.complete(&turns).await.unwrap().text, "first");
        assert_eq!(model.complete(&turns).await.unwrap().text, "second");
        // Queue drained; default reply takes over.
        assert_eq!(
            model.complete(&turns).await.unwrap().text,
            "Bedrooms: 3, Bathrooms: 2"
        );
    }

    #[tokio::test]
    async fn test_failure_reply_is_an_error() {
        let model =
            MockModel::new().with_replies("Q", vec![MockReply::failure("connection reset")]);

        let result = model.complete(&[Turn::user("Q")]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let model = MockModel::new();
        model.complete(&[Turn::user("A")]).await.unwrap();
        model.complete(&[Turn::user("B")]).await.unwrap();

        assert_eq!(model.call_count(), 2);
        assert_eq!(model.calls()[1][0].content, "B");
    }
}
