//! The estimator: one request/extract cycle per question, retried under a
//! bounded policy until a bedroom count is obtained.

use std::time::Instant;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{EstimatorError, Result};
use crate::extract::{extract, NumericMode};
use crate::model::{CompletionModel, Turn};
use crate::retry::RetryPolicy;
use crate::types::{QuestionRecord, ResultRow, ResultTable};

/// Ordered conversation turns prepended to every request when enabled.
///
/// The context is owned by the caller and handed to the estimator at
/// construction. With `max_turns` set, appending past the limit drops the
/// oldest turn; without it the context grows without bound, which is fine
/// for the handful of setup instructions this is meant to hold.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    turns: Vec<Turn>,
    max_turns: Option<usize>,
}

impl ConversationContext {
    /// Create an empty, unbounded context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context that keeps at most `max_turns` turns.
    pub fn windowed(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_turns: Some(max_turns),
        }
    }

    /// Append a turn, evicting the oldest if the window is full.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        if let Some(max) = self.max_turns {
            while self.turns.len() > max {
                self.turns.remove(0);
            }
        }
    }

    /// Turns in insertion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns currently held.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the context holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Estimator configuration.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Prepend context turns to each request (default: true)
    pub use_context: bool,

    /// Log progress every this many rows (default: 100)
    pub progress_every: usize,

    /// Numeric pattern for count parsing (default: integer-only)
    pub numeric_mode: NumericMode,

    /// Retry policy for the request/extract cycle
    pub retry: RetryPolicy,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            use_context: true,
            progress_every: 100,
            numeric_mode: NumericMode::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl EstimatorConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether context turns are sent with each request.
    pub fn with_use_context(mut self, use_context: bool) -> Self {
        self.use_context = use_context;
        self
    }

    /// Set the progress-log interval.
    pub fn with_progress_every(mut self, progress_every: usize) -> Self {
        self.progress_every = progress_every;
        self
    }

    /// Set the numeric parsing mode.
    pub fn with_numeric_mode(mut self, numeric_mode: NumericMode) -> Self {
        self.numeric_mode = numeric_mode;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// One completed request round trip.
#[derive(Debug, Clone)]
pub struct CompletionAttempt {
    /// Trimmed response text
    pub text: String,

    /// Total tokens used, when the provider reports usage
    pub total_tokens: Option<u32>,

    /// Elapsed wall time for this request, in seconds
    pub time_seconds: f64,
}

/// Outcome of a single query: either a completed round trip (whose text may
/// still fail extraction) or a recovered transport failure. Transport
/// trouble never propagates out of [`Estimator::query`]; the retry loop
/// decides what to do with it.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The provider returned a response.
    Completed(CompletionAttempt),

    /// The request failed in transport or at the API; recovered, not fatal.
    TransportFailure { reason: String },
}

/// Drives one request/extract cycle per question and assembles the table.
///
/// Strictly sequential: one outstanding request at a time, each question
/// fully processed (including retries) before the next begins.
pub struct Estimator<M: CompletionModel> {
    model: M,
    context: ConversationContext,
    config: EstimatorConfig,
}

impl<M: CompletionModel> Estimator<M> {
    /// Create an estimator with an empty context and default config.
    pub fn new(model: M) -> Self {
        Self {
            model,
            context: ConversationContext::new(),
            config: EstimatorConfig::default(),
        }
    }

    /// Use a caller-prepared conversation context.
    pub fn with_context(mut self, context: ConversationContext) -> Self {
        self.context = context;
        self
    }

    /// Use a custom configuration.
    pub fn with_config(mut self, config: EstimatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Current conversation context.
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Append a general instruction to the context without sending anything.
    ///
    /// Useful for setup sentences like
    /// `"Please respond in format: 'Bedrooms: X, Bathrooms: Y'"`.
    pub fn add_general_input(&mut self, sentence: impl Into<String>) {
        let sentence = sentence.into();
        debug!(instruction = %sentence, "added general input");
        self.context.push(Turn::user(sentence));
    }

    /// Issue exactly one completion request for `question`.
    ///
    /// Builds the turn list (context turns plus the question when
    /// `use_context` is set), measures elapsed wall time, and tags the
    /// outcome. Provider errors are recovered here and reported as
    /// [`QueryOutcome::TransportFailure`].
    pub async fn query(&self, question: &str, use_context: bool) -> QueryOutcome {
        let mut turns: Vec<Turn> = if use_context {
            self.context.turns().to_vec()
        } else {
            Vec::new()
        };
        turns.push(Turn::user(question));

        let start = Instant::now();
        match self.model.complete(&turns).await {
            Ok(completion) => QueryOutcome::Completed(CompletionAttempt {
                text: completion.text.trim().to_string(),
                total_tokens: completion.total_tokens,
                time_seconds: start.elapsed().as_secs_f64(),
            }),
            Err(e) => {
                warn!(error = %e, "completion request failed");
                QueryOutcome::TransportFailure {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Estimate bedroom/bathroom counts for each record, in input order.
    ///
    /// Missing-input records short-circuit to an all-missing row with no
    /// request. Every other record is queried and re-queried under the
    /// retry policy until its response yields a bedroom count; the row
    /// carries the final accepted attempt's text, tokens, and elapsed time.
    /// Exhausting the retry budget for any record aborts the batch with
    /// [`EstimatorError::ExtractionExhausted`].
    pub async fn estimate(&self, records: &[QuestionRecord]) -> Result<ResultTable> {
        let progress_every = self.config.progress_every.max(1);
        let mut table = ResultTable::with_capacity(records.len());

        for (i, record) in records.iter().enumerate() {
            if i % progress_every == 0 {
                info!(row = i, total = records.len(), "estimating");
            }

            let Some(question) = record.question.as_deref() else {
                table.push(ResultRow::missing(record.qpid.clone()));
                continue;
            };

            table.push(self.estimate_one(question, &record.qpid).await?);
        }

        Ok(table)
    }

    /// Request/extract cycle for a single question, retried until a bedroom
    /// count is obtained or the attempt budget runs out.
    async fn estimate_one(&self, question: &str, qpid: &str) -> Result<ResultRow> {
        let policy = &self.config.retry;
        let max_attempts = policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let backoff = match self.query(question, self.config.use_context).await {
                QueryOutcome::Completed(reply) => {
                    let fields = extract(&reply.text, self.config.numeric_mode);
                    if let Some(bedrooms) = fields.bedrooms {
                        return Ok(ResultRow {
                            question: Some(question.to_string()),
                            gpt_response: Some(reply.text),
                            qpid: qpid.to_string(),
                            bathrooms: fields.bathrooms,
                            bedrooms: Some(bedrooms),
                            tokens_used: reply.total_tokens,
                            time_seconds: Some(reply.time_seconds),
                        });
                    }
                    debug!(qpid, attempt, "response had no bedroom count");
                    &policy.miss_backoff
                }
                QueryOutcome::TransportFailure { reason } => {
                    warn!(qpid, attempt, %reason, "request attempt failed");
                    &policy.transport_backoff
                }
            };

            if attempt < max_attempts {
                let delay = backoff.delay(attempt);
                if !delay.is_zero() {
                    sleep(delay).await;
                }
            }
        }

        Err(EstimatorError::ExtractionExhausted {
            qpid: qpid.to_string(),
            attempts: max_attempts,
        })
    }
}
