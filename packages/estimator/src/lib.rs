//! LLM-Backed Property Attribute Estimation
//!
//! Queries a chat-completion API once per property record, parses a
//! bedroom/bathroom count out of the free-text response, and assembles an
//! ordered in-memory result table. The core is the request/extract cycle:
//! each question is retried under a bounded policy until its response
//! yields a usable bedroom count.
//!
//! # Usage
//!
//! ```rust,ignore
//! use estimator::{Estimator, QuestionRecord};
//! use estimator::ai::OpenAI;
//!
//! let model = OpenAI::from_env()?;
//! let mut estimator = Estimator::new(model);
//! estimator.add_general_input("Please respond in format: 'Bedrooms: X, Bathrooms: Y'");
//!
//! let records = estimator::records::read_question_records(
//!     "property_list.csv",
//!     "How many bedrooms and bathrooms are at ",
//! )?;
//!
//! let table = estimator.estimate(&records).await?;
//! for row in &table {
//!     println!("{}: beds={:?} baths={:?}", row.qpid, row.bedrooms, row.bathrooms);
//! }
//! ```
//!
//! # Modules
//!
//! - [`model`] - The `CompletionModel` provider seam and conversation types
//! - [`pipeline`] - The retry-driven estimation loop
//! - [`extract`] - Pure bedroom/bathroom parsing
//! - [`retry`] - Bounded retry policy with per-failure-class backoff
//! - [`records`] - CSV property record source
//! - [`testing`] - Mock model for tests

pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod records;
pub mod retry;
pub mod testing;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{EstimatorError, Result};
pub use pipeline::{
    CompletionAttempt, ConversationContext, Estimator, EstimatorConfig, QueryOutcome,
};
pub use extract::{extract, ExtractedFields, NumericMode};
pub use model::{Completion, CompletionModel, Role, Turn};
pub use records::{
    build_question_records, read_property_records, read_question_records, PropertyRecord,
};
pub use retry::{Backoff, RetryPolicy};
pub use types::{QuestionRecord, ResultRow, ResultTable};
