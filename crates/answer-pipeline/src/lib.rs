//! Question and worksheet answering pipeline.
//!
//! An [`InboundEvent`] is split into requests: one per attachment, or one for
//! the typed question. Each request runs through the same stages:
//!
//! 1. classify the attachment by its declared type
//! 2. fetch its bytes once and extract text (PDF text layer or OCR)
//! 3. build a solver request with the brief or detailed profile
//! 4. solve
//! 5. deliver as message chunks, a paginated PDF, or both
//!
//! Any stage failure becomes one [`PipelineError`] and one message back to
//! the requester. Collaborators (solver, fetcher, delivery, OCR) are passed in,
//! so a run can be driven entirely by fakes.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use answer_pipeline::{
//!     AnswerPipeline, FileSystemFetcher, InboundEvent, LoggingDelivery, PipelineConfig, ReplyTarget,
//! };
//! use mock_solver::FixedSolver;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let pipeline = AnswerPipeline::with_tesseract(
//!     FixedSolver::new("Paris"),
//!     LoggingDelivery,
//!     Arc::new(FileSystemFetcher::new()),
//!     PipelineConfig::default(),
//! );
//!
//! let event = InboundEvent::new("<@U1> capital of France?", ReplyTarget::new("C1"));
//! let outcomes = pipeline.handle_event(event).await;
//! assert!(outcomes[0].is_answered());
//! # }
//! ```

pub mod config;
pub mod delivery;
pub mod error;
pub mod event;
pub mod fetcher;
pub mod pipeline;
pub mod reply;
pub mod request_builder;

#[cfg(feature = "slack")]
pub mod slack_integration;

pub use config::{FileReplyMode, PipelineConfig, PipelineConfigBuilder};
pub use delivery::{
    Delivery, DeliveryError, DirectoryDelivery, DocumentUpload, LoggingDelivery, NoOpDelivery,
    ReplyTarget,
};
pub use error::{ConfigError, PipelineError};
pub use event::{strip_mention, InboundEvent};
pub use fetcher::{AttachmentFetcher, ByteSource, FetchError, FileSystemFetcher};
pub use pipeline::{AnswerPipeline, RunOutcome};
pub use reply::{document_filename, document_title, DOCUMENT_CAPTION, PROMPT_FOR_INPUT};
pub use request_builder::{build_request, fit_content, ProfileInstructions, RequestPlan};

// Re-export the types callers need to build requests
pub use solver_core::{Attachment, InboundRequest, Origin, Solver, SolverProfile};
