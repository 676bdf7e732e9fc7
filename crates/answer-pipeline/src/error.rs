//! Pipeline error taxonomy.
//!
//! Every stage failure ends up as exactly one [`PipelineError`], and each
//! variant knows the single message the requester should see.

use extraction::{ClassifyError, ExtractionError};
use solver_core::SolverError;
use thiserror::Error;

/// Terminal failure of one pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The attachment matches no extraction strategy.
    #[error("unsupported attachment kind: {content_type}")]
    UnsupportedAttachmentKind {
        content_type: String,
        declared_kind: Option<String>,
    },

    /// Fetching the attachment bytes failed.
    #[error("attachment unavailable: {0}")]
    AttachmentUnavailable(String),

    /// The payload was fetched but no usable text came out of it.
    #[error("extraction failed ({reason}): {0}", reason = .0.reason())]
    ExtractionFailed(#[source] ExtractionError),

    /// The solver could not be reached or is misconfigured.
    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),

    /// The solver refused or returned nothing usable.
    #[error("solver rejected request: {0}")]
    SolverRejected(String),

    /// Building or sending the reply failed.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

impl PipelineError {
    /// The one message shown to the requester for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedAttachmentKind {
                content_type,
                declared_kind,
            } => {
                let kind = declared_kind
                    .as_deref()
                    .filter(|k| !k.trim().is_empty())
                    .unwrap_or(content_type.as_str());
                format!(
                    "Sorry, I can't process files of type `{}`. Please send a text, PDF, or image.",
                    kind
                )
            }
            Self::AttachmentUnavailable(_) => {
                "Sorry, I couldn't access that file. Please try sharing it again.".to_string()
            }
            Self::ExtractionFailed(ExtractionError::Malformed(_))
            | Self::ExtractionFailed(ExtractionError::EmptyDocument) => {
                "That file couldn't be opened as a document. Please check it and send it again."
                    .to_string()
            }
            Self::ExtractionFailed(_) => {
                "I couldn't read enough text in that file. Please send a clearer scan or a different file."
                    .to_string()
            }
            Self::SolverUnavailable(_) | Self::SolverRejected(_) => {
                "❗️ An error occurred while working on your request. Please try again in a moment."
                    .to_string()
            }
            Self::DeliveryFailed(reason) => {
                format!("I finished the answer but couldn't send it to you: {}", reason)
            }
        }
    }

    /// Whether re-issuing the same request unchanged could succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::AttachmentUnavailable(_) | Self::SolverUnavailable(_) | Self::SolverRejected(_)
        )
    }

    /// Short stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedAttachmentKind { .. } => "unsupported_attachment_kind",
            Self::AttachmentUnavailable(_) => "attachment_unavailable",
            Self::ExtractionFailed(_) => "extraction_failed",
            Self::SolverUnavailable(_) => "solver_unavailable",
            Self::SolverRejected(_) => "solver_rejected",
            Self::DeliveryFailed(_) => "delivery_failed",
        }
    }
}

impl From<ClassifyError> for PipelineError {
    fn from(err: ClassifyError) -> Self {
        Self::UnsupportedAttachmentKind {
            content_type: err.content_type,
            declared_kind: err.declared_kind,
        }
    }
}

impl From<ExtractionError> for PipelineError {
    fn from(err: ExtractionError) -> Self {
        Self::ExtractionFailed(err)
    }
}

impl From<SolverError> for PipelineError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::Unavailable(msg) | SolverError::Configuration(msg) => {
                Self::SolverUnavailable(msg)
            }
            SolverError::Rejected(msg) => Self::SolverRejected(msg),
        }
    }
}

/// Invalid pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
