use thiserror::Error;

/// Errors from laying out or rendering output.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Layout metrics leave no room for text.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// The PDF writer failed.
    #[error("PDF rendering failed: {0}")]
    Render(String),
}
