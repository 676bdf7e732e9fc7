//! Slack Web API client.
//!
//! Covers the calls an answer bot needs:
//!
//! - Downloading a shared file's bytes with the bot token
//! - Posting a message, optionally into a thread
//! - Uploading a file through the external upload flow
//!
//! # Example
//!
//! ```no_run
//! use slack_client::{SlackClient, SlackConfig};
//!
//! # async fn example() -> Result<(), slack_client::SlackError> {
//! let client = SlackClient::new(SlackConfig::from_env()?)?;
//!
//! let ts = client.post_message("C0123456", "Working on it...", None).await?;
//! client
//!     .upload_file("C0123456", Some(&ts), "solution.pdf", "Solution", b"%PDF-1.3".to_vec(), None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::SlackClient;
pub use config::SlackConfig;
pub use error::SlackError;
pub use types::*;
