//! Driven port for saving downloaded payloads.
//!
//! A save is a single trigger: any transient handle the implementation
//! acquires must be released before the call returns, on every path.

use super::alert_feed::FilePayload;

/// Errors surfaced while saving a download.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileSinkError {
    /// The payload could not be written to its destination.
    #[error("file save failed: {message}")]
    Write {
        /// Write failure detail.
        message: String,
    },
}

impl FileSinkError {
    /// Build a [`FileSinkError::Write`] from any message.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Port for triggering one local save of a downloaded payload.
#[cfg_attr(test, mockall::automock)]
pub trait FileSink: Send + Sync {
    /// Save `payload` under its own filename.
    ///
    /// # Errors
    ///
    /// Returns [`FileSinkError::Write`] when the save cannot be completed.
    fn save(&self, payload: &FilePayload) -> Result<(), FileSinkError>;
}

/// Fixture implementation that discards payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureFileSink;

impl FileSink for FixtureFileSink {
    fn save(&self, _payload: &FilePayload) -> Result<(), FileSinkError> {
        Ok(())
    }
}
