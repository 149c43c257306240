//! Workflow-level error taxonomy.
//!
//! Every user action is a single best-effort attempt: these errors are
//! terminal for the action that raised them and are never retried. The
//! presentation layer decides how each one is shown.

/// Errors surfaced by AOI workflow actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// An action was invoked with no AOI drawn.
    #[error("no area of interest is drawn")]
    NoAoi,
    /// The backend call failed in transport or returned a non-success status.
    #[error("alert request failed: {message}")]
    RequestFailed {
        /// Transport or status detail.
        message: String,
    },
    /// The count endpoint returned a body that could not be parsed.
    #[error("alert response malformed: {message}")]
    MalformedResponse {
        /// Decode failure detail.
        message: String,
    },
    /// The downloaded payload could not be saved locally.
    #[error("download could not be saved: {message}")]
    DownloadFailed {
        /// Save failure detail.
        message: String,
    },
    /// The response arrived for an AOI that has since been replaced.
    #[error("area of interest was replaced while the request was in flight")]
    SupersededAoi,
    /// The workflow broke one of its own invariants.
    #[error("internal workflow error: {message}")]
    Internal {
        /// Invariant breakage detail.
        message: String,
    },
}

impl WorkflowError {
    /// Build a [`WorkflowError::RequestFailed`] from any message.
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }

    /// Build a [`WorkflowError::MalformedResponse`] from any message.
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Build a [`WorkflowError::DownloadFailed`] from any message.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    /// Build a [`WorkflowError::Internal`] from any message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error display formats.

    use super::WorkflowError;

    #[test]
    fn constructors_accept_str_for_message_fields() {
        let error = WorkflowError::request_failed("connection refused");
        assert_eq!(error.to_string(), "alert request failed: connection refused");
    }

    #[test]
    fn no_aoi_names_the_missing_state() {
        assert_eq!(
            WorkflowError::NoAoi.to_string(),
            "no area of interest is drawn"
        );
    }

    #[test]
    fn superseded_aoi_explains_the_discard() {
        assert_eq!(
            WorkflowError::SupersededAoi.to_string(),
            "area of interest was replaced while the request was in flight"
        );
    }
}
