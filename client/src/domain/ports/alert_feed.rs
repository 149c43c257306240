//! Driven port for the GLAD alert backend.
//!
//! The domain owns the wire contract so the workflow stays adapter-agnostic:
//! requests carry the AOI as a GeoJSON feature, and responses arrive already
//! split by endpoint. How a response is handled is fixed by which method was
//! called, never inferred from the payload.

use std::fmt;

use async_trait::async_trait;
use geojson::{Feature, Geometry};
use serde::Serialize;

use crate::domain::aoi::Aoi;
use crate::domain::error::WorkflowError;

/// Fixed name every downloaded payload is saved under.
pub const DOWNLOAD_FILENAME: &str = "data.csv";

/// Fixed MIME type recorded for every downloaded payload, regardless of the
/// content-type header the backend sends.
pub const DOWNLOAD_MIME: &str = "text/csv";

/// Wire request body shared by both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRequest {
    /// The AOI as a GeoJSON feature.
    pub geojson: Feature,
}

impl AlertRequest {
    /// Encode the current AOI for dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NoAoi`] when no AOI is drawn; a request can
    /// never reference a stale or absent geometry.
    pub fn for_aoi(aoi: Option<&Aoi>) -> Result<Self, WorkflowError> {
        let aoi = aoi.ok_or(WorkflowError::NoAoi)?;
        Ok(Self {
            geojson: Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(aoi.polygon()))),
                id: None,
                properties: None,
                foreign_members: None,
            },
        })
    }
}

/// Parsed count-endpoint result.
///
/// The shape is owned by the backend and passed through opaquely; this layer
/// only guarantees it parsed as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSummary(serde_json::Value);

impl AlertSummary {
    /// Wrap an already parsed summary value.
    #[must_use]
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value.
    #[must_use]
    pub const fn value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Take ownership of the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl fmt::Display for AlertSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw download-endpoint payload staged for a local save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Name the payload is saved under.
    pub filename: String,
    /// MIME type recorded for the save.
    pub mime_type: String,
}

impl FilePayload {
    /// Tag raw download bytes with the fixed CSV filename and MIME type.
    #[must_use]
    pub fn csv_download(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            filename: DOWNLOAD_FILENAME.to_owned(),
            mime_type: DOWNLOAD_MIME.to_owned(),
        }
    }
}

/// Errors surfaced while calling the alert backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlertFeedError {
    /// Network transport failed before a response arrived.
    #[error("alert feed transport failed: {message}")]
    Transport {
        /// Transport failure detail.
        message: String,
    },
    /// Backend answered with a non-success HTTP status.
    #[error("alert feed returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body preview or placeholder.
        message: String,
    },
    /// Count response body could not be decoded.
    #[error("alert feed response decode failed: {message}")]
    Decode {
        /// Decode failure detail.
        message: String,
    },
}

impl AlertFeedError {
    /// Build an [`AlertFeedError::Transport`] from any message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build an [`AlertFeedError::Status`] from a status code and message.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Build an [`AlertFeedError::Decode`] from any message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for the two GLAD endpoints.
///
/// Each user action maps to exactly one call on this port: one request, no
/// retry, no timeout beyond what the transport imposes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertFeed: Send + Sync {
    /// POST the AOI to the count endpoint and return its parsed summary.
    async fn count_alerts(&self, request: &AlertRequest) -> Result<AlertSummary, AlertFeedError>;

    /// POST the AOI to the download endpoint and return its raw payload,
    /// already tagged with the fixed CSV filename and MIME type.
    async fn download_points(
        &self,
        request: &AlertRequest,
    ) -> Result<FilePayload, AlertFeedError>;
}

/// Fixture implementation returning empty responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAlertFeed;

#[async_trait]
impl AlertFeed for FixtureAlertFeed {
    async fn count_alerts(&self, _request: &AlertRequest) -> Result<AlertSummary, AlertFeedError> {
        Ok(AlertSummary::new(serde_json::Value::Null))
    }

    async fn download_points(
        &self,
        _request: &AlertRequest,
    ) -> Result<FilePayload, AlertFeedError> {
        Ok(FilePayload::csv_download(Vec::new()))
    }
}
