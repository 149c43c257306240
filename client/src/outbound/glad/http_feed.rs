//! Reqwest-backed GLAD alert feed adapter.
//!
//! This adapter owns transport details only: request serialisation, HTTP
//! error mapping, and JSON decoding of count summaries. Download bodies pass
//! through untouched so the domain can apply its fixed CSV metadata.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::codec::{Endpoint, EndpointUrlError, endpoint_url};
use crate::domain::ports::{AlertFeed, AlertFeedError, AlertRequest, AlertSummary, FilePayload};

/// Alert feed adapter that POSTs the AOI to one of two fixed endpoint URLs.
///
/// Both URLs are derived once at construction; per-request dispatch never
/// rebuilds or rewrites them. Requests run exactly once with no retry and no
/// client-side timeout.
#[derive(Debug)]
pub struct GladHttpFeed {
    client: Client,
    count_url: Url,
    download_url: Url,
}

/// Errors raised while building the GLAD feed adapter.
#[derive(Debug, thiserror::Error)]
pub enum GladFeedBuildError {
    /// The service base URL cannot address the GLAD endpoints.
    #[error("unusable service base URL: {0}")]
    BaseUrl(#[from] EndpointUrlError),
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client construction failed: {0}")]
    Client(#[from] reqwest::Error),
}

impl GladHttpFeed {
    /// Build an adapter addressing both endpoints under `base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot take path segments or when
    /// the reqwest client cannot be constructed.
    pub fn new(base: &Url) -> Result<Self, GladFeedBuildError> {
        let count_url = endpoint_url(base, Endpoint::AlertCount)?;
        let download_url = endpoint_url(base, Endpoint::PointDownload)?;
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            count_url,
            download_url,
        })
    }

    async fn post(&self, url: Url, request: &AlertRequest) -> Result<Vec<u8>, AlertFeedError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl AlertFeed for GladHttpFeed {
    async fn count_alerts(&self, request: &AlertRequest) -> Result<AlertSummary, AlertFeedError> {
        let body = self.post(self.count_url.clone(), request).await?;
        parse_summary(&body)
    }

    async fn download_points(
        &self,
        request: &AlertRequest,
    ) -> Result<FilePayload, AlertFeedError> {
        let body = self.post(self.download_url.clone(), request).await?;
        Ok(FilePayload::csv_download(body))
    }
}

fn parse_summary(body: &[u8]) -> Result<AlertSummary, AlertFeedError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|error| AlertFeedError::decode(format!("invalid summary JSON: {error}")))?;
    Ok(AlertSummary::new(value))
}

fn map_transport_error(error: reqwest::Error) -> AlertFeedError {
    AlertFeedError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AlertFeedError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        "no response body".to_owned()
    } else {
        preview
    };
    AlertFeedError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network GLAD feed helpers.

    use rstest::rstest;

    use super::*;

    #[test]
    fn resolves_both_endpoint_urls_from_one_base() {
        let base = Url::parse("https://api.example.net/forest-watch/").expect("base should parse");
        let feed = GladHttpFeed::new(&base).expect("adapter should build");

        assert_eq!(
            feed.count_url.as_str(),
            "https://api.example.net/forest-watch/glad-alerts"
        );
        assert_eq!(
            feed.download_url.as_str(),
            "https://api.example.net/forest-watch/glad-alerts/download"
        );
    }

    #[test]
    fn rejects_a_base_url_that_cannot_take_segments() {
        let base = Url::parse("mailto:ops@example.net").expect("base should parse");
        let error = GladHttpFeed::new(&base).expect_err("adapter must not build");
        assert!(matches!(error, GladFeedBuildError::BaseUrl { .. }));
    }

    #[test]
    fn parses_any_json_value_as_a_summary() {
        let summary =
            parse_summary(br#"{"count": 42, "period": "2023"}"#).expect("JSON should decode");
        assert_eq!(summary.value()["count"], 42);
    }

    #[test]
    fn rejects_non_json_summary_bodies() {
        let error = parse_summary(b"<html>oops</html>").expect_err("decode should fail");
        assert!(matches!(error, AlertFeedError::Decode { .. }));
    }

    #[rstest]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, 500)]
    #[case::not_found(StatusCode::NOT_FOUND, 404)]
    fn maps_statuses_with_a_whitespace_collapsed_preview(
        #[case] status: StatusCode,
        #[case] code: u16,
    ) {
        let error = map_status_error(status, b"{\n  \"error\":   \"boom\"\n}");
        assert_eq!(error, AlertFeedError::status(code, "{ \"error\": \"boom\" }"));
    }

    #[test]
    fn status_without_body_uses_a_placeholder() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(error, AlertFeedError::status(502, "no response body"));
    }

    #[test]
    fn long_bodies_are_truncated_in_previews() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
