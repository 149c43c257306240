//! Endpoint URL construction for the GLAD alert service.
//!
//! Which endpoint serves a request is fixed at the call site; nothing in the
//! outbound layer inspects response content to decide how to treat it.

use url::Url;

/// The two GLAD service endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Count endpoint answering with a JSON summary.
    AlertCount,
    /// Download endpoint answering with raw point bytes.
    PointDownload,
}

impl Endpoint {
    /// Path segments appended to the service base URL.
    #[must_use]
    pub const fn segments(self) -> &'static [&'static str] {
        match self {
            Self::AlertCount => &["glad-alerts"],
            Self::PointDownload => &["glad-alerts", "download"],
        }
    }
}

/// Errors raised while deriving an endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointUrlError {
    /// The base URL cannot carry extra path segments (for example `mailto:`).
    #[error("base URL cannot take path segments")]
    NotExtensible,
}

/// Derive the full URL for one endpoint from the service base URL.
///
/// A trailing slash on the base is collapsed, so `https://host/api` and
/// `https://host/api/` address the same endpoints.
///
/// # Errors
///
/// Returns [`EndpointUrlError::NotExtensible`] when the base URL cannot act
/// as a base for relative paths.
pub fn endpoint_url(base: &Url, endpoint: Endpoint) -> Result<Url, EndpointUrlError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| EndpointUrlError::NotExtensible)?
        .pop_if_empty()
        .extend(endpoint.segments());
    Ok(url)
}

#[cfg(test)]
mod tests {
    //! URL derivation coverage for both endpoints.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::bare_host(
        "https://api.example.net",
        Endpoint::AlertCount,
        "https://api.example.net/glad-alerts"
    )]
    #[case::trailing_slash(
        "https://api.example.net/",
        Endpoint::AlertCount,
        "https://api.example.net/glad-alerts"
    )]
    #[case::path_prefix(
        "https://api.example.net/v1",
        Endpoint::PointDownload,
        "https://api.example.net/v1/glad-alerts/download"
    )]
    #[case::path_prefix_slash(
        "https://api.example.net/v1/",
        Endpoint::PointDownload,
        "https://api.example.net/v1/glad-alerts/download"
    )]
    fn appends_endpoint_segments_to_the_base(
        #[case] base: &str,
        #[case] endpoint: Endpoint,
        #[case] expected: &str,
    ) {
        let base = Url::parse(base).expect("base should parse");
        let url = endpoint_url(&base, endpoint).expect("endpoint URL should build");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn rejects_bases_that_cannot_take_segments() {
        let base = Url::parse("mailto:ops@example.net").expect("base should parse");
        let error = endpoint_url(&base, Endpoint::AlertCount).expect_err("derivation must fail");
        assert_eq!(error, EndpointUrlError::NotExtensible);
    }
}
