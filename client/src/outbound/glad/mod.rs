//! GLAD alert service outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `AlertFeed` port.

mod codec;
mod http_feed;

pub use codec::{Endpoint, EndpointUrlError, endpoint_url};
pub use http_feed::{GladFeedBuildError, GladHttpFeed};
