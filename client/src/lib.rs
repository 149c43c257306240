//! GLAD alert AOI client library modules.

pub mod aoi_file;
pub mod domain;
pub mod outbound;

/// Workflow controller driving every AOI action.
pub use domain::AoiWorkflow;
