//! Domain model for the GLAD alert workflow.
//!
//! Purpose: Hold the area-of-interest state machine, the popup action
//! descriptors, and the error taxonomy, independent of any map widget or
//! HTTP stack. Infrastructure is reached exclusively through the traits in
//! [`ports`].
//!
//! Public surface:
//! - AoiWorkflow (alias to `workflow::AoiWorkflow`) — workflow controller.
//! - AoiStore (alias to `aoi::AoiStore`) — single-AOI state holder.
//! - PopupSpec (alias to `popup::PopupSpec`) — popup action descriptor.
//! - WorkflowError (alias to `error::WorkflowError`) — error taxonomy.

pub mod aoi;
pub mod error;
pub mod popup;
pub mod ports;
pub mod workflow;

pub use self::aoi::{Aoi, AoiGeneration, AoiStore};
pub use self::error::WorkflowError;
pub use self::popup::{AoiCommand, PopupAction, PopupSpec, build_popup};
pub use self::workflow::{AoiWorkflow, AoiWorkflowPorts};
