//! Driven port for presenting analysis outcomes to the user.
//!
//! The workflow delivers a parsed summary synchronously once it arrives;
//! how it is rendered (modal, panel, stdout) is the adapter's concern.
//! Errors travel through their own channel so a failure is never mistaken
//! for an empty result.

use super::alert_feed::AlertSummary;
use crate::domain::error::WorkflowError;

/// Port for the UI surface that shows results and errors.
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisPresenter: Send + Sync {
    /// Present the parsed count summary for the current AOI.
    fn show_summary(&self, summary: &AlertSummary);

    /// Surface a workflow error distinctly from any successful result.
    fn show_error(&self, error: &WorkflowError);
}

/// Fixture implementation that discards presentations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAnalysisPresenter;

impl AnalysisPresenter for FixtureAnalysisPresenter {
    fn show_summary(&self, _summary: &AlertSummary) {}

    fn show_error(&self, _error: &WorkflowError) {}
}
