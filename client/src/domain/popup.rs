//! Popup action descriptors for the drawn AOI.
//!
//! The popup is described as data: a title plus label-to-command bindings.
//! Whatever UI layer renders it dispatches the chosen command back to the
//! workflow, so no global function names leak into markup. Content does not
//! vary with the AOI shape; it is rebuilt on every open because the widget
//! does not retain content across opens.

/// Commands a popup action can invoke on the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AoiCommand {
    /// Count alerts inside the current AOI and present the summary.
    RunAnalysis,
    /// Download the raw alert points for the current AOI.
    DownloadPoints,
}

/// One popup button bound to a workflow command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupAction {
    /// Button label shown to the user.
    pub label: &'static str,
    /// Command dispatched when the button is activated.
    pub command: AoiCommand,
}

/// Popup content attached to the AOI overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupSpec {
    /// Heading shown above the actions.
    pub title: &'static str,
    /// Actions in presentation order.
    pub actions: Vec<PopupAction>,
}

/// Build the two-action popup shown on the AOI overlay.
#[must_use]
pub fn build_popup() -> PopupSpec {
    PopupSpec {
        title: "GLAD Alerts by AOI",
        actions: vec![
            PopupAction {
                label: "Run analysis",
                command: AoiCommand::RunAnalysis,
            },
            PopupAction {
                label: "Download points",
                command: AoiCommand::DownloadPoints,
            },
        ],
    }
}
