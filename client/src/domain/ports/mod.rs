//! Domain ports and supporting types for the hexagonal boundary.

mod alert_feed;
mod analysis_presenter;
mod file_sink;
mod overlay_layer;

#[cfg(test)]
pub use alert_feed::MockAlertFeed;
pub use alert_feed::{
    AlertFeed, AlertFeedError, AlertRequest, AlertSummary, DOWNLOAD_FILENAME, DOWNLOAD_MIME,
    FilePayload, FixtureAlertFeed,
};
#[cfg(test)]
pub use analysis_presenter::MockAnalysisPresenter;
pub use analysis_presenter::{AnalysisPresenter, FixtureAnalysisPresenter};
#[cfg(test)]
pub use file_sink::MockFileSink;
pub use file_sink::{FileSink, FileSinkError, FixtureFileSink};
#[cfg(test)]
pub use overlay_layer::MockOverlayLayer;
pub use overlay_layer::{FixtureOverlayLayer, OverlayLayer};
