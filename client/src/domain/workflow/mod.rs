//! Workflow controller wiring the drawing tool, AOI store, and backend.
//!
//! The controller owns the single-AOI invariant: every completed shape
//! clears the previous overlay before the new one is added, and the store
//! never holds two AOIs. Each replacement advances a generation marker so a
//! response that arrives for a replaced AOI is discarded instead of
//! presented. Both user actions are single best-effort attempts: one request,
//! no retry, no timeout, no cancellation of in-flight calls.

use std::sync::{Arc, Mutex};

use geo_types::Polygon;
use tracing::debug;

use crate::domain::aoi::{Aoi, AoiGeneration, AoiStore};
use crate::domain::error::WorkflowError;
use crate::domain::popup::{PopupSpec, build_popup};
use crate::domain::ports::{
    AlertFeed, AlertFeedError, AlertRequest, AlertSummary, AnalysisPresenter, FileSink,
    FileSinkError, OverlayLayer,
};

/// Collaborator bundle for [`AoiWorkflow`].
pub struct AoiWorkflowPorts {
    /// Map layer group rendering the drawn AOI.
    pub overlay: Arc<dyn OverlayLayer>,
    /// Backend feed answering count and download requests.
    pub feed: Arc<dyn AlertFeed>,
    /// Local sink for downloaded payloads.
    pub sink: Arc<dyn FileSink>,
    /// UI surface showing summaries and errors.
    pub presenter: Arc<dyn AnalysisPresenter>,
}

impl AoiWorkflowPorts {
    /// Bundle the workflow collaborators.
    #[must_use]
    pub fn new(
        overlay: Arc<dyn OverlayLayer>,
        feed: Arc<dyn AlertFeed>,
        sink: Arc<dyn FileSink>,
        presenter: Arc<dyn AnalysisPresenter>,
    ) -> Self {
        Self {
            overlay,
            feed,
            sink,
            presenter,
        }
    }
}

/// Controller owning the AOI lifecycle and the two user actions.
///
/// Constructed once per map session; there are no ambient globals. The
/// drawing tool feeds completed shapes into [`AoiWorkflow::on_polygon_drawn`]
/// and the popup dispatches [`AoiWorkflow::run_analysis`] or
/// [`AoiWorkflow::download_points`].
pub struct AoiWorkflow {
    overlay: Arc<dyn OverlayLayer>,
    feed: Arc<dyn AlertFeed>,
    sink: Arc<dyn FileSink>,
    presenter: Arc<dyn AnalysisPresenter>,
    store: Mutex<AoiStore>,
}

impl AoiWorkflow {
    /// Build a workflow with no AOI drawn.
    #[must_use]
    pub fn new(ports: AoiWorkflowPorts) -> Self {
        Self {
            overlay: ports.overlay,
            feed: ports.feed,
            sink: ports.sink,
            presenter: ports.presenter,
            store: Mutex::new(AoiStore::default()),
        }
    }

    /// Handle a completed shape from the drawing tool.
    ///
    /// Any previous overlay is removed before the new one is added, then the
    /// store is updated, so the map and the store always agree on the single
    /// current AOI. Returns the popup to attach to the new overlay.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Internal`] when the store lock is poisoned.
    pub fn on_polygon_drawn(&self, polygon: Polygon<f64>) -> Result<PopupSpec, WorkflowError> {
        let generation = {
            let mut store = self.lock_store()?;
            self.overlay.clear();
            self.overlay.add_polygon(&polygon);
            store.replace(polygon).generation()
        };
        debug!(
            generation = generation.value(),
            "replaced area of interest"
        );
        Ok(build_popup())
    }

    /// Popup content for the AOI overlay, rebuilt on every open.
    #[must_use]
    pub fn popup_spec(&self) -> PopupSpec {
        build_popup()
    }

    /// Snapshot of the current AOI, or `None` when nothing is drawn.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Internal`] when the store lock is poisoned.
    pub fn current_aoi(&self) -> Result<Option<Aoi>, WorkflowError> {
        Ok(self.lock_store()?.current().cloned())
    }

    /// Count alerts inside the current AOI and present the summary.
    ///
    /// On success the summary is delivered to the presenter and returned.
    /// Errors are shown through the presenter's error channel before being
    /// returned, except [`WorkflowError::SupersededAoi`], which is discarded
    /// quietly because the user has already moved on to a new AOI.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NoAoi`] with no request issued when nothing
    /// is drawn, [`WorkflowError::RequestFailed`] on transport failures or
    /// non-success statuses, [`WorkflowError::MalformedResponse`] when the
    /// body does not parse, and [`WorkflowError::SupersededAoi`] when the
    /// AOI changed while the request was in flight.
    pub async fn run_analysis(&self) -> Result<AlertSummary, WorkflowError> {
        let outcome = self.count_attempt().await;
        outcome.map_err(|error| self.report(error))
    }

    /// Download the raw alert points for the current AOI and save them.
    ///
    /// Follows the same error delivery rules as [`AoiWorkflow::run_analysis`];
    /// a successful save produces no feedback beyond the saved file.
    ///
    /// # Errors
    ///
    /// As [`AoiWorkflow::run_analysis`], with
    /// [`WorkflowError::DownloadFailed`] replacing the malformed-response
    /// case when the sink cannot complete the save.
    pub async fn download_points(&self) -> Result<(), WorkflowError> {
        let outcome = self.download_attempt().await;
        outcome.map_err(|error| self.report(error))
    }

    async fn count_attempt(&self) -> Result<AlertSummary, WorkflowError> {
        let (request, generation) = self.encode_current()?;
        let summary = self
            .feed
            .count_alerts(&request)
            .await
            .map_err(map_feed_error)?;
        self.ensure_current(generation)?;
        self.presenter.show_summary(&summary);
        Ok(summary)
    }

    async fn download_attempt(&self) -> Result<(), WorkflowError> {
        let (request, generation) = self.encode_current()?;
        let payload = self
            .feed
            .download_points(&request)
            .await
            .map_err(map_feed_error)?;
        self.ensure_current(generation)?;
        self.sink.save(&payload).map_err(map_sink_error)?;
        Ok(())
    }

    fn encode_current(&self) -> Result<(AlertRequest, AoiGeneration), WorkflowError> {
        let store = self.lock_store()?;
        let aoi = store.current().ok_or(WorkflowError::NoAoi)?;
        Ok((AlertRequest::for_aoi(Some(aoi))?, aoi.generation()))
    }

    fn ensure_current(&self, generation: AoiGeneration) -> Result<(), WorkflowError> {
        let store = self.lock_store()?;
        match store.current() {
            Some(aoi) if aoi.generation() == generation => Ok(()),
            _ => Err(WorkflowError::SupersededAoi),
        }
    }

    fn lock_store(&self) -> Result<std::sync::MutexGuard<'_, AoiStore>, WorkflowError> {
        self.store
            .lock()
            .map_err(|_| WorkflowError::internal("aoi store lock poisoned"))
    }

    fn report(&self, error: WorkflowError) -> WorkflowError {
        if matches!(error, WorkflowError::SupersededAoi) {
            debug!("discarded response for a replaced area of interest");
        } else {
            self.presenter.show_error(&error);
        }
        error
    }
}

fn map_feed_error(error: AlertFeedError) -> WorkflowError {
    match &error {
        AlertFeedError::Transport { .. } | AlertFeedError::Status { .. } => {
            WorkflowError::request_failed(error.to_string())
        }
        AlertFeedError::Decode { .. } => WorkflowError::malformed_response(error.to_string()),
    }
}

fn map_sink_error(error: FileSinkError) -> WorkflowError {
    WorkflowError::download_failed(error.to_string())
}
