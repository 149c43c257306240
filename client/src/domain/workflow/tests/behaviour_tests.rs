//! Behaviour-focused test cases for the AOI workflow controller.

use super::*;

#[test]
fn drawing_keeps_exactly_one_overlay() {
    let overlay = Arc::new(RecordingOverlay::default());
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = workflow(&overlay, Arc::new(ScriptedFeed::idle()), &sink, &presenter);

    for origin in [0.0, 3.0, 6.0] {
        flow.on_polygon_drawn(square(origin)).expect("draw succeeds");
    }

    assert_eq!(overlay.rendered_overlays(), 1);
    let current = flow
        .current_aoi()
        .expect("store readable")
        .expect("aoi present");
    assert_eq!(current.polygon(), &square(6.0));
}

#[test]
fn drawing_clears_the_previous_overlay_first() {
    let overlay = Arc::new(RecordingOverlay::default());
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = workflow(&overlay, Arc::new(ScriptedFeed::idle()), &sink, &presenter);

    flow.on_polygon_drawn(square(0.0)).expect("draw succeeds");
    flow.on_polygon_drawn(square(3.0)).expect("draw succeeds");

    assert_eq!(
        overlay.events(),
        vec![
            OverlayEvent::Cleared,
            OverlayEvent::Added(square(0.0)),
            OverlayEvent::Cleared,
            OverlayEvent::Added(square(3.0)),
        ]
    );
}

#[test]
fn drawing_returns_the_two_action_popup() {
    let overlay = Arc::new(RecordingOverlay::default());
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = workflow(&overlay, Arc::new(ScriptedFeed::idle()), &sink, &presenter);

    let popup = flow.on_polygon_drawn(square(0.0)).expect("draw succeeds");
    let commands: Vec<_> = popup.actions.iter().map(|action| action.command).collect();
    assert_eq!(
        commands,
        vec![AoiCommand::RunAnalysis, AoiCommand::DownloadPoints]
    );

    // Reopening the popup rebuilds identical content.
    assert_eq!(flow.popup_spec(), popup);
}

#[tokio::test]
async fn run_analysis_presents_the_summary() {
    let summary = AlertSummary::new(serde_json::json!({ "count": 42 }));
    let overlay = Arc::new(RecordingOverlay::default());
    let feed = Arc::new(ScriptedFeed::with_counts(vec![Ok(summary.clone())]));
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = workflow(&overlay, feed.clone(), &sink, &presenter);

    flow.on_polygon_drawn(square(2.0)).expect("draw succeeds");
    let result = flow.run_analysis().await.expect("analysis succeeds");

    assert_eq!(result, summary);
    assert_eq!(presenter.summaries(), vec![summary]);
    assert!(presenter.errors().is_empty());
    assert_eq!(feed.calls.load(Ordering::SeqCst), 1);
    assert!(sink.saved().is_empty(), "count path must not touch the sink");
}

#[tokio::test]
async fn run_analysis_sends_the_latest_polygon() {
    let overlay = Arc::new(RecordingOverlay::default());
    let feed = Arc::new(ScriptedFeed::with_counts(vec![Ok(AlertSummary::new(
        serde_json::Value::Null,
    ))]));
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = workflow(&overlay, feed.clone(), &sink, &presenter);

    flow.on_polygon_drawn(square(1.0)).expect("draw succeeds");
    flow.on_polygon_drawn(square(4.0)).expect("draw succeeds");
    flow.run_analysis().await.expect("analysis succeeds");

    let requests = feed.requests();
    assert_eq!(requests.len(), 1);
    let geometry = requests[0]
        .geojson
        .geometry
        .clone()
        .expect("geometry present");
    let sent = Polygon::<f64>::try_from(geometry.value).expect("polygon decodes");
    assert_eq!(sent, square(4.0), "request must carry the latest polygon");
}

#[rstest]
#[case::count(AoiCommand::RunAnalysis)]
#[case::download(AoiCommand::DownloadPoints)]
#[tokio::test]
async fn actions_without_aoi_fail_without_any_request(#[case] command: AoiCommand) {
    let overlay = Arc::new(RecordingOverlay::default());
    let feed = Arc::new(ScriptedFeed::idle());
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = workflow(&overlay, feed.clone(), &sink, &presenter);

    let error = match command {
        AoiCommand::RunAnalysis => flow.run_analysis().await.err(),
        AoiCommand::DownloadPoints => flow.download_points().await.err(),
    }
    .expect("action must fail");

    assert_eq!(error, WorkflowError::NoAoi);
    assert_eq!(feed.calls.load(Ordering::SeqCst), 0);
    assert_eq!(presenter.errors(), vec![WorkflowError::NoAoi]);
}

#[tokio::test]
async fn download_saves_the_payload_unchanged() {
    let overlay = Arc::new(RecordingOverlay::default());
    let feed = Arc::new(ScriptedFeed::with_downloads(vec![Ok(
        FilePayload::csv_download(b"a,b\n1,2".to_vec()),
    )]));
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = workflow(&overlay, feed.clone(), &sink, &presenter);

    flow.on_polygon_drawn(square(0.0)).expect("draw succeeds");
    flow.download_points().await.expect("download succeeds");

    let saved = sink.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].bytes, b"a,b\n1,2");
    assert_eq!(saved[0].filename, "data.csv");
    assert_eq!(saved[0].mime_type, "text/csv");
    assert!(
        presenter.summaries().is_empty(),
        "download path must not present a summary"
    );
    assert!(presenter.errors().is_empty());
}

#[rstest]
#[case::transport(
    AlertFeedError::transport("connection refused"),
    WorkflowError::request_failed("alert feed transport failed: connection refused")
)]
#[case::status(
    AlertFeedError::status(500, "backend unavailable"),
    WorkflowError::request_failed("alert feed returned status 500: backend unavailable")
)]
#[case::decode(
    AlertFeedError::decode("expected value at line 1"),
    WorkflowError::malformed_response("alert feed response decode failed: expected value at line 1")
)]
#[tokio::test]
async fn feed_errors_surface_once_without_retry(
    #[case] feed_error: AlertFeedError,
    #[case] expected: WorkflowError,
) {
    let overlay = Arc::new(RecordingOverlay::default());
    let feed = Arc::new(ScriptedFeed::with_counts(vec![Err(feed_error)]));
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = workflow(&overlay, feed.clone(), &sink, &presenter);

    flow.on_polygon_drawn(square(0.0)).expect("draw succeeds");
    let error = flow.run_analysis().await.expect_err("analysis fails");

    assert_eq!(error, expected);
    assert_eq!(feed.calls.load(Ordering::SeqCst), 1, "no retry is attempted");
    assert_eq!(presenter.errors(), vec![expected]);
    assert!(presenter.summaries().is_empty());
}

#[tokio::test]
async fn failed_save_surfaces_download_failed() {
    let overlay = Arc::new(RecordingOverlay::default());
    let feed = Arc::new(ScriptedFeed::with_downloads(vec![Ok(
        FilePayload::csv_download(b"a,b\n1,2".to_vec()),
    )]));
    let sink = Arc::new(RecordingSink::failing(FileSinkError::write("disk full")));
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = workflow(&overlay, feed, &sink, &presenter);

    flow.on_polygon_drawn(square(0.0)).expect("draw succeeds");
    let error = flow.download_points().await.expect_err("save fails");

    assert_eq!(
        error,
        WorkflowError::download_failed("file save failed: disk full")
    );
    assert_eq!(presenter.errors(), vec![error]);
}

#[tokio::test]
async fn stale_count_response_is_discarded_quietly() {
    let overlay = Arc::new(RecordingOverlay::default());
    let feed = Arc::new(RedrawingFeed::new());
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = Arc::new(workflow(&overlay, feed.clone(), &sink, &presenter));

    flow.on_polygon_drawn(square(0.0)).expect("draw succeeds");
    feed.arm(&flow);
    let error = flow
        .run_analysis()
        .await
        .expect_err("stale response must not surface");

    assert_eq!(error, WorkflowError::SupersededAoi);
    assert!(presenter.summaries().is_empty());
    assert!(presenter.errors().is_empty(), "discard is silent");
}

#[tokio::test]
async fn stale_download_is_not_saved() {
    let overlay = Arc::new(RecordingOverlay::default());
    let feed = Arc::new(RedrawingFeed::new());
    let sink = Arc::new(RecordingSink::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let flow = Arc::new(workflow(&overlay, feed.clone(), &sink, &presenter));

    flow.on_polygon_drawn(square(0.0)).expect("draw succeeds");
    feed.arm(&flow);
    let error = flow
        .download_points()
        .await
        .expect_err("stale download must not save");

    assert_eq!(error, WorkflowError::SupersededAoi);
    assert!(sink.saved().is_empty());
    assert!(presenter.errors().is_empty(), "discard is silent");
}
