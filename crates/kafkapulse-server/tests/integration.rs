//! Routes served from a running feed rather than a hand-fed channel.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use kafkapulse_assistant::{
    Assistant, StaticGenerator, SUMMARY_ERROR_FALLBACK, TextGenerator,
};
use kafkapulse_core::{ClusterInfo, FeedConfig, FixedJitter, MetricFeed, MetricSimulator};
use kafkapulse_server::{AppState, build_router};
use tower::ServiceExt;

fn config() -> FeedConfig {
    FeedConfig {
        window_size: 20,
        interval: Duration::from_secs(5),
    }
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(start_paused = true)]
async fn metrics_follow_feed_ticks() {
    let sim = MetricSimulator::with_jitter(Box::new(FixedJitter::new(0.0)));
    let feed = MetricFeed::spawn(sim, config());
    let generator: Arc<dyn TextGenerator> = Arc::new(StaticGenerator::reply("ok"));
    let app = build_router(AppState::new(
        feed.subscribe(),
        ClusterInfo::default(),
        Assistant::new(generator),
    ));

    let (status, json) = get_json(app.clone(), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["generation"], 0);

    let mut rx = feed.subscribe();
    tokio::time::sleep(Duration::from_millis(5001)).await;
    rx.changed().await.unwrap();

    let (_, json) = get_json(app, "/metrics").await;
    assert_eq!(json["generation"], 1);
    assert_eq!(json["records"].as_array().map(|a| a.len()), Some(20));

    feed.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn failed_analysis_does_not_stall_feed() {
    let sim = MetricSimulator::with_jitter(Box::new(FixedJitter::new(0.4)));
    let feed = MetricFeed::spawn(sim, config());
    let generator: Arc<dyn TextGenerator> = Arc::new(StaticGenerator::failing("quota exceeded"));
    let app = build_router(AppState::new(
        feed.subscribe(),
        ClusterInfo::default(),
        Assistant::new(generator),
    ));

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analysis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["summary"], SUMMARY_ERROR_FALLBACK);

    let mut rx = feed.subscribe();
    assert!(feed.advance_now());
    rx.changed().await.unwrap();
    let (_, health) = get_json(app, "/health").await;
    assert_eq!(health["generation"], 1);

    feed.shutdown().await;
}
