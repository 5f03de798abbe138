//! Integration tests for the HTTP API.

use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::{routing::get, Router};
use axum_test::TestServer;
use relief::{codec, Dataset, DatasetConfig, SampleGrid};
use relief_service::{handlers, AppState};
use serde_json::Value;
use tempfile::TempDir;

/// Write a 4x3 raster with distinct values 1..=12, row-major. No cell has
/// a redundant interior, so the marked file matches the source exactly.
fn create_test_raster(dir: &Path, filename: &str) {
    let grid = SampleGrid::from_rows(&[&[1, 2, 3, 4], &[5, 6, 7, 8], &[9, 10, 11, 12]]);
    codec::encode_full(&dir.join(filename), &grid).unwrap();
}

fn mars_config(dir: &Path) -> DatasetConfig {
    DatasetConfig {
        name: "mars".to_string(),
        body: "Mars".to_string(),
        original: dir.join("mars.dem"),
        marked: dir.join("mars_marked.dem"),
        width: 4,
        height: 3,
        chunk_rows: None,
    }
}

/// Create a test server over the given datasets, running the compaction
/// gate for each available one first (mirrors service startup).
fn create_test_server(configs: Vec<DatasetConfig>) -> TestServer {
    let mut datasets = Vec::new();
    for config in configs {
        let dataset = Dataset::new(config);
        if dataset.is_available() {
            dataset.ensure_ready().unwrap();
        }
        datasets.push(dataset);
    }
    let state = Arc::new(AppState { datasets });

    let app = Router::new()
        .route("/dem/:dataset", get(handlers::get_window))
        .route("/available", get(handlers::get_available))
        .route("/health", get(handlers::health_check))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_window_endpoint_success() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    let response = server
        .get("/dem/mars?x=1&z=0&width=2&height=2&stride=1")
        .await;

    response.assert_status_ok();
    response.assert_text("[2, 3, 6, 7]");
}

#[tokio::test]
async fn test_window_endpoint_default_stride() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    // Omitted stride behaves as stride=1
    let response = server.get("/dem/mars?x=0&z=0&width=4&height=1").await;

    response.assert_status_ok();
    response.assert_text("[1, 2, 3, 4]");
}

#[tokio::test]
async fn test_window_endpoint_subsampled() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    let response = server
        .get("/dem/mars?x=0&z=0&width=4&height=3&stride=2")
        .await;

    response.assert_status_ok();
    response.assert_text("[1, 3, 9, 11]");
}

#[tokio::test]
async fn test_window_endpoint_wraparound() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    // Window starts one column before the eastern seam and wraps.
    let response = server
        .get("/dem/mars?x=3&z=0&width=3&height=2&stride=1")
        .await;

    response.assert_status_ok();
    response.assert_text("[4, 1, 2, 8, 5, 6]");
}

#[tokio::test]
async fn test_window_endpoint_invalid_query() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    let response = server
        .get("/dem/mars?x=0&z=0&width=0&height=2&stride=1")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["error"].as_str().is_some());

    let response = server
        .get("/dem/mars?x=0&z=0&width=2&height=2&stride=0")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_window_endpoint_origin_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    let response = server
        .get("/dem/mars?x=4&z=0&width=1&height=1&stride=1")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("out of range"));
}

#[tokio::test]
async fn test_window_endpoint_unknown_dataset() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    let response = server
        .get("/dem/venus?x=0&z=0&width=1&height=1&stride=1")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("venus"));
}

#[tokio::test]
async fn test_window_endpoint_missing_params() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    let response = server.get("/dem/mars?x=0&z=0").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_window_endpoint_marked_file_missing() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    // Marked raster removed after startup; reads must fail, not fall back
    // to the source raster.
    std::fs::remove_file(temp_dir.path().join("mars_marked.dem")).unwrap();

    let response = server
        .get("/dem/mars?x=0&z=0&width=1&height=1&stride=1")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_available_endpoint() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");

    // Second dataset has no source raster on disk.
    let moon = DatasetConfig {
        name: "moon".to_string(),
        body: "Moon".to_string(),
        original: temp_dir.path().join("moon.dem"),
        marked: temp_dir.path().join("moon_marked.dem"),
        width: 4,
        height: 3,
        chunk_rows: None,
    };
    let server = create_test_server(vec![mars_config(temp_dir.path()), moon]);

    let response = server.get("/available").await;

    response.assert_status_ok();
    response.assert_text("Mars");
}

#[tokio::test]
async fn test_available_endpoint_multiple() {
    let temp_dir = TempDir::new().unwrap();
    create_test_raster(temp_dir.path(), "mars.dem");
    create_test_raster(temp_dir.path(), "moon.dem");

    let moon = DatasetConfig {
        name: "moon".to_string(),
        body: "Moon".to_string(),
        original: temp_dir.path().join("moon.dem"),
        marked: temp_dir.path().join("moon_marked.dem"),
        width: 4,
        height: 3,
        chunk_rows: None,
    };
    let server = create_test_server(vec![mars_config(temp_dir.path()), moon]);

    let response = server.get("/available").await;

    response.assert_status_ok();
    response.assert_text("Mars,Moon");
}

#[tokio::test]
async fn test_health_endpoint() {
    let temp_dir = TempDir::new().unwrap();
    let server = create_test_server(vec![mars_config(temp_dir.path())]);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].as_str().is_some());
}
