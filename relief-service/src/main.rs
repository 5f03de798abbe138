//! Relief Service - HTTP service for windowed planetary elevation queries.
//!
//! Serves rectangular windows of compacted digital-elevation-model
//! mosaics. On startup every configured dataset is run through the
//! compaction gate (a one-time, potentially long pass per dataset); the
//! listener only starts accepting traffic once all available datasets are
//! ready.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RELIEF_DATA_DIR` | Directory containing rasters and `datasets.json` | `.` |
//! | `RELIEF_MANIFEST` | Explicit manifest path | `$RELIEF_DATA_DIR/datasets.json` |
//! | `RELIEF_PORT` | HTTP server port | 8080 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /dem/{dataset}?x&z&width&height&stride` - Read a raster window
//! - `GET /available` - List bodies whose source raster is present
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use relief::manifest::{load_manifest, MANIFEST_FILENAME};
use relief::Dataset;
use relief_service::{handlers, AppState};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the relief service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Relief Elevation Service",
        version = "0.1.0",
        description = "Windowed queries over compacted planetary elevation mosaics.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::get_window,
        handlers::get_available,
        handlers::health_check,
    ),
    components(schemas(handlers::ErrorResponse, handlers::HealthResponse)),
    tags(
        (name = "elevation", description = "Elevation window endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relief_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("RELIEF_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let manifest_path = match std::env::var("RELIEF_MANIFEST") {
        Ok(path) => PathBuf::from(path),
        Err(_) => {
            let data_dir = std::env::var("RELIEF_DATA_DIR").unwrap_or_else(|_| {
                tracing::warn!("RELIEF_DATA_DIR not set, using current directory");
                ".".to_string()
            });
            PathBuf::from(data_dir).join(MANIFEST_FILENAME)
        }
    };

    let configs = load_manifest(&manifest_path)?;
    tracing::info!(
        manifest = %manifest_path.display(),
        datasets = configs.len(),
        port = port,
        "Starting relief service"
    );

    // Run the compaction gate for every available dataset before serving.
    // Compaction is CPU- and memory-bound, so it runs on a blocking
    // thread; datasets whose source raster is absent are skipped and will
    // 404 until their files appear and the service restarts.
    let mut datasets = Vec::with_capacity(configs.len());
    for config in configs {
        let dataset = Dataset::new(config);
        if !dataset.is_available() {
            tracing::warn!(
                dataset = %dataset.config().name,
                original = %dataset.config().original.display(),
                "Source raster missing, dataset not served"
            );
            datasets.push(dataset);
            continue;
        }

        tracing::info!(dataset = %dataset.config().name, "Ensuring marked raster");
        let dataset = tokio::task::spawn_blocking(move || {
            dataset.ensure_ready().map(|()| dataset)
        })
        .await??;
        tracing::info!(
            dataset = %dataset.config().name,
            marked = %dataset.config().marked.display(),
            "Dataset ready"
        );
        datasets.push(dataset);
    }

    let state = Arc::new(AppState { datasets });

    // Build router
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/dem/:dataset", get(handlers::get_window))
        .route("/available", get(handlers::get_available))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
