//! Relief Service Library
//!
//! HTTP handlers and types for the windowed elevation query service.
//! This library is used by both the relief-service binary and integration
//! tests.

pub mod handlers;

use relief::Dataset;

/// Application state shared across handlers.
pub struct AppState {
    /// Configured datasets, compacted and ready to serve.
    pub datasets: Vec<Dataset>,
}

impl AppState {
    /// Look up a dataset by its route name.
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.config().name == name)
    }
}

// Re-export commonly used types for convenience
pub use handlers::{ErrorResponse, HealthResponse, WindowQuery};
