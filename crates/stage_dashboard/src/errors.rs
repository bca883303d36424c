use std::path::PathBuf;

use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum DashboardGeneratorError {
    #[error("Failed to {operation} {path:?}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    ConfigValidation(#[from] ValidationErrors),
    #[error(
        "Dashboard file {path:?} is out of date. To update it, run: cargo run --bin \
         stage_dashboard_generator -q"
    )]
    OutOfDate { path: PathBuf },
}

pub type DashboardGeneratorResult<T> = Result<T, DashboardGeneratorError>;
