// File: crates/linegraph-core/src/error.rs
// Summary: Error type for graph construction and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("data set is empty and no visible range was given")]
    EmptyData,

    #[error("unknown curve `{0}`")]
    UnknownCurve(String),

    #[error("invalid format specifier `{spec}`: {reason}")]
    Format { spec: String, reason: String },

    #[error("graph size must be positive, got {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    pub(crate) fn format(spec: &str, reason: impl Into<String>) -> Self {
        GraphError::Format { spec: spec.to_string(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
