use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error reading {file}: {source}")]
    Io { file: PathBuf, source: std::io::Error },
    #[error("Invalid records JSON in {file}: {source}")]
    Json { file: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Error)]
pub enum PackageGraphError {
    #[error("Package not found: {name}")]
    PackageNotFound { name: String },

    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackageGraphError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::PackageNotFound { name: name.to_string() }
    }
}
