//! Ingestion of registry metadata records.
//!
//! The upstream collector (network retrieval, CSV column coercion) is an
//! external collaborator; this module only deserializes its already-parsed
//! output: a JSON array of records in the fixed registry layout. Missing
//! collection-valued fields deserialize as empty containers so a sparse
//! record never produces a panic downstream.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::errors::IngestError;

/// One registry metadata row, as supplied by the data collector.
///
/// Field names follow the registry's camelCase wire layout.
/// `dev_dependencies`, `community_interest`, and `downloads_acceleration`
/// are carried for fidelity with the collector's output but are not used
/// when building the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub community_interest: f64,
    #[serde(default)]
    pub downloads_count: f64,
    #[serde(default)]
    pub downloads_acceleration: f64,
    #[serde(default)]
    pub dependents_count: f64,
    #[serde(default)]
    pub quality: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub maintenance: f64,
    #[serde(default)]
    pub maintainers: Vec<String>,
}

impl PackageRecord {
    /// Minimal record with only a name; everything else empty/zero.
    /// Convenient for tests and synthetic data generators.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: String::new(),
            description: String::new(),
            keywords: Vec::new(),
            dependencies: BTreeMap::new(),
            dev_dependencies: BTreeMap::new(),
            community_interest: 0.0,
            downloads_count: 0.0,
            downloads_acceleration: 0.0,
            dependents_count: 0.0,
            quality: 0.0,
            popularity: 0.0,
            maintenance: 0.0,
            maintainers: Vec::new(),
        }
    }

    /// The record's maintainer identifiers as a set (input order irrelevant).
    #[must_use]
    pub fn maintainer_set(&self) -> BTreeSet<String> {
        self.maintainers.iter().cloned().collect()
    }
}

/// Parse a JSON array of records.
///
/// # Errors
/// Returns `IngestError::Json` when the payload is not a valid record array.
pub fn records_from_str(data: &str, origin: &Path) -> Result<Vec<PackageRecord>, IngestError> {
    serde_json::from_str::<Vec<PackageRecord>>(data)
        .map_err(|source| IngestError::Json { file: origin.to_path_buf(), source })
}

/// Load records from a JSON file on disk.
///
/// # Errors
/// Returns `IngestError::Io` if the file cannot be read and
/// `IngestError::Json` if its contents are not a valid record array.
pub fn load_records(path: &Path) -> Result<Vec<PackageRecord>, IngestError> {
    let data = std::fs::read_to_string(path)
        .map_err(|source| IngestError::Io { file: path.to_path_buf(), source })?;
    records_from_str(&data, path)
}
