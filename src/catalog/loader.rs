//! JSON catalog loading.
//!
//! The catalog supplier hands the engine an array of already-typed records.
//! Record ids must be unique: scoring contexts track membership by id.
//! Integer fields (`year`, `passengers`) accept integral floats such as `8.0`;
//! condition ratings accept a label or a 0..=5 ordinal.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::catalog::models::AircraftRecord;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog")]
    Parse(#[from] serde_json::Error),
    #[error("record at index {index} has an empty id")]
    MissingId { index: usize },
    #[error("duplicate record id '{0}'")]
    DuplicateId(String),
}

/// Parse a catalog from a JSON array of records.
pub fn parse_catalog(json: &str) -> Result<Vec<AircraftRecord>, CatalogError> {
    let records: Vec<AircraftRecord> = serde_json::from_str(json)?;
    validate_ids(&records)?;
    Ok(records)
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<AircraftRecord>, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let records = parse_catalog(&contents)?;
    info!(path = %path.display(), records = records.len(), "Catalog loaded");
    Ok(records)
}

fn validate_ids(records: &[AircraftRecord]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(CatalogError::MissingId { index });
        }
        if !seen.insert(record.id.as_str()) {
            return Err(CatalogError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}
