//! Error types for the county overlay converter.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("kml parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("placemark {placemark}: bad coordinate {detail}")]
    InvalidCoordinate { placemark: String, detail: String },

    #[error("failed to encode geojson: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
