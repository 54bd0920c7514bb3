use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EdaError>;

#[derive(Error, Debug)]
pub enum EdaError {
    /// Input file missing or unreadable
    #[error("failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Delimited table with a bad structure or missing columns
    #[error("malformed table {}: {source}", .path.display())]
    Table { path: PathBuf, source: csv::Error },

    /// GeoJSON that is not a readable feature collection
    #[error("malformed geometry file {}: {reason}", .path.display())]
    Geometry { path: PathBuf, reason: String },

    #[error("listing {listing_id}: price '{raw}' is not a number")]
    MalformedPrice { listing_id: String, raw: String },

    #[error("listing {listing_id}: {field} '{raw}' is not a valid count")]
    MalformedCount {
        listing_id: String,
        field: &'static str,
        raw: String,
    },

    #[error("review {review_id}: date '{raw}' is not an ISO date")]
    MalformedDate { review_id: String, raw: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EdaError {
    /// True for errors raised while coercing individual rows, as opposed to whole-file failures.
    pub fn is_data_quality(&self) -> bool {
        matches!(
            self,
            EdaError::MalformedPrice { .. }
                | EdaError::MalformedCount { .. }
                | EdaError::MalformedDate { .. }
        )
    }
}
