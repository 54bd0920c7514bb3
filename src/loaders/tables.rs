use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;

use crate::error::{EdaError, Result};
use crate::models::{RawListing, RawReview};

pub fn read_listings(path: &Path) -> Result<Vec<RawListing>> {
    read_listings_from(open(path)?, path)
}

pub fn read_reviews(path: &Path) -> Result<Vec<RawReview>> {
    read_reviews_from(open(path)?, path)
}

/// `origin` only labels errors; the rows come from `reader`.
pub fn read_listings_from<R: Read>(reader: R, origin: &Path) -> Result<Vec<RawListing>> {
    let rows = read_table(reader, origin)?;
    info!("Loaded {} listings from {}", rows.len(), origin.display());
    Ok(rows)
}

pub fn read_reviews_from<R: Read>(reader: R, origin: &Path) -> Result<Vec<RawReview>> {
    let rows = read_table(reader, origin)?;
    info!("Loaded {} reviews from {}", rows.len(), origin.display());
    Ok(rows)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| EdaError::Load {
        path: path.to_path_buf(),
        source,
    })
}

// Whole table or nothing: the first bad record aborts the load.
fn read_table<T: DeserializeOwned, R: Read>(reader: R, origin: &Path) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|source| EdaError::Table {
            path: origin.to_path_buf(),
            source,
        })
}
