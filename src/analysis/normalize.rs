use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{EdaError, Result};
use crate::models::{Listing, RawListing, RawReview, Review};

lazy_static! {
    static ref CURRENCY_NOISE: Regex = Regex::new(r"[$,]").unwrap();
    static ref DECIMAL: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap();
}

const REVIEW_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a formatted nightly price such as `"$1,234.00"`.
pub fn parse_price(listing_id: &str, raw: &str) -> Result<f64> {
    let stripped = CURRENCY_NOISE.replace_all(raw.trim(), "");

    if !DECIMAL.is_match(&stripped) {
        return Err(malformed_price(listing_id, raw));
    }

    stripped
        .parse::<f64>()
        .map_err(|_| malformed_price(listing_id, raw))
}

fn malformed_price(listing_id: &str, raw: &str) -> EdaError {
    EdaError::MalformedPrice {
        listing_id: listing_id.to_string(),
        raw: raw.to_string(),
    }
}

fn parse_count(listing_id: &str, field: &'static str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| malformed_count(listing_id, field, raw))
}

/// A listing sleeps at least one guest.
fn parse_capacity(listing_id: &str, raw: &str) -> Result<u32> {
    match parse_count(listing_id, "accommodates", raw)? {
        0 => Err(malformed_count(listing_id, "accommodates", raw)),
        n => Ok(n),
    }
}

fn malformed_count(listing_id: &str, field: &'static str, raw: &str) -> EdaError {
    EdaError::MalformedCount {
        listing_id: listing_id.to_string(),
        field,
        raw: raw.to_string(),
    }
}

pub fn normalize_listing(raw: &RawListing) -> Result<Listing> {
    let price = parse_price(&raw.id, &raw.price)?;
    let accommodates = parse_capacity(&raw.id, &raw.accommodates)?;
    let number_of_reviews = parse_count(&raw.id, "number_of_reviews", &raw.number_of_reviews)?;

    Ok(Listing {
        id: raw.id.trim().to_string(),
        host_id: raw.host_id.trim().to_string(),
        neighbourhood: raw.neighbourhood_cleansed.clone(),
        neighbourhood_group: raw.neighbourhood_group_cleansed.clone().unwrap_or_default(),
        property_type: raw.property_type.clone().unwrap_or_default(),
        price,
        accommodates,
        number_of_reviews,
    })
}

/// Fails on the first listing that cannot be coerced.
pub fn normalize_listings(raw: &[RawListing]) -> Result<Vec<Listing>> {
    raw.iter().map(normalize_listing).collect()
}

pub fn normalize_review(raw: &RawReview) -> Result<Review> {
    let date = NaiveDate::parse_from_str(raw.date.trim(), REVIEW_DATE_FORMAT).map_err(|_| {
        EdaError::MalformedDate {
            review_id: raw.id.clone(),
            raw: raw.date.clone(),
        }
    })?;

    Ok(Review {
        id: raw.id.trim().to_string(),
        listing_id: raw.listing_id.trim().to_string(),
        reviewer_id: raw.reviewer_id.trim().to_string(),
        date,
        comments: raw.comments.clone(),
    })
}

pub fn normalize_reviews(raw: &[RawReview]) -> Result<Vec<Review>> {
    raw.iter().map(normalize_review).collect()
}
