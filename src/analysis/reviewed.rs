use crate::models::Listing;

/// Listings with at least one review. Neighbourhood and property level figures should be
/// computed over this view; the unfiltered set is only for before/after comparisons.
pub fn reviewed_listings(listings: &[Listing]) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| listing.has_reviews())
        .cloned()
        .collect()
}

pub fn in_neighbourhood(listings: &[Listing], neighbourhood: &str) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| listing.neighbourhood == neighbourhood)
        .cloned()
        .collect()
}
