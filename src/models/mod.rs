pub mod listing;
pub mod neighbourhood;
pub mod review;

pub use listing::{Listing, RawListing};
pub use neighbourhood::{Neighbourhood, Waterway};
pub use review::{RawReview, Review};
