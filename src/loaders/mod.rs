pub mod geometry;
pub mod tables;

pub use geometry::{parse_neighbourhoods, parse_waterways, read_neighbourhoods, read_waterways, Layer};
pub use tables::{read_listings, read_listings_from, read_reviews, read_reviews_from};
