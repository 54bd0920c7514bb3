use serde::{Deserialize, Serialize};

/// A listings row as it comes out of the scraped table, every field still text.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawListing {
    pub id: String,
    pub host_id: String,
    pub neighbourhood_cleansed: String,
    #[serde(default)]
    pub neighbourhood_group_cleansed: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    pub price: String,
    pub accommodates: String,
    pub number_of_reviews: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub host_id: String,
    pub neighbourhood: String,
    pub neighbourhood_group: String,
    pub property_type: String,
    pub price: f64,
    pub accommodates: u32,
    pub number_of_reviews: u32,
}

impl Listing {
    pub fn has_reviews(&self) -> bool {
        self.number_of_reviews > 0
    }
}
