use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawReview {
    pub id: String,
    pub listing_id: String,
    pub reviewer_id: String,
    pub date: String,
    /// Empty fields, including `""`, deserialize to `None`.
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub listing_id: String,
    pub reviewer_id: String,
    pub date: NaiveDate,
    pub comments: Option<String>,
}
