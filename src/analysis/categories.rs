use serde::Serialize;

use crate::models::Listing;

const ENTIRE_HOME_TYPES: [&str; 5] = ["Tiny home", "Treehouse", "Castle", "Hut", "Island"];
const BOAT_TYPES: [&str; 2] = ["Boat", "Houseboat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PropertyCategory {
    ServicedHome,
    EntireHome,
    Boat,
    Other,
}

impl PropertyCategory {
    /// Precedence order, which is also the reporting order.
    pub const ALL: [PropertyCategory; 4] = [
        PropertyCategory::ServicedHome,
        PropertyCategory::EntireHome,
        PropertyCategory::Boat,
        PropertyCategory::Other,
    ];
}

/// Case-sensitive substring and exact-match rules, first match wins.
pub fn property_category(property_type: &str) -> PropertyCategory {
    if property_type.contains("serviced") {
        PropertyCategory::ServicedHome
    } else if property_type.contains("Entire") || ENTIRE_HOME_TYPES.contains(&property_type) {
        PropertyCategory::EntireHome
    } else if BOAT_TYPES.contains(&property_type) {
        PropertyCategory::Boat
    } else {
        PropertyCategory::Other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: PropertyCategory,
    pub count_listings: usize,
    /// `None` when the view has no listing of this category.
    pub avg_price: Option<f64>,
}

pub fn category_summaries(listings: &[Listing]) -> Vec<CategorySummary> {
    PropertyCategory::ALL
        .iter()
        .map(|&category| {
            let prices: Vec<f64> = listings
                .iter()
                .filter(|l| property_category(&l.property_type) == category)
                .map(|l| l.price)
                .collect();

            let avg_price = if prices.is_empty() {
                None
            } else {
                Some(prices.iter().sum::<f64>() / prices.len() as f64)
            };

            CategorySummary {
                category,
                count_listings: prices.len(),
                avg_price,
            }
        })
        .collect()
}
