use std::collections::{BTreeMap, BTreeSet, HashMap};

use geo::Geometry;
use log::debug;
use serde::Serialize;

use crate::models::{Listing, Neighbourhood};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighbourhoodSummary {
    pub neighbourhood: String,
    pub neighbourhood_group: String,
    pub count_listings: usize,
    pub count_reviews: u64,
    pub avg_price: f64,
    #[serde(skip)]
    pub boundary: Geometry<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub neighbourhood_group: String,
    pub count_neighbourhoods: usize,
    pub count_listings: usize,
    pub count_reviews: u64,
    pub avg_price: f64,
}

/// Result of joining a listing view against the neighbourhood shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighbourhoodTable {
    /// Ordered by neighbourhood name.
    pub summaries: Vec<NeighbourhoodSummary>,
    /// Listing neighbourhoods that had no shape to join to, with their listing count.
    pub unmatched: BTreeMap<String, usize>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    count_listings: usize,
    count_reviews: u64,
    price_sum: f64,
}

impl Totals {
    fn add(&mut self, listing: &Listing) {
        self.count_listings += 1;
        self.count_reviews += u64::from(listing.number_of_reviews);
        self.price_sum += listing.price;
    }

    fn avg_price(&self) -> f64 {
        self.price_sum / self.count_listings as f64
    }
}

fn shapes_by_name(neighbourhoods: &[Neighbourhood]) -> HashMap<&str, &Neighbourhood> {
    let mut index = HashMap::new();
    for n in neighbourhoods {
        index.entry(n.neighbourhood.as_str()).or_insert(n);
    }
    index
}

fn totals_by_neighbourhood(listings: &[Listing]) -> BTreeMap<&str, Totals> {
    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();
    for listing in listings {
        groups
            .entry(listing.neighbourhood.as_str())
            .or_default()
            .add(listing);
    }
    groups
}

/// Groups `listings` by exact, case-sensitive neighbourhood name and inner-joins the groups
/// to `neighbourhoods`. Shapes with no listing in the view do not appear.
pub fn summarize_neighbourhoods(
    listings: &[Listing],
    neighbourhoods: &[Neighbourhood],
) -> NeighbourhoodTable {
    let shapes = shapes_by_name(neighbourhoods);

    let mut summaries = Vec::new();
    let mut unmatched = BTreeMap::new();
    for (name, totals) in totals_by_neighbourhood(listings) {
        let shape = match shapes.get(name) {
            Some(shape) => shape,
            None => {
                debug!("No boundary for neighbourhood '{}'", name);
                unmatched.insert(name.to_string(), totals.count_listings);
                continue;
            }
        };

        summaries.push(NeighbourhoodSummary {
            neighbourhood: name.to_string(),
            neighbourhood_group: shape.neighbourhood_group.clone(),
            count_listings: totals.count_listings,
            count_reviews: totals.count_reviews,
            avg_price: totals.avg_price(),
            boundary: shape.boundary.clone(),
        });
    }

    NeighbourhoodTable {
        summaries,
        unmatched,
    }
}

/// Same measures one level up, using the district each neighbourhood shape belongs to.
pub fn summarize_groups(listings: &[Listing], neighbourhoods: &[Neighbourhood]) -> Vec<GroupSummary> {
    let shapes = shapes_by_name(neighbourhoods);

    let mut groups: BTreeMap<&str, (Totals, BTreeSet<&str>)> = BTreeMap::new();
    for listing in listings {
        if let Some(shape) = shapes.get(listing.neighbourhood.as_str()) {
            let (totals, members) = groups
                .entry(shape.neighbourhood_group.as_str())
                .or_default();
            totals.add(listing);
            members.insert(shape.neighbourhood.as_str());
        }
    }

    groups
        .into_iter()
        .map(|(group, (totals, members))| GroupSummary {
            neighbourhood_group: group.to_string(),
            count_neighbourhoods: members.len(),
            count_listings: totals.count_listings,
            count_reviews: totals.count_reviews,
            avg_price: totals.avg_price(),
        })
        .collect()
}

/// Neighbourhoods summarised in `full` that disappear from `filtered`.
pub fn coverage_gaps(
    full: &[NeighbourhoodSummary],
    filtered: &[NeighbourhoodSummary],
) -> Vec<String> {
    let kept: BTreeSet<&str> = filtered
        .iter()
        .map(|s| s.neighbourhood.as_str())
        .collect();

    full.iter()
        .map(|s| s.neighbourhood.as_str())
        .filter(|name| !kept.contains(name))
        .map(str::to_string)
        .collect()
}
