use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::Listing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HostType {
    MultiAccommodationHost,
    SingleAccommodationHost,
}

/// Host type of each listing, index-aligned with `scope`.
///
/// A host is multi-accommodation only if it owns more than one listing *within `scope`*.
/// Call this again for every differently filtered scope, results do not carry over.
/// Accepts owned slices as well as borrowed subsets (`&[Listing]`, `Vec<&Listing>`).
pub fn host_types<'a, I>(scope: I) -> Vec<HostType>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let scope: Vec<&Listing> = scope.into_iter().collect();
    let mut per_host: HashMap<&str, usize> = HashMap::new();
    for listing in &scope {
        *per_host.entry(listing.host_id.as_str()).or_insert(0) += 1;
    }

    scope
        .iter()
        .map(|listing| match per_host.get(listing.host_id.as_str()) {
            Some(&n) if n > 1 => HostType::MultiAccommodationHost,
            _ => HostType::SingleAccommodationHost,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostTypeCounts {
    pub multi: usize,
    pub single: usize,
}

impl HostTypeCounts {
    fn tally(types: &[HostType]) -> HostTypeCounts {
        let multi = types
            .iter()
            .filter(|t| **t == HostType::MultiAccommodationHost)
            .count();
        HostTypeCounts {
            multi,
            single: types.len() - multi,
        }
    }
}

pub fn host_type_counts<'a, I>(scope: I) -> HostTypeCounts
where
    I: IntoIterator<Item = &'a Listing>,
{
    HostTypeCounts::tally(&host_types(scope))
}

/// Per neighbourhood counts, each neighbourhood classified as its own scope.
pub fn host_types_by_neighbourhood(listings: &[Listing]) -> BTreeMap<String, HostTypeCounts> {
    let mut scopes: BTreeMap<&str, Vec<&Listing>> = BTreeMap::new();
    for listing in listings {
        scopes
            .entry(listing.neighbourhood.as_str())
            .or_default()
            .push(listing);
    }

    scopes
        .into_iter()
        .map(|(name, scope)| (name.to_string(), host_type_counts(scope)))
        .collect()
}
