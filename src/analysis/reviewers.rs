use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use chrono::Datelike;
use serde::{Serialize, Serializer};

use crate::models::{Listing, Review};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerSummary {
    pub reviewer_id: String,
    pub count_reviews: usize,
}

/// One row per reviewer, in the order reviewers are first met in `reviews`.
pub fn summarize_reviewers(reviews: &[Review]) -> Vec<ReviewerSummary> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<ReviewerSummary> = Vec::new();

    for review in reviews {
        match position.get(review.reviewer_id.as_str()) {
            Some(&idx) => summaries[idx].count_reviews += 1,
            None => {
                position.insert(review.reviewer_id.as_str(), summaries.len());
                summaries.push(ReviewerSummary {
                    reviewer_id: review.reviewer_id.clone(),
                    count_reviews: 1,
                });
            }
        }
    }

    summaries
}

pub fn multi_reviewers(summaries: &[ReviewerSummary]) -> Vec<ReviewerSummary> {
    summaries
        .iter()
        .filter(|s| s.count_reviews > 1)
        .cloned()
        .collect()
}

/// The `k` most active reviewers. The sort is stable, so reviewers with equal counts keep
/// their encounter order from `summaries`.
pub fn top_reviewers(summaries: &[ReviewerSummary], k: usize) -> Vec<ReviewerSummary> {
    let mut ranked = summaries.to_vec();
    ranked.sort_by(|a, b| b.count_reviews.cmp(&a.count_reviews));
    ranked.truncate(k);
    ranked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub period: YearMonth,
    pub count_reviews: usize,
}

/// Reviews per calendar month for one reviewer. Months without reviews are left out.
pub fn reviewer_timeline(reviews: &[Review], reviewer_id: &str) -> Vec<TimelinePoint> {
    let mut periods: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for review in reviews.iter().filter(|r| r.reviewer_id == reviewer_id) {
        let period = YearMonth {
            year: review.date.year(),
            month: review.date.month(),
        };
        *periods.entry(period).or_insert(0) += 1;
    }

    periods
        .into_iter()
        .map(|(period, count_reviews)| TimelinePoint {
            period,
            count_reviews,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stay<'a> {
    pub review: &'a Review,
    pub listing: &'a Listing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewerStays<'a> {
    pub stays: Vec<Stay<'a>>,
    /// Reviews pointing at a listing id absent from the listings table.
    pub unmatched: usize,
}

pub fn listings_by_id(listings: &[Listing]) -> HashMap<&str, &Listing> {
    listings.iter().map(|l| (l.id.as_str(), l)).collect()
}

/// Inner join of one reviewer's reviews against listings on `listing_id = id`.
pub fn reviewer_stays<'a>(
    reviews: &'a [Review],
    listings: &'a [Listing],
    reviewer_id: &str,
) -> ReviewerStays<'a> {
    let index = listings_by_id(listings);

    let mut stays = Vec::new();
    let mut unmatched = 0;
    for review in reviews.iter().filter(|r| r.reviewer_id == reviewer_id) {
        match index.get(review.listing_id.as_str()) {
            Some(&listing) => stays.push(Stay { review, listing }),
            None => unmatched += 1,
        }
    }

    ReviewerStays { stays, unmatched }
}

/// Reviews in the whole table whose listing is not in the listings table.
pub fn unmatched_reviews(reviews: &[Review], listings: &[Listing]) -> usize {
    let known: HashSet<&str> = listings.iter().map(|l| l.id.as_str()).collect();
    reviews
        .iter()
        .filter(|r| !known.contains(r.listing_id.as_str()))
        .count()
}

pub fn stays_by_accommodates(stays: &[Stay<'_>]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for stay in stays {
        *counts.entry(stay.listing.accommodates).or_insert(0) += 1;
    }
    counts
}

pub fn stays_by_neighbourhood(stays: &[Stay<'_>]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for stay in stays {
        *counts.entry(stay.listing.neighbourhood.clone()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceBin {
    Upto25,
    Upto50,
    Upto75,
    Upto100,
    Upto125,
    Upto150,
    Above150,
}

impl PriceBin {
    pub const ALL: [PriceBin; 7] = [
        PriceBin::Upto25,
        PriceBin::Upto50,
        PriceBin::Upto75,
        PriceBin::Upto100,
        PriceBin::Upto125,
        PriceBin::Upto150,
        PriceBin::Above150,
    ];

    /// Bins are left-open, right-closed; a price of 0 (or below) falls outside all of them.
    pub fn for_price(price: f64) -> Option<PriceBin> {
        if price <= 0.0 {
            return None;
        }

        let bin = if price <= 25.0 {
            PriceBin::Upto25
        } else if price <= 50.0 {
            PriceBin::Upto50
        } else if price <= 75.0 {
            PriceBin::Upto75
        } else if price <= 100.0 {
            PriceBin::Upto100
        } else if price <= 125.0 {
            PriceBin::Upto125
        } else if price <= 150.0 {
            PriceBin::Upto150
        } else {
            PriceBin::Above150
        };
        Some(bin)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBin::Upto25 => "(0, 25]",
            PriceBin::Upto50 => "(25, 50]",
            PriceBin::Upto75 => "(50, 75]",
            PriceBin::Upto100 => "(75, 100]",
            PriceBin::Upto125 => "(100, 125]",
            PriceBin::Upto150 => "(125, 150]",
            PriceBin::Above150 => "(150, inf)",
        }
    }
}

impl Serialize for PriceBin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBinCount {
    pub bin: PriceBin,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    /// Every bin in ascending order, empty bins included.
    pub bins: Vec<PriceBinCount>,
    pub unbinned: usize,
}

pub fn stays_by_price_bin(stays: &[Stay<'_>]) -> PriceBreakdown {
    let mut counts: BTreeMap<PriceBin, usize> = BTreeMap::new();
    let mut unbinned = 0;
    for stay in stays {
        match PriceBin::for_price(stay.listing.price) {
            Some(bin) => *counts.entry(bin).or_insert(0) += 1,
            None => unbinned += 1,
        }
    }

    PriceBreakdown {
        bins: PriceBin::ALL
            .iter()
            .map(|&bin| PriceBinCount {
                bin,
                count: counts.get(&bin).copied().unwrap_or(0),
            })
            .collect(),
        unbinned,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingVisits {
    pub listing_id: String,
    pub count_reviews: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostConcentration {
    pub host_id: String,
    pub listings: Vec<ListingVisits>,
    pub count_reviews: usize,
    /// More than one review from this reviewer went to this host. Reported, not acted on.
    pub repeated: bool,
}

/// Reviews per listing, rolled up per host. Heaviest hosts first, ties by host id.
pub fn host_concentration(stays: &[Stay<'_>]) -> Vec<HostConcentration> {
    let mut per_host: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for stay in stays {
        *per_host
            .entry(stay.listing.host_id.as_str())
            .or_default()
            .entry(stay.listing.id.as_str())
            .or_insert(0) += 1;
    }

    let mut rows: Vec<HostConcentration> = per_host
        .into_iter()
        .map(|(host_id, visits)| {
            let count_reviews = visits.values().sum();
            HostConcentration {
                host_id: host_id.to_string(),
                listings: visits
                    .into_iter()
                    .map(|(listing_id, count_reviews)| ListingVisits {
                        listing_id: listing_id.to_string(),
                        count_reviews,
                    })
                    .collect(),
                count_reviews,
                repeated: count_reviews > 1,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.count_reviews.cmp(&a.count_reviews));
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentLengths {
    pub reviewer_id: String,
    /// Character count of every present comment, in review order.
    pub lengths: Vec<usize>,
    /// Reviews with no comment. The reviews loader reads an empty field, quoted or not, as no
    /// comment, so blank comments from the file land here rather than as zero-length.
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentLengthStats {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

impl CommentLengths {
    pub fn stats(&self) -> Option<CommentLengthStats> {
        let min = *self.lengths.iter().min()?;
        let max = *self.lengths.iter().max()?;
        let total: usize = self.lengths.iter().sum();
        Some(CommentLengthStats {
            count: self.lengths.len(),
            min,
            max,
            mean: total as f64 / self.lengths.len() as f64,
        })
    }
}

pub fn comment_lengths(reviews: &[Review], reviewer_id: &str) -> CommentLengths {
    let mut lengths = Vec::new();
    let mut missing = 0;
    for review in reviews.iter().filter(|r| r.reviewer_id == reviewer_id) {
        match &review.comments {
            Some(text) => lengths.push(text.chars().count()),
            None => missing += 1,
        }
    }

    CommentLengths {
        reviewer_id: reviewer_id.to_string(),
        lengths,
        missing,
    }
}
