use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, JsonObject};
use log::{info, warn};
use serde::Serialize;

use crate::analysis::reviewers::{
    comment_lengths, host_concentration, multi_reviewers, reviewer_stays, reviewer_timeline,
    stays_by_accommodates, stays_by_neighbourhood, stays_by_price_bin, summarize_reviewers,
    top_reviewers, unmatched_reviews, CommentLengthStats, CommentLengths, HostConcentration,
    PriceBreakdown, ReviewerSummary, TimelinePoint,
};
use crate::analysis::{
    category_summaries, coverage_gaps, host_type_counts, host_types_by_neighbourhood,
    in_neighbourhood, largest_waterways, normalize_listings, normalize_reviews, reviewed_listings,
    summarize_groups, summarize_neighbourhoods, CategorySummary, GroupSummary, HostTypeCounts,
    NeighbourhoodSummary,
};
use crate::config::Config;
use crate::error::{EdaError, Result};
use crate::loaders;
use crate::models::{Listing, Neighbourhood, Review, Waterway};

/// Every input table, normalised and held in memory.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub listings: Vec<Listing>,
    pub reviews: Vec<Review>,
    pub neighbourhoods: Vec<Neighbourhood>,
    pub waterways: Vec<Waterway>,
    pub skipped_neighbourhood_features: usize,
    pub skipped_waterway_features: usize,
}

pub fn load_dataset(config: &Config) -> Result<Dataset> {
    let listings = normalize_listings(&loaders::read_listings(&config.listings_path)?)?;
    let reviews = normalize_reviews(&loaders::read_reviews(&config.reviews_path)?)?;
    let neighbourhoods = loaders::read_neighbourhoods(&config.neighbourhoods_path)?;

    let (waterways, skipped_waterway_features) = match &config.waterways_path {
        Some(path) => {
            let layer = loaders::read_waterways(path)?;
            (layer.features, layer.skipped)
        }
        None => (Vec::new(), 0),
    };

    Ok(Dataset {
        listings,
        reviews,
        neighbourhoods: neighbourhoods.features,
        waterways,
        skipped_neighbourhood_features: neighbourhoods.skipped,
        skipped_waterway_features,
    })
}

/// Rows that fell out of a join. Expected with this dataset, so only counted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinGaps {
    pub neighbourhoods_without_boundary: BTreeMap<String, usize>,
    pub reviews_without_listing: usize,
    pub skipped_neighbourhood_features: usize,
    pub skipped_waterway_features: usize,
}

impl JoinGaps {
    pub fn is_empty(&self) -> bool {
        *self == JoinGaps::default()
    }

    pub fn log(&self) {
        for (name, count) in &self.neighbourhoods_without_boundary {
            warn!(
                "{} listings in '{}' dropped: no neighbourhood boundary",
                count, name
            );
        }
        if self.reviews_without_listing > 0 {
            warn!(
                "{} reviews reference listings missing from the listings table",
                self.reviews_without_listing
            );
        }
        if self.skipped_neighbourhood_features > 0 {
            warn!(
                "{} neighbourhood features without names skipped",
                self.skipped_neighbourhood_features
            );
        }
        if self.skipped_waterway_features > 0 {
            warn!(
                "{} non-polygon waterway features skipped",
                self.skipped_waterway_features
            );
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighbourhoodFocus {
    pub neighbourhood: String,
    pub count_listings: usize,
    pub host_types: HostTypeCounts,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewerProfile {
    pub reviewer_id: String,
    pub count_reviews: usize,
    pub timeline: Vec<TimelinePoint>,
    pub count_stays: usize,
    pub reviews_without_listing: usize,
    pub by_accommodates: BTreeMap<u32, usize>,
    pub by_price: PriceBreakdown,
    pub by_neighbourhood: BTreeMap<String, usize>,
    pub host_concentration: Vec<HostConcentration>,
    pub comment_lengths: CommentLengths,
    pub comment_stats: Option<CommentLengthStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub count_listings: usize,
    pub count_reviewed_listings: usize,
    pub count_reviews: usize,
    pub neighbourhoods_all: Vec<NeighbourhoodSummary>,
    pub neighbourhoods_reviewed: Vec<NeighbourhoodSummary>,
    pub coverage_gaps: Vec<String>,
    pub groups_reviewed: Vec<GroupSummary>,
    pub categories_all: Vec<CategorySummary>,
    pub categories_reviewed: Vec<CategorySummary>,
    pub host_types_citywide: HostTypeCounts,
    pub host_types_by_neighbourhood: BTreeMap<String, HostTypeCounts>,
    pub focus_neighbourhoods: Vec<NeighbourhoodFocus>,
    pub count_reviewers: usize,
    pub count_multi_reviewers: usize,
    pub top_reviewers: Vec<ReviewerSummary>,
    pub reviewer_profiles: Vec<ReviewerProfile>,
    pub join_gaps: JoinGaps,
    #[serde(skip)]
    pub waterways: Vec<Waterway>,
}

fn neighbourhood_focus(reviewed: &[Listing], neighbourhood: &str) -> NeighbourhoodFocus {
    let scope = in_neighbourhood(reviewed, neighbourhood);
    NeighbourhoodFocus {
        neighbourhood: neighbourhood.to_string(),
        count_listings: scope.len(),
        host_types: host_type_counts(&scope),
        categories: category_summaries(&scope),
    }
}

fn reviewer_profile(dataset: &Dataset, reviewer: &ReviewerSummary) -> ReviewerProfile {
    let joined = reviewer_stays(&dataset.reviews, &dataset.listings, &reviewer.reviewer_id);
    let lengths = comment_lengths(&dataset.reviews, &reviewer.reviewer_id);

    ReviewerProfile {
        reviewer_id: reviewer.reviewer_id.clone(),
        count_reviews: reviewer.count_reviews,
        timeline: reviewer_timeline(&dataset.reviews, &reviewer.reviewer_id),
        count_stays: joined.stays.len(),
        reviews_without_listing: joined.unmatched,
        by_accommodates: stays_by_accommodates(&joined.stays),
        by_price: stays_by_price_bin(&joined.stays),
        by_neighbourhood: stays_by_neighbourhood(&joined.stays),
        host_concentration: host_concentration(&joined.stays),
        comment_stats: lengths.stats(),
        comment_lengths: lengths,
    }
}

/// Runs every aggregation over an already loaded dataset. Pure: same input, same report.
pub fn build_report(dataset: &Dataset, config: &Config) -> Report {
    let reviewed = reviewed_listings(&dataset.listings);
    info!(
        "{} of {} listings have at least one review",
        reviewed.len(),
        dataset.listings.len()
    );

    let all_table = summarize_neighbourhoods(&dataset.listings, &dataset.neighbourhoods);
    let reviewed_table = summarize_neighbourhoods(&reviewed, &dataset.neighbourhoods);
    let gaps = coverage_gaps(&all_table.summaries, &reviewed_table.summaries);
    info!(
        "{} neighbourhoods summarised, {} lost after review filtering",
        all_table.summaries.len(),
        gaps.len()
    );

    let reviewers = summarize_reviewers(&dataset.reviews);
    let top = top_reviewers(&reviewers, config.top_reviewers);

    let focus: Vec<ReviewerSummary> = if config.focus_reviewers.is_empty() {
        top.clone()
    } else {
        config
            .focus_reviewers
            .iter()
            .map(|id| {
                reviewers
                    .iter()
                    .find(|r| &r.reviewer_id == id)
                    .cloned()
                    .unwrap_or_else(|| ReviewerSummary {
                        reviewer_id: id.clone(),
                        count_reviews: 0,
                    })
            })
            .collect()
    };

    let join_gaps = JoinGaps {
        neighbourhoods_without_boundary: all_table.unmatched,
        reviews_without_listing: unmatched_reviews(&dataset.reviews, &dataset.listings),
        skipped_neighbourhood_features: dataset.skipped_neighbourhood_features,
        skipped_waterway_features: dataset.skipped_waterway_features,
    };

    Report {
        count_listings: dataset.listings.len(),
        count_reviewed_listings: reviewed.len(),
        count_reviews: dataset.reviews.len(),
        coverage_gaps: gaps,
        groups_reviewed: summarize_groups(&reviewed, &dataset.neighbourhoods),
        categories_all: category_summaries(&dataset.listings),
        categories_reviewed: category_summaries(&reviewed),
        host_types_citywide: host_type_counts(&reviewed),
        host_types_by_neighbourhood: host_types_by_neighbourhood(&reviewed),
        focus_neighbourhoods: config
            .focus_neighbourhoods
            .iter()
            .map(|name| neighbourhood_focus(&reviewed, name))
            .collect(),
        count_reviewers: reviewers.len(),
        count_multi_reviewers: multi_reviewers(&reviewers).len(),
        top_reviewers: top,
        reviewer_profiles: focus.iter().map(|r| reviewer_profile(dataset, r)).collect(),
        neighbourhoods_all: all_table.summaries,
        neighbourhoods_reviewed: reviewed_table.summaries,
        join_gaps,
        waterways: largest_waterways(&dataset.waterways, config.waterway_limit),
    }
}

fn output_error(path: &Path) -> impl FnOnce(io::Error) -> EdaError + '_ {
    move |source| EdaError::Output {
        path: path.to_path_buf(),
        source,
    }
}

const NEIGHBOURHOOD_COLUMNS: [&str; 5] = [
    "neighbourhood",
    "neighbourhood_group",
    "count_listings",
    "count_reviews",
    "avg_price",
];
const REVIEWER_COLUMNS: [&str; 2] = ["reviewer_id", "count_reviews"];

// Header written by hand so an empty table still carries its columns.
fn write_csv<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
    let write = || -> io::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        writer.write_record(columns)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()
    };
    write().map_err(output_error(path))
}

fn write_geojson(path: &Path, collection: &FeatureCollection) -> Result<()> {
    let write = || -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut out, collection)?;
        out.flush()
    };
    write().map_err(output_error(path))
}

fn neighbourhood_features(
    summaries: &[NeighbourhoodSummary],
) -> serde_json::Result<FeatureCollection> {
    let features = summaries
        .iter()
        .map(|summary| {
            let properties: JsonObject = serde_json::from_value(serde_json::to_value(summary)?)?;
            Ok(Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&summary.boundary))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect::<serde_json::Result<Vec<Feature>>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn waterway_features(waterways: &[Waterway]) -> FeatureCollection {
    let features = waterways
        .iter()
        .map(|waterway| {
            let mut properties = JsonObject::new();
            properties.insert("area".to_string(), serde_json::json!(waterway.area));
            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&waterway.shape))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Writes the derived tables into `out_dir` and returns the files written.
pub fn write_report(report: &Report, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(output_error(out_dir))?;

    let mut written = Vec::new();

    let path = out_dir.join("neighbourhoods_all.csv");
    write_csv(&path, &NEIGHBOURHOOD_COLUMNS, &report.neighbourhoods_all)?;
    written.push(path);

    let path = out_dir.join("neighbourhoods_reviewed.csv");
    write_csv(&path, &NEIGHBOURHOOD_COLUMNS, &report.neighbourhoods_reviewed)?;
    written.push(path);

    let path = out_dir.join("neighbourhoods_reviewed.geojson");
    let collection = neighbourhood_features(&report.neighbourhoods_reviewed)
        .map_err(|e| output_error(&path)(e.into()))?;
    write_geojson(&path, &collection)?;
    written.push(path);

    let path = out_dir.join("reviewers_top.csv");
    write_csv(&path, &REVIEWER_COLUMNS, &report.top_reviewers)?;
    written.push(path);

    if !report.waterways.is_empty() {
        let path = out_dir.join("waterways.geojson");
        write_geojson(&path, &waterway_features(&report.waterways))?;
        written.push(path);
    }

    let path = out_dir.join("report.json");
    let write_json = || -> io::Result<()> {
        let mut out = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut out, report)?;
        out.write_all(b"\n")?;
        out.flush()
    };
    write_json().map_err(output_error(&path))?;
    written.push(path);

    info!("Wrote {} files to {}", written.len(), out_dir.display());
    Ok(written)
}
