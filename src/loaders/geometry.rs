use std::path::Path;

use geo::prelude::ChamberlainDuquetteArea;
use geo::Geometry;
use geojson::{Feature, FeatureCollection, GeoJson};
use log::{debug, info};

use crate::error::{EdaError, Result};
use crate::models::{Neighbourhood, Waterway};

/// Features kept from a GeoJSON layer, plus how many were dropped on the way in.
#[derive(Debug, Clone)]
pub struct Layer<T> {
    pub features: Vec<T>,
    pub skipped: usize,
}

pub fn read_neighbourhoods(path: &Path) -> Result<Layer<Neighbourhood>> {
    let text = read_text(path)?;
    parse_neighbourhoods(&text, path)
}

pub fn read_waterways(path: &Path) -> Result<Layer<Waterway>> {
    let text = read_text(path)?;
    parse_waterways(&text, path)
}

pub fn parse_neighbourhoods(text: &str, origin: &Path) -> Result<Layer<Neighbourhood>> {
    let collection = parse_collection(text, origin)?;

    let mut features = Vec::new();
    let mut skipped = 0;
    for feature in collection.features {
        // Both names are required; the file carries a couple of unnamed artifact shapes.
        let neighbourhood = string_property(&feature, "neighbourhood");
        let group = string_property(&feature, "neighbourhood_group");
        let boundary = feature_geometry(feature, origin)?;

        match (neighbourhood, group, boundary) {
            (Some(neighbourhood), Some(neighbourhood_group), Some(boundary)) => {
                features.push(Neighbourhood {
                    neighbourhood,
                    neighbourhood_group,
                    boundary,
                })
            }
            _ => skipped += 1,
        }
    }

    info!(
        "Loaded {} neighbourhoods from {} ({} skipped)",
        features.len(),
        origin.display(),
        skipped
    );
    Ok(Layer { features, skipped })
}

pub fn parse_waterways(text: &str, origin: &Path) -> Result<Layer<Waterway>> {
    let collection = parse_collection(text, origin)?;

    let mut features = Vec::new();
    let mut skipped = 0;
    for feature in collection.features {
        let stated_area = feature
            .property("area")
            .and_then(|value| value.as_f64());

        let shape = match feature_geometry(feature, origin)? {
            Some(shape @ (Geometry::Polygon(_) | Geometry::MultiPolygon(_))) => shape,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let area = match stated_area {
            Some(area) => area,
            None => polygonal_area(&shape),
        };
        features.push(Waterway { area, shape });
    }

    info!(
        "Loaded {} waterways from {} ({} skipped)",
        features.len(),
        origin.display(),
        skipped
    );
    Ok(Layer { features, skipped })
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| EdaError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_collection(text: &str, origin: &Path) -> Result<FeatureCollection> {
    let geometry_error = |reason: String| EdaError::Geometry {
        path: origin.to_path_buf(),
        reason,
    };

    let geojson = text
        .parse::<GeoJson>()
        .map_err(|e| geometry_error(e.to_string()))?;
    FeatureCollection::try_from(geojson).map_err(|e| geometry_error(e.to_string()))
}

fn string_property(feature: &Feature, name: &str) -> Option<String> {
    feature
        .property(name)
        .and_then(|value| value.as_str())
        .map(str::to_string)
}

fn feature_geometry(feature: Feature, origin: &Path) -> Result<Option<Geometry<f64>>> {
    let geometry = match feature.geometry {
        Some(g) => g,
        None => {
            debug!("Feature without geometry in {}", origin.display());
            return Ok(None);
        }
    };

    Geometry::<f64>::try_from(geometry.value)
        .map(Some)
        .map_err(|e| EdaError::Geometry {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
}

fn polygonal_area(shape: &Geometry<f64>) -> f64 {
    match shape {
        Geometry::Polygon(p) => p.chamberlain_duquette_unsigned_area(),
        Geometry::MultiPolygon(mp) => mp.chamberlain_duquette_unsigned_area(),
        _ => 0.0,
    }
}
