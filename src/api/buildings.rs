use anyhow::{Context, Result};
use serde::Deserialize;

use super::DataServer;
use crate::domain::{Coordinate, NoFlyZone};

const NO_FLY_ZONES_PATH: &str = "buildings/no-fly-zones.geojson";

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Properties>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize, Default)]
struct Properties {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    #[serde(other)]
    Unsupported,
}

/// Parse the no-fly-zone GeoJSON into validated zones.
///
/// Only Polygon features are used and only their outer ring. A ring that is
/// open or too short fails the whole load.
pub fn parse_no_fly_zones(json: &str) -> Result<Vec<NoFlyZone>> {
    let collection: FeatureCollection =
        serde_json::from_str(json).context("Failed to parse no-fly-zone GeoJSON")?;

    let mut zones = Vec::new();
    for (index, feature) in collection.features.into_iter().enumerate() {
        let Geometry::Polygon { coordinates } = feature.geometry else {
            log::warn!("Ignoring non-polygon no-fly-zone feature #{}", index);
            continue;
        };

        let name = feature
            .properties
            .and_then(|p| p.name)
            .unwrap_or_else(|| format!("zone {}", index + 1));

        let ring: Vec<Coordinate> = coordinates
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(Coordinate::from)
            .collect();

        zones.push(NoFlyZone::new(name, &ring)?);
    }

    Ok(zones)
}

impl DataServer {
    pub fn fetch_no_fly_zones(&self) -> Result<Vec<NoFlyZone>> {
        let body = self.get_text(NO_FLY_ZONES_PATH)?;
        parse_no_fly_zones(&body)
    }
}
