use serde::{Deserialize, Serialize};
use std::fmt;

/// A (longitude, latitude) pair in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::coord! { x: c.lng, y: c.lat }
    }
}

impl From<[f64; 2]> for Coordinate {
    /// GeoJSON position order: `[lng, lat]`
    fn from(position: [f64; 2]) -> Self {
        Self::new(position[0], position[1])
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lng, self.lat)
    }
}
