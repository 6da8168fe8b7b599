use geo::Polygon;

use super::Coordinate;
use crate::geometry::{inside_polygon, ring_to_polygon};
use crate::planner::PlanError;

/// A named building the drone must never enter
#[derive(Debug, Clone)]
pub struct NoFlyZone {
    name: String,
    polygon: Polygon<f64>,
}

impl NoFlyZone {
    /// Build a zone from a closed ring, failing with `InvalidGeometry`
    pub fn new(name: impl Into<String>, ring: &[Coordinate]) -> Result<Self, PlanError> {
        let name = name.into();
        let polygon = ring_to_polygon(ring).map_err(|source| PlanError::InvalidGeometry {
            what: format!("no-fly zone '{}'", name),
            source,
        })?;
        Ok(Self { name, polygon })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// True when `point` is inside the zone or on its edge
    pub fn contains(&self, point: Coordinate) -> bool {
        inside_polygon(point, &self.polygon)
    }
}

/// The region the drone has to stay within
#[derive(Debug, Clone)]
pub struct ConfinementBoundary {
    polygon: Polygon<f64>,
}

impl ConfinementBoundary {
    pub fn new(ring: &[Coordinate]) -> Result<Self, PlanError> {
        let polygon = ring_to_polygon(ring).map_err(|source| PlanError::InvalidGeometry {
            what: "confinement boundary".to_string(),
            source,
        })?;
        Ok(Self { polygon })
    }

    /// Axis-aligned rectangle spanning the two corners
    pub fn rectangle(south_west: Coordinate, north_east: Coordinate) -> Result<Self, PlanError> {
        Self::new(&[
            south_west,
            Coordinate::new(north_east.lng, south_west.lat),
            north_east,
            Coordinate::new(south_west.lng, north_east.lat),
            south_west,
        ])
    }

    /// True when `point` is inside the region or on its edge
    pub fn permits(&self, point: Coordinate) -> bool {
        inside_polygon(point, &self.polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryError;

    #[test]
    fn test_no_fly_zone_rejects_open_ring() {
        let ring = vec![
            Coordinate::new(-3.1894, 55.9434),
            Coordinate::new(-3.1888, 55.9434),
            Coordinate::new(-3.1888, 55.9440),
        ];
        let err = NoFlyZone::new("Appleton Tower", &ring).unwrap_err();
        match err {
            PlanError::InvalidGeometry { what, source } => {
                assert!(what.contains("Appleton Tower"));
                assert!(matches!(source, GeometryError::NotClosed { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_confinement_rectangle_permits_edges() {
        let boundary = ConfinementBoundary::rectangle(
            Coordinate::new(-3.192473, 55.942617),
            Coordinate::new(-3.184319, 55.946233),
        )
        .unwrap();

        assert!(boundary.permits(Coordinate::new(-3.188, 55.944)));
        assert!(boundary.permits(Coordinate::new(-3.192473, 55.944)));
        assert!(!boundary.permits(Coordinate::new(-3.1925, 55.944)));
        assert!(!boundary.permits(Coordinate::new(-3.188, 55.9463)));
    }

    #[test]
    fn test_confinement_rejects_short_ring() {
        let ring = vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0)];
        assert!(matches!(
            ConfinementBoundary::new(&ring),
            Err(PlanError::InvalidGeometry { .. })
        ));
    }
}
