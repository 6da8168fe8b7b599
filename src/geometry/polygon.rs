use geo::{Coord, Intersects, LineString, Polygon};
use thiserror::Error;

use crate::domain::Coordinate;

/// Why a ring cannot be used as an obstacle or confinement polygon
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("ring has {vertices} distinct vertices, at least 3 are required")]
    TooFewVertices { vertices: usize },
    #[error("ring is not closed: first point {first} differs from last point {last}")]
    NotClosed { first: Coordinate, last: Coordinate },
}

/// Check that `ring` is a closed ring of at least 3 distinct vertices.
///
/// A closed ring repeats its first coordinate at the end, so a triangle has
/// four entries.
pub fn validate_ring(ring: &[Coordinate]) -> Result<(), GeometryError> {
    let (Some(&first), Some(&last)) = (ring.first(), ring.last()) else {
        return Err(GeometryError::TooFewVertices { vertices: 0 });
    };

    if ring.len() > 1 && first != last {
        return Err(GeometryError::NotClosed { first, last });
    }

    let vertices = ring.len().saturating_sub(1);
    if vertices < 3 {
        return Err(GeometryError::TooFewVertices { vertices });
    }

    Ok(())
}

/// Validate `ring` and convert it into a hole-free polygon
pub fn ring_to_polygon(ring: &[Coordinate]) -> Result<Polygon<f64>, GeometryError> {
    validate_ring(ring)?;

    let exterior: LineString<f64> = ring.iter().map(|&c| Coord::from(c)).collect();
    Ok(Polygon::new(exterior, Vec::new()))
}

/// Point-in-polygon membership.
///
/// Points on an edge or a vertex count as inside. The same rule is used for
/// no-fly zones (touching one blocks a step) and for the confinement
/// boundary (touching it is still allowed).
pub fn inside_polygon(point: Coordinate, polygon: &Polygon<f64>) -> bool {
    polygon.intersects(&Coord::from(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_validate_ring_accepts_triangle() {
        let triangle = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ];
        assert!(validate_ring(&triangle).is_ok());
    }

    #[test]
    fn test_validate_ring_rejects_two_vertices() {
        let degenerate = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(0.0, 0.0),
        ];
        assert_eq!(
            validate_ring(&degenerate),
            Err(GeometryError::TooFewVertices { vertices: 2 })
        );
        assert_eq!(
            validate_ring(&[]),
            Err(GeometryError::TooFewVertices { vertices: 0 })
        );
    }

    #[test]
    fn test_validate_ring_rejects_open_ring() {
        let mut open = unit_square();
        open.pop();
        assert!(matches!(
            validate_ring(&open),
            Err(GeometryError::NotClosed { .. })
        ));
    }

    #[test]
    fn test_inside_polygon_interior_and_exterior() {
        let square = ring_to_polygon(&unit_square()).unwrap();
        assert!(inside_polygon(Coordinate::new(0.5, 0.5), &square));
        assert!(!inside_polygon(Coordinate::new(1.5, 0.5), &square));
        assert!(!inside_polygon(Coordinate::new(-0.0001, 0.5), &square));
    }

    #[test]
    fn test_inside_polygon_boundary_counts_as_inside() {
        let square = ring_to_polygon(&unit_square()).unwrap();
        // Edge midpoints
        assert!(inside_polygon(Coordinate::new(0.5, 0.0), &square));
        assert!(inside_polygon(Coordinate::new(1.0, 0.5), &square));
        // Vertex
        assert!(inside_polygon(Coordinate::new(1.0, 1.0), &square));
    }
}
