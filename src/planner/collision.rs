use crate::domain::{ConfinementBoundary, Coordinate, NoFlyZone};
use crate::geometry::{Heading, offset};

/// Decides whether a single move is safe.
///
/// A move is sampled at `samples` evenly spaced points between the start
/// (exclusive) and the end (inclusive). The move is blocked as soon as one
/// sample touches a no-fly zone or leaves the confinement boundary.
#[derive(Debug, Clone)]
pub struct CollisionChecker {
    boundary: ConfinementBoundary,
    zones: Vec<NoFlyZone>,
    samples: usize,
}

impl CollisionChecker {
    /// `samples` below 1 is raised to 1 so the end point is always checked
    pub fn new(boundary: ConfinementBoundary, zones: Vec<NoFlyZone>, samples: usize) -> Self {
        Self {
            boundary,
            zones,
            samples: samples.max(1),
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn zones(&self) -> &[NoFlyZone] {
        &self.zones
    }

    /// True when `point` lies outside every zone and inside the boundary
    pub fn is_permitted(&self, point: Coordinate) -> bool {
        self.boundary.permits(point) && !self.zones.iter().any(|zone| zone.contains(point))
    }

    pub fn is_blocked(&self, start: Coordinate, heading: Heading, step_length: f64) -> bool {
        (1..=self.samples).any(|i| {
            let travelled = step_length * (i as f64 / self.samples as f64);
            !self.is_permitted(offset(start, heading, travelled))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 0.0003;

    fn campus() -> ConfinementBoundary {
        ConfinementBoundary::rectangle(
            Coordinate::new(-3.192473, 55.942617),
            Coordinate::new(-3.184319, 55.946233),
        )
        .unwrap()
    }

    fn block(west: f64, south: f64, east: f64, north: f64) -> NoFlyZone {
        NoFlyZone::new(
            "block",
            &[
                Coordinate::new(west, south),
                Coordinate::new(east, south),
                Coordinate::new(east, north),
                Coordinate::new(west, north),
                Coordinate::new(west, south),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_open_space_is_clear() {
        let checker = CollisionChecker::new(campus(), Vec::new(), 1000);
        let start = Coordinate::new(-3.1880, 55.9440);
        for i in 0..Heading::COUNT {
            assert!(!checker.is_blocked(start, Heading::EAST.rotated(i as i32), STEP));
        }
    }

    #[test]
    fn test_zone_ahead_blocks() {
        let zone = block(-3.18790, 55.9435, -3.1870, 55.9445);
        let checker = CollisionChecker::new(campus(), vec![zone], 1000);
        let start = Coordinate::new(-3.1880, 55.9440);

        assert!(checker.is_blocked(start, Heading::EAST, STEP));
        assert!(!checker.is_blocked(start, Heading::WEST, STEP));
        assert!(!checker.is_blocked(start, Heading::NORTH, STEP));
    }

    #[test]
    fn test_thin_zone_caught_between_endpoints() {
        // Both endpoints are clear, only intermediate samples hit the wall
        let zone = block(-3.18789, 55.9430, -3.18786, 55.9450);
        let start = Coordinate::new(-3.1880, 55.9440);
        let end = offset(start, Heading::EAST, STEP);
        assert!(!zone.contains(start) && !zone.contains(end));

        let checker = CollisionChecker::new(campus(), vec![zone], 1000);
        assert!(checker.is_blocked(start, Heading::EAST, STEP));
    }

    #[test]
    fn test_leaving_confinement_blocks() {
        let checker = CollisionChecker::new(campus(), Vec::new(), 1000);
        let near_edge = Coordinate::new(-3.18440, 55.9440);
        assert!(checker.is_blocked(near_edge, Heading::EAST, STEP));
        assert!(!checker.is_blocked(near_edge, Heading::WEST, STEP));
    }

    #[test]
    fn test_touching_zone_edge_blocks() {
        // The move ends exactly on the zone's west edge
        let start = Coordinate::new(-3.1880, 55.9440);
        let end = offset(start, Heading::EAST, STEP);
        let zone = block(end.lng, 55.9435, end.lng + 0.0005, 55.9445);
        let checker = CollisionChecker::new(campus(), vec![zone], 1000);
        assert!(checker.is_blocked(start, Heading::EAST, STEP));
    }

    #[test]
    fn test_deterministic() {
        let zone = block(-3.18790, 55.9435, -3.1870, 55.9445);
        let checker = CollisionChecker::new(campus(), vec![zone], 1000);
        let start = Coordinate::new(-3.1880, 55.9441);
        let first: Vec<bool> = (0..36)
            .map(|i| checker.is_blocked(start, Heading::EAST.rotated(i), STEP))
            .collect();
        let second: Vec<bool> = (0..36)
            .map(|i| checker.is_blocked(start, Heading::EAST.rotated(i), STEP))
            .collect();
        assert_eq!(first, second);
    }
}
