use crate::domain::{Coordinate, Sensor};
use crate::geometry::distance;
use crate::planner::PlanError;

/// Index of the closest sensor for which `is_settled` returns false.
///
/// Ties keep the lowest index. Returns `NoUnvisitedSensors` when every
/// sensor is settled; callers check for remaining work first.
pub fn nearest_unvisited<F>(
    current: Coordinate,
    sensors: &[Sensor],
    is_settled: F,
) -> Result<usize, PlanError>
where
    F: Fn(&Sensor) -> bool,
{
    let mut best: Option<(usize, f64)> = None;

    for (index, sensor) in sensors.iter().enumerate() {
        if is_settled(sensor) {
            continue;
        }
        let d = distance(current, sensor.position);
        match best {
            Some((_, best_distance)) if d >= best_distance => {}
            _ => best = Some((index, d)),
        }
    }

    best.map(|(index, _)| index).ok_or(PlanError::NoUnvisitedSensors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sensor(id: &str, lng: f64, lat: f64) -> Sensor {
        Sensor::new(id, Coordinate::new(lng, lat), 0.0002)
    }

    #[test]
    fn test_picks_closest() {
        let sensors = vec![
            sensor("far.away.sensor", 0.01, 0.0),
            sensor("close.by.sensor", 0.001, 0.0),
            sensor("middle.of.road", 0.005, 0.0),
        ];
        let index = nearest_unvisited(Coordinate::new(0.0, 0.0), &sensors, |_| false).unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_skips_visited() {
        let sensors = vec![
            sensor("far.away.sensor", 0.01, 0.0),
            sensor("close.by.sensor", 0.001, 0.0),
        ];
        let visited: BTreeSet<String> = ["close.by.sensor".to_string()].into();
        let index =
            nearest_unvisited(Coordinate::new(0.0, 0.0), &sensors, |s| visited.contains(&s.id))
                .unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_tie_keeps_lowest_index() {
        let sensors = vec![
            sensor("north.side.one", 0.0, 0.001),
            sensor("east.side.two", 0.001, 0.0),
            sensor("west.side.three", -0.001, 0.0),
        ];
        let index = nearest_unvisited(Coordinate::new(0.0, 0.0), &sensors, |_| false).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_all_visited_is_an_error() {
        let sensors = vec![sensor("only.one.here", 0.0, 0.001)];
        let result = nearest_unvisited(Coordinate::new(0.0, 0.0), &sensors, |_| true);
        assert!(matches!(result, Err(PlanError::NoUnvisitedSensors)));

        let result = nearest_unvisited(Coordinate::new(0.0, 0.0), &[], |_| false);
        assert!(matches!(result, Err(PlanError::NoUnvisitedSensors)));
    }
}
