use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

use crate::domain::Sensor;
use crate::planner::FlightPlan;

/// Readings below this battery level are not trusted
const LOW_BATTERY_PERCENT: f64 = 10.0;

/// Colour bands of width 32 over the reading range [0, 256)
const BAND_COLOURS: [&str; 8] = [
    "#00ff00", "#40ff00", "#80ff00", "#c0ff00", "#ffc000", "#ff8000", "#ff4000", "#ff0000",
];

/// How a sensor is drawn on the readings map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub colour: &'static str,
    pub symbol: Option<&'static str>,
}

impl MarkerStyle {
    pub const NOT_VISITED: MarkerStyle = MarkerStyle {
        colour: "#aaaaaa",
        symbol: None,
    };

    pub const UNRELIABLE: MarkerStyle = MarkerStyle {
        colour: "#000000",
        symbol: Some("cross"),
    };

    /// Style for a sensor, given whether the flight read it
    pub fn for_sensor(sensor: &Sensor, visited: bool) -> Self {
        if !visited {
            return Self::NOT_VISITED;
        }
        match sensor.measurement.reading {
            Some(reading) if sensor.measurement.battery >= LOW_BATTERY_PERCENT => {
                Self::for_reading(reading)
            }
            _ => Self::UNRELIABLE,
        }
    }

    fn for_reading(reading: f64) -> Self {
        let band = (reading / 32.0).floor().clamp(0.0, 7.0) as usize;
        let symbol = if band < 4 { "lighthouse" } else { "danger" };
        Self {
            colour: BAND_COLOURS[band],
            symbol: Some(symbol),
        }
    }
}

/// Build the readings map: the flight as a LineString plus one marker per sensor
pub fn build_readings_map(plan: &FlightPlan, sensors: &[Sensor]) -> Value {
    let line: Vec<[f64; 2]> = plan.path.iter().map(|c| [c.lng, c.lat]).collect();

    let mut features = vec![json!({
        "type": "Feature",
        "properties": {},
        "geometry": { "type": "LineString", "coordinates": line },
    })];

    for sensor in sensors {
        let style = MarkerStyle::for_sensor(sensor, plan.visited.contains(&sensor.id));
        let mut properties = json!({
            "location": sensor.id,
            "rgb-string": style.colour,
            "marker-color": style.colour,
        });
        if let Some(symbol) = style.symbol {
            properties["marker-symbol"] = json!(symbol);
        }

        features.push(json!({
            "type": "Feature",
            "properties": properties,
            "geometry": {
                "type": "Point",
                "coordinates": [sensor.position.lng, sensor.position.lat],
            },
        }));
    }

    json!({ "type": "FeatureCollection", "features": features })
}

pub fn write_readings_map(path: &Path, plan: &FlightPlan, sensors: &[Sensor]) -> Result<()> {
    let map = build_readings_map(plan, sensors);
    let text = serde_json::to_string_pretty(&map).context("Failed to serialize readings map")?;
    fs::write(path, text)
        .with_context(|| format!("Failed to write readings map: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Measurement};
    use crate::planner::Outcome;
    use tempfile::tempdir;

    fn sensor(id: &str, battery: f64, reading: Option<f64>) -> Sensor {
        Sensor::new(id, Coordinate::new(-3.1869, 55.9445), 0.0002)
            .with_measurement(Measurement { battery, reading })
    }

    #[test]
    fn test_reading_bands() {
        let style = |r| MarkerStyle::for_sensor(&sensor("a.b.c", 80.0, Some(r)), true);

        assert_eq!(style(0.0).colour, "#00ff00");
        assert_eq!(style(31.99).colour, "#00ff00");
        assert_eq!(style(32.0).colour, "#40ff00");
        assert_eq!(style(127.9).colour, "#c0ff00");
        assert_eq!(style(127.9).symbol, Some("lighthouse"));
        assert_eq!(style(128.0).colour, "#ffc000");
        assert_eq!(style(128.0).symbol, Some("danger"));
        assert_eq!(style(255.9).colour, "#ff0000");
    }

    #[test]
    fn test_unreliable_and_unvisited() {
        let low_battery = sensor("a.b.c", 9.9, Some(50.0));
        assert_eq!(MarkerStyle::for_sensor(&low_battery, true), MarkerStyle::UNRELIABLE);

        let no_reading = sensor("a.b.c", 90.0, None);
        assert_eq!(MarkerStyle::for_sensor(&no_reading, true), MarkerStyle::UNRELIABLE);

        let fine = sensor("a.b.c", 90.0, Some(50.0));
        assert_eq!(MarkerStyle::for_sensor(&fine, false), MarkerStyle::NOT_VISITED);
    }

    #[test]
    fn test_map_structure() {
        let sensors = vec![
            sensor("slips.mass.baking", 90.0, Some(200.0)),
            sensor("cost.boat.slate", 90.0, Some(10.0)),
        ];
        let start = Coordinate::new(-3.188396, 55.944425);
        let plan = FlightPlan {
            path: vec![start, Coordinate::new(start.lng + 0.0003, start.lat)],
            headings: vec![crate::geometry::Heading::EAST],
            read_events: Vec::new(),
            visited: ["slips.mass.baking".to_string()].into(),
            abandoned: Vec::new(),
            outcome: Outcome::OutOfBudget,
        };

        let map = build_readings_map(&plan, &sensors);
        let features = map["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(features[0]["geometry"]["type"], "LineString");
        assert_eq!(features[0]["geometry"]["coordinates"].as_array().unwrap().len(), 2);

        assert_eq!(features[1]["properties"]["location"], "slips.mass.baking");
        assert_eq!(features[1]["properties"]["marker-color"], "#ff4000");
        assert_eq!(features[1]["properties"]["marker-symbol"], "danger");

        assert_eq!(features[2]["properties"]["rgb-string"], "#aaaaaa");
        assert!(features[2]["properties"].get("marker-symbol").is_none());
    }

    #[test]
    fn test_write_readings_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("readings-02-03-2020.geojson");
        let plan = FlightPlan {
            path: vec![Coordinate::new(-3.188396, 55.944425)],
            headings: Vec::new(),
            read_events: Vec::new(),
            visited: Default::default(),
            abandoned: Vec::new(),
            outcome: Outcome::OutOfBudget,
        };

        write_readings_map(&path, &plan, &[]).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
    }
}
