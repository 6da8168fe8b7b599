use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::DataServer;
use crate::domain::{Coordinate, Measurement, Sensor, SurveyDate};

/// One entry of `air-quality-data.json`
#[derive(Debug, Clone, Deserialize)]
pub struct SensorRecord {
    /// what3words address, e.g. `slips.mass.baking`
    pub location: String,
    pub battery: f64,
    /// Reading as sent by the sensor; may be "NaN" or "null"
    pub reading: String,
}

impl SensorRecord {
    pub fn measurement(&self) -> Measurement {
        Measurement {
            battery: self.battery,
            reading: self
                .reading
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|r| r.is_finite()),
        }
    }

    /// Path of the details file for this record's three words
    fn details_path(&self) -> Result<String> {
        let words: Vec<&str> = self.location.split('.').collect();
        if words.len() != 3 || words.iter().any(|w| w.is_empty()) {
            bail!("Malformed what3words location: {}", self.location);
        }
        Ok(format!("words/{}/details.json", words.join("/")))
    }
}

#[derive(Debug, Deserialize)]
struct LocationDetails {
    coordinates: Coordinate,
}

pub fn parse_sensor_records(json: &str) -> Result<Vec<SensorRecord>> {
    serde_json::from_str(json).context("Failed to parse air-quality data JSON")
}

fn parse_location_details(json: &str) -> Result<Coordinate> {
    let details: LocationDetails =
        serde_json::from_str(json).context("Failed to parse what3words details JSON")?;
    Ok(details.coordinates)
}

impl DataServer {
    pub fn fetch_sensor_records(&self, date: &SurveyDate) -> Result<Vec<SensorRecord>> {
        let path = format!("maps/{}/air-quality-data.json", date.server_path());
        let body = self.get_text(&path)?;
        parse_sensor_records(&body)
    }

    /// Resolve a sensor's what3words address to its coordinates
    pub fn resolve_location(&self, record: &SensorRecord) -> Result<Coordinate> {
        let body = self.get_text(&record.details_path()?)?;
        parse_location_details(&body)
            .with_context(|| format!("Failed to resolve location {}", record.location))
    }
}

/// Fetch the day's sensors and resolve each one's position, keeping order
pub fn load_sensors(
    server: &DataServer,
    date: &SurveyDate,
    reading_radius: f64,
) -> Result<Vec<Sensor>> {
    let records = server.fetch_sensor_records(date)?;

    records
        .iter()
        .map(|record| {
            let position = server.resolve_location(record)?;
            Ok(Sensor::new(record.location.clone(), position, reading_radius)
                .with_measurement(record.measurement()))
        })
        .collect()
}
