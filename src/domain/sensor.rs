/// Air-quality payload reported by a sensor once it is read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    /// Battery charge in percent
    pub battery: f64,
    /// Pollution reading; `None` when the sensor reported a non-number
    pub reading: Option<f64>,
}

/// A sensor to be read, identified by its what3words location.
///
/// Sensors are immutable during planning. Read status is tracked by the
/// navigator, not stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub id: String,
    pub position: super::Coordinate,
    /// Distance below which the sensor can be read
    pub reading_radius: f64,
    pub measurement: Measurement,
}

impl Sensor {
    pub fn new(id: impl Into<String>, position: super::Coordinate, reading_radius: f64) -> Self {
        Self {
            id: id.into(),
            position,
            reading_radius,
            measurement: Measurement::default(),
        }
    }

    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.measurement = measurement;
        self
    }
}
