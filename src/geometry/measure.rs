use crate::domain::Coordinate;
use std::fmt;

/// Euclidean distance in coordinate-degree space.
///
/// Longitude and latitude degrees are treated as a flat plane, which is
/// what the step length and reading radius are expressed in.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    (b.lng - a.lng).hypot(b.lat - a.lat)
}

/// A compass-free heading quantized to multiples of 10 degrees.
///
/// Measured counter-clockwise from the positive longitude axis (0 = east,
/// 90 = north). Always in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Heading(u16);

impl Heading {
    /// Angular resolution of every heading, in degrees
    pub const RESOLUTION: u16 = 10;

    /// Number of distinct headings on the compass rose
    pub const COUNT: u16 = 360 / Self::RESOLUTION;

    pub const EAST: Heading = Heading(0);
    pub const NORTH: Heading = Heading(90);
    pub const WEST: Heading = Heading(180);
    pub const SOUTH: Heading = Heading(270);

    /// Quantize an arbitrary angle in degrees.
    ///
    /// The angle is normalized to `[0, 360)` first and then rounded to the
    /// nearest multiple of 10 with halves rounding up, so 355 becomes 360
    /// and wraps to 0.
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let rounded = (normalized / Self::RESOLUTION as f64).round() as i64;
        let quantized = (rounded * Self::RESOLUTION as i64).rem_euclid(360);
        Heading(quantized as u16)
    }

    /// Heading in whole degrees, a multiple of 10 in `[0, 360)`
    pub fn degrees(self) -> u16 {
        self.0
    }

    pub fn radians(self) -> f64 {
        (self.0 as f64).to_radians()
    }

    /// Rotate by `increments` steps of 10 degrees (negative turns the other way)
    pub fn rotated(self, increments: i32) -> Self {
        let degrees = self.0 as i32 + increments * Self::RESOLUTION as i32;
        Heading(degrees.rem_euclid(360) as u16)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantized bearing from `from` toward `to`.
///
/// Computed from `atan2(dlat, dlng)`. When both points coincide the delta is
/// zero and `atan2(0, 0)` yields 0, so the degenerate bearing is east.
pub fn bearing(from: Coordinate, to: Coordinate) -> Heading {
    let degrees = (to.lat - from.lat).atan2(to.lng - from.lng).to_degrees();
    Heading::from_degrees(degrees)
}

/// Point reached by travelling `length` degrees from `from` along `heading`
pub fn offset(from: Coordinate, heading: Heading, length: f64) -> Coordinate {
    let angle = heading.radians();
    Coordinate::new(
        from.lng + length * angle.cos(),
        from.lat + length * angle.sin(),
    )
}
