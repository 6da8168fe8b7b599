use std::fmt;
use thiserror::Error;

use crate::geometry::GeometryError;

/// What a flight leg is heading for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegTarget {
    Sensor(String),
    Base,
}

impl fmt::Display for LegTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegTarget::Sensor(id) => write!(f, "sensor {}", id),
            LegTarget::Base => write!(f, "base"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlanError {
    /// A polygon cannot be used; raised before any movement is planned
    #[error("invalid geometry for {what}: {source}")]
    InvalidGeometry {
        what: String,
        source: GeometryError,
    },

    /// Neither side of a blocking obstacle leads to the target in budget
    #[error("no detour reaches {target} within the move budget")]
    DetourUnreachable { target: LegTarget },

    /// Two sensors share an id, so read status cannot tell them apart
    #[error("duplicate sensor id {id}")]
    DuplicateSensor { id: String },

    /// Nearest-sensor search was asked for a sensor when none remain
    #[error("no unvisited sensors left")]
    NoUnvisitedSensors,
}
