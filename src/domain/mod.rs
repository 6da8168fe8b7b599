pub mod coordinate;
pub mod date;
pub mod sensor;
pub mod zone;

pub use coordinate::Coordinate;
pub use date::SurveyDate;
pub use sensor::{Measurement, Sensor};
pub use zone::{ConfinementBoundary, NoFlyZone};
