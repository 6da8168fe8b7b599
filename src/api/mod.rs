pub mod buildings;
pub mod client;
pub mod sensors;

pub use buildings::parse_no_fly_zones;
pub use client::DataServer;
pub use sensors::{SensorRecord, load_sensors, parse_sensor_records};
