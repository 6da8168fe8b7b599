pub mod flightpath;
pub mod readings;

pub use flightpath::{format_flightpath, write_flightpath};
pub use readings::{MarkerStyle, build_readings_map, write_readings_map};
