use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::planner::FlightPlan;

/// Render the flight-path log, one line per move:
///
/// `index,fromLng,fromLat,heading,toLng,toLat,location`
///
/// `index` starts at 1 and `location` is the sensor read on that move or
/// `null`.
pub fn format_flightpath(plan: &FlightPlan) -> String {
    let mut out = String::new();

    for (i, heading) in plan.headings.iter().enumerate() {
        let move_index = i + 1;
        let (from, to) = (plan.path[i], plan.path[move_index]);
        let location = plan.sensor_read_at(move_index).unwrap_or("null");

        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            move_index, from.lng, from.lat, heading, to.lng, to.lat, location
        ));
    }

    out
}

pub fn write_flightpath(path: &Path, plan: &FlightPlan) -> Result<()> {
    fs::write(path, format_flightpath(plan))
        .with_context(|| format!("Failed to write flight path: {}", path.display()))
}
