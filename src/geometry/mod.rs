pub mod measure;
pub mod nearest;
pub mod polygon;

pub use measure::{Heading, bearing, distance, offset};
pub use nearest::nearest_unvisited;
pub use polygon::{GeometryError, inside_polygon, ring_to_polygon, validate_ring};
