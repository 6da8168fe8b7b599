pub mod bypass;
pub mod collision;
pub mod error;
pub mod navigator;

pub use bypass::{Bypass, BypassPlanner, Side, Target};
pub use collision::CollisionChecker;
pub use error::{LegTarget, PlanError};
pub use navigator::{FlightPlan, Navigator, Outcome, ReadEvent};
