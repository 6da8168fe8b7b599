use log::{error, info, warn};
use std::collections::BTreeSet;

use super::{BypassPlanner, CollisionChecker, LegTarget, PlanError, Target};
use crate::config::PlannerConfig;
use crate::domain::{Coordinate, Sensor};
use crate::geometry::{Heading, bearing, nearest_unvisited, offset};

/// A sensor read on a given move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadEvent {
    /// 1-based index of the move after which the sensor was read
    pub move_index: usize,
    pub sensor_id: String,
}

/// How a planning run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every sensor read and the drone back at base
    Completed,
    /// The move ceiling was hit before finishing
    OutOfBudget,
    /// At least one leg was given up because no detour reached its target
    DetourUnreachable,
}

/// Result of a planning run, ready for the output writers
#[derive(Debug, Clone)]
pub struct FlightPlan {
    /// Start position followed by the position after each move
    pub path: Vec<Coordinate>,
    /// Heading of each move; `headings[i]` leads from `path[i]` to `path[i + 1]`
    pub headings: Vec<Heading>,
    pub read_events: Vec<ReadEvent>,
    pub visited: BTreeSet<String>,
    /// Legs given up, in the order they were abandoned
    pub abandoned: Vec<LegTarget>,
    pub outcome: Outcome,
}

impl FlightPlan {
    pub fn move_count(&self) -> usize {
        self.headings.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Sensor read on move `move_index` (1-based), if any
    pub fn sensor_read_at(&self, move_index: usize) -> Option<&str> {
        self.read_events
            .iter()
            .find(|event| event.move_index == move_index)
            .map(|event| event.sensor_id.as_str())
    }
}

enum LegEnd {
    Arrived,
    OutOfBudget,
}

/// Mutable state of one run
struct Flight {
    path: Vec<Coordinate>,
    headings: Vec<Heading>,
    read_events: Vec<ReadEvent>,
    visited: BTreeSet<String>,
    skipped: BTreeSet<String>,
    abandoned: Vec<LegTarget>,
}

impl Flight {
    fn new(start: Coordinate) -> Self {
        Self {
            path: vec![start],
            headings: Vec::new(),
            read_events: Vec::new(),
            visited: BTreeSet::new(),
            skipped: BTreeSet::new(),
            abandoned: Vec::new(),
        }
    }

    fn position(&self) -> Coordinate {
        self.path[self.path.len() - 1]
    }

    fn moves(&self) -> usize {
        self.headings.len()
    }

    fn is_settled(&self, sensor: &Sensor) -> bool {
        self.visited.contains(&sensor.id) || self.skipped.contains(&sensor.id)
    }

    fn advance(&mut self, heading: Heading, step_length: f64) {
        let next = offset(self.position(), heading, step_length);
        self.path.push(next);
        self.headings.push(heading);
    }

    fn read(&mut self, sensor: &Sensor) {
        self.visited.insert(sensor.id.clone());
        self.read_events.push(ReadEvent {
            move_index: self.moves(),
            sensor_id: sensor.id.clone(),
        });
    }

    fn abandon(&mut self, target: LegTarget) {
        if let LegTarget::Sensor(id) = &target {
            self.skipped.insert(id.clone());
        }
        self.abandoned.push(target);
    }
}

/// Plans the whole flight: nearest sensor first, then home.
///
/// Sensor ids must be unique. The navigator only holds the inputs. Every
/// call to [`Navigator::plan`] starts a fresh run, so repeated calls give
/// identical plans.
pub struct Navigator {
    config: PlannerConfig,
    base: Coordinate,
    sensors: Vec<Sensor>,
    checker: CollisionChecker,
}

impl Navigator {
    pub fn new(
        config: PlannerConfig,
        base: Coordinate,
        sensors: Vec<Sensor>,
        checker: CollisionChecker,
    ) -> Result<Self, PlanError> {
        let mut ids = BTreeSet::new();
        for sensor in &sensors {
            if !ids.insert(sensor.id.as_str()) {
                return Err(PlanError::DuplicateSensor {
                    id: sensor.id.clone(),
                });
            }
        }

        Ok(Self {
            config,
            base,
            sensors,
            checker,
        })
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn checker(&self) -> &CollisionChecker {
        &self.checker
    }

    pub fn plan(&self) -> FlightPlan {
        let ceiling = self.config.move_ceiling;
        let bypass = BypassPlanner::new(&self.checker, self.config.step_length, ceiling);
        let mut flight = Flight::new(self.base);
        let mut budget_exhausted = false;

        while self.sensors.iter().any(|s| !flight.is_settled(s)) {
            if flight.moves() >= ceiling {
                budget_exhausted = true;
                break;
            }

            let index =
                match nearest_unvisited(flight.position(), &self.sensors, |s| flight.is_settled(s))
                {
                    Ok(index) => index,
                    Err(e) => {
                        error!("Sensor selection failed: {}", e);
                        break;
                    }
                };
            let sensor = &self.sensors[index];

            match self.fly_leg(&mut flight, &Target::sensor(sensor), &bypass) {
                Ok(LegEnd::Arrived) => {
                    flight.read(sensor);
                    info!("Read sensor {} on move {}", sensor.id, flight.moves());
                }
                Ok(LegEnd::OutOfBudget) => {
                    budget_exhausted = true;
                    break;
                }
                Err(e) => {
                    warn!("Skipping sensor {}: {}", sensor.id, e);
                    flight.abandon(LegTarget::Sensor(sensor.id.clone()));
                }
            }
        }

        let home = Target::base(self.base, self.config.homing_epsilon);
        if !home.is_reached_from(flight.position()) {
            match self.fly_leg(&mut flight, &home, &bypass) {
                Ok(LegEnd::Arrived) => info!("Back at base after {} moves", flight.moves()),
                Ok(LegEnd::OutOfBudget) => budget_exhausted = true,
                Err(e) => {
                    warn!("Giving up on homing: {}", e);
                    flight.abandon(LegTarget::Base);
                }
            }
        }

        let outcome = if budget_exhausted {
            warn!("Move ceiling of {} reached", ceiling);
            Outcome::OutOfBudget
        } else if !flight.abandoned.is_empty() {
            Outcome::DetourUnreachable
        } else {
            Outcome::Completed
        };

        FlightPlan {
            path: flight.path,
            headings: flight.headings,
            read_events: flight.read_events,
            visited: flight.visited,
            abandoned: flight.abandoned,
            outcome,
        }
    }

    /// Move toward `target` until it is in range or the budget is spent.
    ///
    /// At least one move is made unless the budget is already spent.
    fn fly_leg(
        &self,
        flight: &mut Flight,
        target: &Target,
        bypass: &BypassPlanner<'_>,
    ) -> Result<LegEnd, PlanError> {
        let step_length = self.config.step_length;

        loop {
            if flight.moves() >= self.config.move_ceiling {
                return Ok(LegEnd::OutOfBudget);
            }

            let position = flight.position();
            let mut heading = bearing(position, target.position);
            if self.checker.is_blocked(position, heading, step_length) {
                heading = bypass.resolve(position, target, flight.moves())?.heading;
            }

            flight.advance(heading, step_length);

            if target.is_reached_from(flight.position()) {
                return Ok(LegEnd::Arrived);
            }
        }
    }
}
