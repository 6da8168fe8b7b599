use log::debug;

use super::{CollisionChecker, LegTarget, PlanError};
use crate::domain::{Coordinate, Sensor};
use crate::geometry::{Heading, bearing, distance, offset};

/// Where a leg is going and how close counts as arrival
#[derive(Debug, Clone)]
pub struct Target {
    pub kind: LegTarget,
    pub position: Coordinate,
    pub radius: f64,
}

impl Target {
    pub fn sensor(sensor: &Sensor) -> Self {
        Self {
            kind: LegTarget::Sensor(sensor.id.clone()),
            position: sensor.position,
            radius: sensor.reading_radius,
        }
    }

    pub fn base(position: Coordinate, epsilon: f64) -> Self {
        Self {
            kind: LegTarget::Base,
            position,
            radius: epsilon,
        }
    }

    pub fn is_reached_from(&self, position: Coordinate) -> bool {
        distance(position, self.position) < self.radius
    }
}

/// Direction in which headings are rotated while looking for a way round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Rotate by +10 degrees per try
    Right,
    /// Rotate by -10 degrees per try
    Left,
}

impl Side {
    fn increment(self) -> i32 {
        match self {
            Side::Right => 1,
            Side::Left => -1,
        }
    }
}

/// Outcome of one blocking event
#[derive(Debug, Clone, PartialEq)]
pub struct Bypass {
    pub side: Side,
    /// First clear heading on the chosen side
    pub heading: Heading,
    /// Total move count on arrival going right, `None` if out of budget
    pub right_moves: Option<usize>,
    pub left_moves: Option<usize>,
}

/// Picks a way around an obstacle that blocks the direct heading.
///
/// Both sides are flown in simulation until the target is reached or the
/// move ceiling runs out, and the side arriving with fewer moves wins. Ties
/// go right. Only the first heading is returned; the caller re-plans on the
/// next blocked move.
pub struct BypassPlanner<'a> {
    checker: &'a CollisionChecker,
    step_length: f64,
    move_ceiling: usize,
}

impl<'a> BypassPlanner<'a> {
    pub fn new(checker: &'a CollisionChecker, step_length: f64, move_ceiling: usize) -> Self {
        Self {
            checker,
            step_length,
            move_ceiling,
        }
    }

    /// First clear heading after rotating away from `heading` toward `side`.
    ///
    /// `heading` itself is not tried. `None` when all other headings are
    /// blocked.
    pub fn scan(&self, from: Coordinate, heading: Heading, side: Side) -> Option<Heading> {
        (1..Heading::COUNT as i32)
            .map(|turns| heading.rotated(turns * side.increment()))
            .find(|&candidate| !self.checker.is_blocked(from, candidate, self.step_length))
    }

    /// Fly toward `target` sticking to `side` whenever blocked.
    ///
    /// Returns the move count on arrival, starting from `moves_made`, or
    /// `None` once the count reaches the ceiling without arriving. Each
    /// iteration adds one move, so the loop ends within the ceiling.
    pub fn simulate(
        &self,
        from: Coordinate,
        target: &Target,
        side: Side,
        moves_made: usize,
    ) -> Option<usize> {
        let mut position = from;
        let mut moves = moves_made;

        loop {
            if target.is_reached_from(position) {
                return Some(moves);
            }
            if moves >= self.move_ceiling {
                return None;
            }

            let mut heading = bearing(position, target.position);
            if self.checker.is_blocked(position, heading, self.step_length) {
                heading = self.scan(position, heading, side)?;
            }

            position = offset(position, heading, self.step_length);
            moves += 1;
        }
    }

    /// Choose the heading to take from `from` when the direct one is blocked
    pub fn resolve(
        &self,
        from: Coordinate,
        target: &Target,
        moves_made: usize,
    ) -> Result<Bypass, PlanError> {
        let unreachable = || PlanError::DetourUnreachable {
            target: target.kind.clone(),
        };

        let right_moves = self.simulate(from, target, Side::Right, moves_made);
        let left_moves = self.simulate(from, target, Side::Left, moves_made);

        let side = match (right_moves, left_moves) {
            (None, None) => return Err(unreachable()),
            (None, Some(_)) => Side::Left,
            (Some(right), Some(left)) if left < right => Side::Left,
            _ => Side::Right,
        };

        let direct = bearing(from, target.position);
        let heading = self.scan(from, direct, side).ok_or_else(unreachable)?;

        debug!(
            "Blocked at {} toward {}: right={:?} left={:?}, going {:?} at {}",
            from, target.kind, right_moves, left_moves, side, heading
        );

        Ok(Bypass {
            side,
            heading,
            right_moves,
            left_moves,
        })
    }
}
