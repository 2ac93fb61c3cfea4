//! Fundamental geometric and simulation types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World-space position of an entity.
/// x = East, y = Up (altitude), z = North.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Unit forward vector of an entity. Zero until the entity first turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Facing(pub Vec3);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each step).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

/// Location of a build cell expressed as column (x) and row (z).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    pub column: u32,
    pub row: u32,
}

impl SimTime {
    /// Advance by one step of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

impl CellCoord {
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

/// Moves `current` toward `target` by at most `max_delta`.
///
/// Returns `target` itself once it is within reach, so callers can detect
/// arrival with an exact comparison.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let offset = target - current;
    let distance = offset.length();
    if distance <= max_delta || distance == 0.0 {
        return target;
    }
    current + offset / distance * max_delta
}

/// Drops the vertical component.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_towards_does_not_overshoot() {
        let target = Vec3::new(10.0, 0.0, 0.0);
        let step = move_towards(Vec3::ZERO, target, 4.0);
        assert_eq!(step, Vec3::new(4.0, 0.0, 0.0));

        let arrived = move_towards(Vec3::new(8.0, 0.0, 0.0), target, 4.0);
        assert_eq!(arrived, target);
    }

    #[test]
    fn move_towards_zero_distance_is_target() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(move_towards(p, p, 0.0), p);
    }

    #[test]
    fn flatten_drops_altitude() {
        assert_eq!(flatten(Vec3::new(3.0, 18.0, 4.0)), Vec3::new(3.0, 0.0, 4.0));
    }
}
