//! Route-following motion for hostile units.
//!
//! Pure functions over plain data: the sim's movement system reads the
//! components, calls into here, and writes the results back.

use glam::Vec3;
use rampart_core::components::{FlyingMover, GroundMover};
use rampart_core::types::move_towards;

use crate::route::Route;

/// Result of advancing one ground unit by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundStep {
    pub position: Vec3,
    pub mover: GroundMover,
    /// New heading, when the unit turned this step.
    pub facing: Option<Vec3>,
    /// The unit reached the final corner of the route it is on.
    pub arrived: bool,
}

/// Advance a ground unit along the shared route.
///
/// The leg in progress always finishes on the corner captured when it
/// started. At each corner the unit decides what to walk to next: on an
/// unchanged route it moves to the following corner or arrives at the last
/// one; on a replaced route it re-reads its current index in the new
/// sequence, clamped to the last corner.
pub fn step_ground(position: Vec3, mover: GroundMover, route: &Route, dt: f32) -> GroundStep {
    let mut mover = mover;
    let hold = GroundStep {
        position,
        mover,
        facing: None,
        arrived: false,
    };

    let corner = match mover.current_corner {
        Some(corner) => corner,
        None => {
            // Spawned before any route existed.
            let Some(first) = route.corner(0) else {
                return hold;
            };
            mover.route_version = route.version();
            mover.corner_index = 0;
            mover.current_corner = Some(first);
            first
        }
    };

    // Leg 0 is the spawn leg and keeps the spawn orientation.
    let facing = if mover.corner_index != 0 {
        (corner - position).try_normalize()
    } else {
        None
    };

    let position = move_towards(position, corner, mover.speed * dt);
    let mut arrived = false;

    if position == corner {
        match route.last_index() {
            None => {}
            Some(last) if mover.route_version != route.version() => {
                mover.route_version = route.version();
                mover.corner_index = mover.corner_index.min(last);
                mover.current_corner = route.corner(mover.corner_index);
            }
            Some(last) if mover.corner_index >= last => arrived = true,
            Some(_) => {
                mover.corner_index += 1;
                mover.current_corner = route.corner(mover.corner_index);
            }
        }
    }

    GroundStep {
        position,
        mover,
        facing,
        arrived,
    }
}

/// Result of advancing one flying unit by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyingStep {
    pub position: Vec3,
    pub mover: FlyingMover,
    pub arrived: bool,
}

/// Flight goal for a unit at `altitude`: the final corner's horizontal
/// position at that height.
pub fn flying_destination(route: &Route, altitude: f32) -> Option<Vec3> {
    let last = route.corner(route.last_index()?)?;
    Some(Vec3::new(last.x, altitude, last.z))
}

/// Advance a flying unit straight toward its destination.
///
/// The destination is captured once and never follows route changes.
pub fn step_flying(position: Vec3, mover: FlyingMover, route: &Route, dt: f32) -> FlyingStep {
    let mut mover = mover;
    let destination = match mover.destination {
        Some(d) => d,
        None => match flying_destination(route, position.y) {
            Some(d) => {
                mover.destination = Some(d);
                d
            }
            None => {
                return FlyingStep {
                    position,
                    mover,
                    arrived: false,
                }
            }
        },
    };

    let position = move_towards(position, destination, mover.speed * dt);
    FlyingStep {
        position,
        mover,
        arrived: position == destination,
    }
}
