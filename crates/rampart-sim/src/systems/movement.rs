//! Movement system: ground units walk the route, flying units fly straight.

use hecs::World;

use rampart_core::components::{FlyingMover, GroundMover, Hostile, Vitals};
use rampart_core::events::SimEvent;
use rampart_core::types::{Facing, Position};
use rampart_nav::motion::{step_flying, step_ground};
use rampart_nav::route::Route;

use crate::ledger::{Ledger, ScoreState};

/// Move every living unit by `dt`. Units that arrive leak: they are retired,
/// cost a life, and are left for cleanup.
pub fn run(
    world: &mut World,
    route: &Route,
    dt: f32,
    ledger: &mut Ledger,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) {
    let mut leak = |hostile: &Hostile, vitals: &mut Vitals| {
        if !vitals.retire() {
            return;
        }
        ledger.lose_life();
        score.leaks += 1;
        tracing::debug!(serial = hostile.serial, lives = ledger.lives, "enemy leaked");
        events.push(SimEvent::EnemyLeaked {
            serial: hostile.serial,
            kind: hostile.kind,
        });
    };

    for (_entity, (hostile, vitals, position, facing, mover)) in world.query_mut::<(
        &Hostile,
        &mut Vitals,
        &mut Position,
        &mut Facing,
        &mut GroundMover,
    )>() {
        if !vitals.alive {
            continue;
        }
        let step = step_ground(position.0, *mover, route, dt);
        position.0 = step.position;
        *mover = step.mover;
        if let Some(direction) = step.facing {
            facing.0 = direction;
        }
        if step.arrived {
            leak(hostile, vitals);
        }
    }

    for (_entity, (hostile, vitals, position, mover)) in
        world.query_mut::<(&Hostile, &mut Vitals, &mut Position, &mut FlyingMover)>()
    {
        if !vitals.alive {
            continue;
        }
        let step = step_flying(position.0, *mover, route, dt);
        position.0 = step.position;
        *mover = step.mover;
        if step.arrived {
            leak(hostile, vitals);
        }
    }
}
