//! Damage application shared by every attack.

use hecs::{Entity, World};

use rampart_core::components::{DamageOutcome, Hostile, Vitals};
use rampart_core::events::SimEvent;

use crate::ledger::ScoreState;

/// Apply `amount` to a unit. A handle to a despawned unit is a no-op.
///
/// A kill is scored and reported exactly once; the body stays in the world
/// with `alive == false` until cleanup despawns it.
pub fn apply(
    world: &World,
    entity: Entity,
    amount: f32,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) -> DamageOutcome {
    let outcome = match world.get::<&mut Vitals>(entity) {
        Ok(mut vitals) => vitals.apply_damage(amount),
        Err(_) => return DamageOutcome::Ignored,
    };

    if outcome == DamageOutcome::Killed {
        score.kills += 1;
        if let Ok(hostile) = world.get::<&Hostile>(entity) {
            tracing::trace!(serial = hostile.serial, "enemy killed");
            events.push(SimEvent::EnemyKilled {
                serial: hostile.serial,
                kind: hostile.kind,
            });
        }
    }
    outcome
}
