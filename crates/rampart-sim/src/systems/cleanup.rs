//! Cleanup system: despawns dead units and spent projectiles.

use hecs::{Entity, World};

use rampart_core::components::{Hostile, Vitals};

/// Despawn every dead hostile plus anything other systems queued in
/// `despawn_buffer` this step.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (entity, (_hostile, vitals)) in world.query_mut::<(&Hostile, &Vitals)>() {
        if !vitals.alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        // Already gone is fine: a unit can be queued twice in one step.
        let _ = world.despawn(entity);
    }
}

/// Number of hostile entities still in the world, dead bodies included.
pub fn hostile_count(world: &World) -> usize {
    world.query::<&Hostile>().iter().count()
}
