//! Hot plate system: continuous damage to ground units in the volume.

use hecs::{Entity, World};

use rampart_core::components::{HotPlate, Hostile, Tower};
use rampart_core::enums::EnemyKind;
use rampart_core::events::SimEvent;

use crate::ledger::ScoreState;
use crate::links::{is_live, Sensor};
use crate::systems::damage;

/// Burn every sensed ground unit for `damage_per_second * dt`.
pub fn run(world: &mut World, dt: f32, events: &mut Vec<SimEvent>, score: &mut ScoreState) {
    let mut burns: Vec<(Tower, Entity, f32)> = Vec::new();
    {
        let world: &World = world;
        let mut plates = world.query::<(&Tower, &HotPlate, &mut Sensor)>();
        for (_entity, (tower, plate, sensor)) in plates.iter() {
            if !sensor.any_targets_available(|unit| is_live(world, unit)) {
                continue;
            }
            for &unit in sensor.members() {
                let grounded = world
                    .get::<&Hostile>(unit)
                    .map(|hostile| hostile.kind == EnemyKind::Ground)
                    .unwrap_or(false);
                if grounded {
                    burns.push((*tower, unit, plate.damage_per_second * dt));
                }
            }
        }
    }
    burns.sort_by_key(|(tower, _, _)| tower.cell);

    for (_tower, unit, amount) in burns {
        damage::apply(world, unit, amount, events, score);
    }
}
