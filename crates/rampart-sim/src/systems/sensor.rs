//! Sensor feed: turns volume overlap into enter/exit notifications.

use glam::Vec3;
use hecs::{Entity, World};

use rampart_core::components::Hostile;
use rampart_core::types::Position;

use crate::links::Sensor;

/// Compare every sensor volume against every hostile unit and report
/// crossings. Units are visited in spawn order so simultaneous entries land
/// in a deterministic order.
///
/// Despawned units are never visited, so they never produce an exit and
/// stay in a sensor's set until a query evicts them.
pub fn run(world: &mut World) {
    let mut hostiles: Vec<(u32, Entity, Vec3)> = world
        .query::<(&Hostile, &Position)>()
        .iter()
        .map(|(entity, (hostile, position))| (hostile.serial, entity, position.0))
        .collect();
    hostiles.sort_by_key(|(serial, _, _)| *serial);

    for (_entity, (sensor, origin)) in world.query_mut::<(&mut Sensor, &Position)>() {
        for &(_, unit, point) in &hostiles {
            let inside = sensor.volume().contains(origin.0, point);
            match (inside, sensor.contains(unit)) {
                (true, false) => sensor.on_enter(unit),
                (false, true) => sensor.on_exit(unit),
                _ => {}
            }
        }
    }
}
