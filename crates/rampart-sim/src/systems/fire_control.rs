//! Fire control: target selection, aiming and launching for firing towers.
//!
//! Each tower runs `Idle -> Acquiring -> Engaging` with its sensor as the
//! only source of candidates. A held target is dropped as soon as it dies,
//! disappears or leaves the tower's range.

use glam::{Quat, Vec3};
use hecs::{Entity, World};

use rampart_core::components::{Hostile, SeekOffset, Tower};
use rampart_core::constants::{AIM_SMOOTHING, MUZZLE_HEIGHT};
use rampart_core::enums::{EnemyKind, ProjectileKind};
use rampart_core::events::SimEvent;
use rampart_core::types::{CellCoord, Position};

use crate::ledger::ScoreState;
use crate::links::{is_live, live_position, FiringTower, Ordnance, Sensor};
use crate::world_setup;

/// A projectile a tower decided to fire this step.
#[derive(Debug, Clone, Copy)]
struct Launch {
    cell: CellCoord,
    muzzle: Vec3,
    ordnance: Ordnance,
    damage: f32,
    speed: f32,
    hits_flying: bool,
    target: Entity,
    target_position: Vec3,
    seek_point: Vec3,
}

/// Run fire control for every firing tower, in cell order.
pub fn run(world: &mut World, now_secs: f32, events: &mut Vec<SimEvent>, score: &mut ScoreState) {
    let mut towers: Vec<(Entity, CellCoord)> = world
        .query::<(&Tower, &FiringTower)>()
        .iter()
        .map(|(entity, (tower, _))| (entity, tower.cell))
        .collect();
    towers.sort_by_key(|(_, cell)| *cell);

    let mut launches = Vec::new();
    {
        let world: &World = world;
        for (entity, cell) in towers {
            let Ok(origin) = world.get::<&Position>(entity).map(|p| p.0) else {
                continue;
            };
            let (Ok(mut tower), Ok(mut sensor)) = (
                world.get::<&mut FiringTower>(entity),
                world.get::<&mut Sensor>(entity),
            ) else {
                continue;
            };
            if let Some(launch) = evaluate(world, cell, origin, &mut tower, &mut sensor, now_secs) {
                launches.push(launch);
            }
        }
    }

    for launch in launches {
        let kind = match launch.ordnance {
            Ordnance::Seeking => {
                world_setup::spawn_seeking_projectile(
                    world,
                    launch.muzzle,
                    launch.damage,
                    launch.speed,
                    launch.target,
                    launch.seek_point,
                );
                ProjectileKind::Seeking
            }
            Ordnance::Arcing { explosion_radius } => {
                world_setup::spawn_arcing_projectile(
                    world,
                    launch.muzzle,
                    launch.damage,
                    launch.speed,
                    launch.target_position,
                    now_secs,
                    explosion_radius,
                    launch.hits_flying,
                );
                ProjectileKind::Arcing
            }
        };
        score.shots_fired += 1;
        tracing::trace!(cell = ?launch.cell, ?kind, "projectile fired");
        events.push(SimEvent::ProjectileFired {
            kind,
            tower: launch.cell,
        });
    }
}

/// One tower's decision for this step.
fn evaluate(
    world: &World,
    cell: CellCoord,
    origin: Vec3,
    tower: &mut FiringTower,
    sensor: &mut Sensor,
    now_secs: f32,
) -> Option<Launch> {
    let Some(target) = tower.target else {
        if sensor.any_targets_available(|unit| is_live(world, unit)) {
            tower.target = sensor.closest(origin, |unit| live_position(world, unit));
        }
        return None;
    };

    let target_position = match live_position(world, target) {
        Some(p) if origin.distance(p) <= tower.range => p,
        _ => {
            tower.target = sensor.closest(origin, |unit| live_position(world, unit));
            return None;
        }
    };

    if !can_attack(world, tower, target) {
        // Hold fire, but switch as soon as something attackable is nearest.
        tower.target = sensor.closest(origin, |unit| live_position(world, unit));
        return None;
    }

    tower.aim = tower
        .aim
        .slerp(look_rotation(origin, target_position, tower.aim), AIM_SMOOTHING);

    if !tower.ready_to_fire(now_secs) {
        return None;
    }
    tower.last_fire_secs = now_secs;

    let seek_offset = world
        .get::<&SeekOffset>(target)
        .map(|offset| offset.0)
        .unwrap_or(Vec3::ZERO);

    Some(Launch {
        cell,
        muzzle: origin + Vec3::Y * MUZZLE_HEIGHT,
        ordnance: tower.ordnance,
        damage: tower.damage,
        speed: tower.projectile_speed,
        hits_flying: tower.can_attack_flying,
        target,
        target_position,
        seek_point: target_position + seek_offset,
    })
}

fn can_attack(world: &World, tower: &FiringTower, target: Entity) -> bool {
    tower.can_attack_flying
        || world
            .get::<&Hostile>(target)
            .map(|hostile| hostile.kind == EnemyKind::Ground)
            .unwrap_or(false)
}

/// Yaw-only rotation facing from `from` toward `to`. Directly overhead keeps
/// the current orientation.
pub fn look_rotation(from: Vec3, to: Vec3, current: Quat) -> Quat {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx == 0.0 && dz == 0.0 {
        return current;
    }
    Quat::from_rotation_y(dx.atan2(dz))
}
