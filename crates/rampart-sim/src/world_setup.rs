//! Entity spawn factories.
//!
//! Creates hostile units, towers and projectiles with the component
//! bundles the systems expect.

use glam::Vec3;
use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::config::{SimConfig, TowerAttack};
use rampart_core::enums::*;
use rampart_core::sensor::SensorVolume;
use rampart_core::types::{CellCoord, Facing, Position};
use rampart_nav::motion::flying_destination;
use rampart_nav::route::Route;

use crate::links::{FiringTower, Ordnance, SeekingFlight, Sensor};

/// Spawn one hostile unit at the spawn point for `level`.
///
/// Ground units pick up the route on their first movement step. Flying
/// units fix their destination now, from whatever route is current.
pub fn spawn_enemy(
    world: &mut World,
    config: &SimConfig,
    kind: EnemyKind,
    level: u32,
    serial: u32,
    route: &Route,
) -> Entity {
    let stats = config.enemies.stats(kind);
    let hostile = Hostile { kind, serial };
    let vitals = Vitals::at_level(stats.max_health, stats.health_gain_per_level, level);
    let seek = SeekOffset(Vec3::new(0.0, stats.seek_point_height, 0.0));
    let facing = Facing(Vec3::NEG_Z);

    match kind {
        EnemyKind::Ground => world.spawn((
            hostile,
            vitals,
            Position(config.grid.spawn_point()),
            facing,
            seek,
            GroundMover {
                speed: stats.speed,
                route_version: route.version(),
                corner_index: 0,
                current_corner: None,
            },
        )),
        EnemyKind::Flying => {
            let start = config.grid.spawn_point() + Vec3::Y * config.grid.flying_altitude;
            world.spawn((
                hostile,
                vitals,
                Position(start),
                facing,
                seek,
                FlyingMover {
                    speed: stats.speed,
                    destination: flying_destination(route, start.y),
                },
            ))
        }
    }
}

/// Spawn a tower of `kind` centred on `cell`.
pub fn spawn_tower(world: &mut World, config: &SimConfig, kind: TowerKind, cell: CellCoord) -> Entity {
    let stats = config.towers.stats(kind);
    let tower = Tower {
        kind,
        cell,
        cost: stats.cost,
        refund_factor: stats.refund_factor,
    };
    let position = Position(config.grid.cell_center(cell));
    let sensor = Sensor::new(SensorVolume::for_range(stats.sensor, stats.range));

    match stats.attack {
        TowerAttack::None => world.spawn((tower, position)),
        TowerAttack::Seeking {
            damage,
            fire_interval_secs,
            projectile_speed,
            can_attack_flying,
        } => world.spawn((
            tower,
            position,
            sensor,
            FiringTower::new(
                Ordnance::Seeking,
                damage,
                fire_interval_secs,
                projectile_speed,
                can_attack_flying,
                stats.range,
            ),
        )),
        TowerAttack::Arcing {
            damage,
            fire_interval_secs,
            projectile_speed,
            explosion_radius,
            can_attack_flying,
        } => world.spawn((
            tower,
            position,
            sensor,
            FiringTower::new(
                Ordnance::Arcing { explosion_radius },
                damage,
                fire_interval_secs,
                projectile_speed,
                can_attack_flying,
                stats.range,
            ),
        )),
        TowerAttack::Area { damage_per_second } => {
            world.spawn((tower, position, sensor, HotPlate { damage_per_second }))
        }
    }
}

/// Spawn a projectile that homes on `target`.
pub fn spawn_seeking_projectile(
    world: &mut World,
    origin: Vec3,
    damage: f32,
    speed: f32,
    target: Entity,
    aim_point: Vec3,
) -> Entity {
    world.spawn((
        Projectile {
            kind: ProjectileKind::Seeking,
            damage,
            speed,
        },
        Position(origin),
        Facing((aim_point - origin).normalize_or_zero()),
        SeekingFlight {
            target: Some(target),
            aim_point,
        },
    ))
}

/// Spawn a shell that lands on the ground beneath `target_position`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_arcing_projectile(
    world: &mut World,
    origin: Vec3,
    damage: f32,
    speed: f32,
    target_position: Vec3,
    now_secs: f32,
    explosion_radius: f32,
    hits_flying: bool,
) -> Entity {
    let destination = Vec3::new(target_position.x, 0.0, target_position.z);
    let xz_distance = Vec3::new(origin.x, 0.0, origin.z).distance(destination);
    world.spawn((
        Projectile {
            kind: ProjectileKind::Arcing,
            damage,
            speed,
        },
        Position(origin),
        ArcFlight {
            initial: origin,
            destination,
            xz_distance,
            spawn_secs: now_secs,
            explosion_radius,
            hits_flying,
        },
    ))
}
