//! Components that hold handles to other entities.
//!
//! A stored `Entity` is a weak reference: the unit behind it may have been
//! despawned or may be dead. Every reader goes through [`live_position`] or
//! an equivalent `world.get` and treats failure as "no target".

use glam::{Quat, Vec3};
use hecs::{Entity, World};

use rampart_core::components::Vitals;
use rampart_core::sensor::Targeter;
use rampart_core::types::Position;

/// Per-tower set of sensed hostile units.
pub type Sensor = Targeter<Entity>;

/// What a firing tower launches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ordnance {
    Seeking,
    Arcing { explosion_radius: f32 },
}

/// Targeting and fire state of a tower that launches projectiles.
#[derive(Debug, Clone, Copy)]
pub struct FiringTower {
    pub ordnance: Ordnance,
    pub damage: f32,
    pub fire_interval_secs: f32,
    pub projectile_speed: f32,
    pub can_attack_flying: bool,
    /// Beyond this distance from the tower origin a target is dropped.
    pub range: f32,
    pub target: Option<Entity>,
    pub last_fire_secs: f32,
    /// Orientation of the aim indicator.
    pub aim: Quat,
}

impl FiringTower {
    pub fn new(
        ordnance: Ordnance,
        damage: f32,
        fire_interval_secs: f32,
        projectile_speed: f32,
        can_attack_flying: bool,
        range: f32,
    ) -> Self {
        Self {
            ordnance,
            damage,
            fire_interval_secs,
            projectile_speed,
            can_attack_flying,
            range,
            target: None,
            last_fire_secs: f32::NEG_INFINITY,
            aim: Quat::IDENTITY,
        }
    }

    pub fn ready_to_fire(&self, now_secs: f32) -> bool {
        now_secs > self.last_fire_secs + self.fire_interval_secs
    }
}

/// Homing state of a seeking projectile.
#[derive(Debug, Clone, Copy)]
pub struct SeekingFlight {
    pub target: Option<Entity>,
    /// Last known seek point; kept after the target disappears.
    pub aim_point: Vec3,
}

/// Position of a unit that still exists and is alive.
pub fn live_position(world: &World, entity: Entity) -> Option<Vec3> {
    let vitals = world.get::<&Vitals>(entity).ok()?;
    if !vitals.alive {
        return None;
    }
    let position = world.get::<&Position>(entity).ok()?;
    Some(position.0)
}

/// Whether the handle still refers to a living unit.
pub fn is_live(world: &World, entity: Entity) -> bool {
    world
        .get::<&Vitals>(entity)
        .map(|vitals| vitals.alive)
        .unwrap_or(false)
}
