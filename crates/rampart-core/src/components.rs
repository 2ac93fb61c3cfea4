//! ECS components for hecs entities.
//!
//! Components that reference other entities by handle live in the sim
//! crate; everything here is plain data.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, ProjectileKind, TowerKind};
use crate::types::CellCoord;

/// Marks an entity as a hostile unit. Every hostile is parented to the
/// enemy holder simply by carrying this component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile {
    pub kind: EnemyKind,
    /// Spawn order, used to keep sensor membership deterministic.
    pub serial: u32,
}

/// Health and alive state of a hostile unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    /// Becomes false exactly once, on death or leak.
    pub alive: bool,
}

/// What a call to [`Vitals::apply_damage`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Non-positive amount or an already-dead unit; nothing changed.
    Ignored,
    /// Health dropped but the unit survives.
    Wounded,
    /// This call brought a living unit to zero health.
    Killed,
}

impl Vitals {
    /// Spawn-time vitals: `base + gain_per_level * (level - 1)` at full health.
    pub fn at_level(base: f32, gain_per_level: f32, level: u32) -> Self {
        let max_health = base + gain_per_level * level.saturating_sub(1) as f32;
        Self {
            health: max_health,
            max_health,
            alive: true,
        }
    }

    /// Reduces health by `amount`, floored at zero. Death fires at most once;
    /// a dead unit ignores further damage.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.alive || !(amount > 0.0) {
            return DamageOutcome::Ignored;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health == 0.0 && self.retire() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Clears the alive flag. Returns false if it was already cleared.
    pub fn retire(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// Offset from a unit's origin to the point seeking projectiles aim at.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeekOffset(pub Vec3);

/// Route-following movement state of a ground unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundMover {
    /// Units per second.
    pub speed: f32,
    /// Version of the route the index below refers to.
    pub route_version: u64,
    /// Index of the corner currently being walked to.
    pub corner_index: usize,
    /// Corner captured when the current leg started.
    pub current_corner: Option<Vec3>,
}

/// Straight-line movement state of a flying unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyingMover {
    /// Units per second.
    pub speed: f32,
    /// Fixed flight goal, captured at spawn.
    pub destination: Option<Vec3>,
}

/// A built emplacement occupying one grid cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower {
    pub kind: TowerKind,
    pub cell: CellCoord,
    pub cost: u32,
    pub refund_factor: f32,
}

impl Tower {
    /// Gold returned on sale, rounded up.
    pub fn refund(&self) -> u32 {
        (self.cost as f32 * self.refund_factor).ceil() as u32
    }
}

/// Continuous area damage applied to sensed ground units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HotPlate {
    pub damage_per_second: f32,
}

/// Common projectile payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub damage: f32,
    /// Units per second.
    pub speed: f32,
}

/// Committed ballistic trajectory of an arcing projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArcFlight {
    /// Position at spawn.
    pub initial: Vec3,
    /// Ground point under the target at spawn time (y = 0).
    pub destination: Vec3,
    /// Horizontal distance from spawn to destination.
    pub xz_distance: f32,
    /// Simulation time of the spawn.
    pub spawn_secs: f32,
    pub explosion_radius: f32,
    /// Whether the blast damages flying units.
    pub hits_flying: bool,
}

impl ArcFlight {
    /// Elapsed time over expected flight time. Exceeds 1 once overdue.
    pub fn fraction_travelled(&self, now_secs: f32, speed: f32) -> f32 {
        let time_to_reach = self.xz_distance / speed;
        if !(time_to_reach > 0.0) {
            return 1.0;
        }
        (now_secs - self.spawn_secs) / time_to_reach
    }
}

/// Damage dealt by an explosion at `distance` from its centre.
/// Falls linearly from `base` at the centre to zero at `radius`.
pub fn explosion_damage(base: f32, distance: f32, radius: f32) -> f32 {
    if !(radius > 0.0) {
        return 0.0;
    }
    base * (1.0 - (distance / radius).clamp(0.0, 1.0))
}
