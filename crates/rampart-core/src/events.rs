//! Events emitted by the simulation for UI and effects feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, ProjectileKind, TowerKind};
use crate::error::CommandError;
use crate::types::CellCoord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    EnemySpawned { serial: u32, kind: EnemyKind },
    EnemyKilled { serial: u32, kind: EnemyKind },
    /// A unit reached the leak point; one life lost.
    EnemyLeaked { serial: u32, kind: EnemyKind },
    ProjectileFired { kind: ProjectileKind, tower: CellCoord },
    /// A projectile resolved. `hits` counts units damaged (0 or 1 for seeking).
    ProjectileImpact { kind: ProjectileKind, position: Vec3, hits: u32 },
    TowerBuilt { kind: TowerKind, cell: CellCoord, cost: u32 },
    TowerSold { kind: TowerKind, cell: CellCoord, refund: u32 },
    RouteRecomputed { version: u64, complete: bool },
    BuildLockChanged { locked: bool },
    LevelStarted { level: u32 },
    LevelComplete { level: u32 },
    GameLost { level: u32 },
    CommandRejected { reason: CommandError },
}
