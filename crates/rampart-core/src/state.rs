//! Game state snapshot: the visible state handed to the presentation layer
//! after each step.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{CellCoord, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub gold: u32,
    pub lives: u32,
    pub build_locked: bool,
    pub route: RouteView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteView {
    pub version: u64,
    pub status: RouteStatus,
    pub corners: Vec<Vec3>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub serial: u32,
    pub kind: EnemyKind,
    pub position: Vec3,
    pub facing: Vec3,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub kind: TowerKind,
    pub cell: CellCoord,
    pub position: Vec3,
    /// Aim indicator rotation; identity for towers without one.
    pub aim: Quat,
    /// Serial of the unit currently targeted, if any.
    pub target: Option<u32>,
    /// Gold a sale would return.
    pub refund: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub position: Vec3,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub kills: u32,
    pub leaks: u32,
    pub shots_fired: u32,
}
