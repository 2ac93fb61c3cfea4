//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Hostile unit movement variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks the route corner by corner.
    #[default]
    Ground,
    /// Flies straight to the leak point at a fixed altitude.
    Flying,
}

/// Buildable emplacement types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Fires seeking arrows. Can hit flying units.
    #[default]
    Arrow,
    /// Lobs arcing shells that explode on the ground.
    Cannon,
    /// Burns every ground unit standing in its volume.
    HotPlate,
    /// Blocks a cell without attacking.
    Barricade,
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Arrow,
        TowerKind::Cannon,
        TowerKind::HotPlate,
        TowerKind::Barricade,
    ];
}

/// Projectile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Seeking,
    Arcing,
}

/// Shape of a tower's detection volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorShape {
    /// Square footprint of side `2 * range`, fixed height.
    #[default]
    Box,
    /// Sphere of radius `range`.
    Sphere,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Between levels: towers may be built and sold.
    #[default]
    Build,
    /// A level is running and enemies are spawning.
    Play,
    /// Lives ran out at the end of a level.
    Lost,
}

/// Result of the most recent route computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStatus {
    /// No route has been computed yet.
    #[default]
    Pending,
    /// A full walkable path exists from spawn to leak.
    Complete,
    /// No walkable path exists.
    Incomplete,
}
