//! Simulation configuration.
//!
//! Every field has a default drawn from [`crate::constants`], so a JSON
//! file only needs to name what it overrides.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::curve::ArcCurve;
use crate::enums::{EnemyKind, SensorShape, TowerKind};
use crate::error::ConfigError;
use crate::types::CellCoord;

/// Full configuration for one simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Steps per second used by `SimulationEngine::tick`.
    pub tick_rate: u32,
    pub grid: GridConfig,
    pub economy: EconomyConfig,
    pub waves: WaveConfig,
    pub enemies: EnemyRoster,
    pub towers: TowerCatalog,
    pub route: RouteConfig,
    pub arc_curve: ArcCurve,
}

/// Layout of the build grid and the fixed route endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// World x of the centre of column 0.
    pub origin_x: f32,
    /// World z of the centre of row 0.
    pub origin_z: f32,
    pub cell_size: f32,
    pub columns: u32,
    pub rows: u32,
    pub spawn_cell: CellCoord,
    pub leak_cell: CellCoord,
    /// Height above the spawn point flying units travel at.
    pub flying_altitude: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_gold: u32,
    pub starting_lives: u32,
    pub gold_reward_per_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub enemies_per_level: u32,
    pub spawn_interval_secs: f32,
    pub first_spawn_delay_secs: f32,
    /// Levels divisible by this are flying levels.
    pub flying_level_interval: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub max_health: f32,
    pub health_gain_per_level: f32,
    pub speed: f32,
    /// Height of the seek point above the unit's origin.
    pub seek_point_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRoster {
    pub ground: EnemyStats,
    pub flying: EnemyStats,
}

/// How a tower deals damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TowerAttack {
    /// Occupies its cell and nothing else.
    None,
    /// Discrete fire of seeking projectiles.
    Seeking {
        damage: f32,
        fire_interval_secs: f32,
        projectile_speed: f32,
        can_attack_flying: bool,
    },
    /// Discrete fire of arcing area-damage projectiles.
    Arcing {
        damage: f32,
        fire_interval_secs: f32,
        projectile_speed: f32,
        explosion_radius: f32,
        can_attack_flying: bool,
    },
    /// Continuous damage to every sensed ground unit.
    Area { damage_per_second: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub cost: u32,
    pub refund_factor: f32,
    pub range: f32,
    pub sensor: SensorShape,
    pub attack: TowerAttack,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerCatalog {
    pub arrow: TowerStats,
    pub cannon: TowerStats,
    pub hot_plate: TowerStats,
    pub barricade: TowerStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Delay between a grid edit and the recomputation it schedules.
    pub recompute_delay_secs: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            grid: GridConfig::default(),
            economy: EconomyConfig::default(),
            waves: WaveConfig::default(),
            enemies: EnemyRoster::default(),
            towers: TowerCatalog::default(),
            route: RouteConfig::default(),
            arc_curve: ArcCurve::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin_x: GRID_ORIGIN_X,
            origin_z: GRID_ORIGIN_Z,
            cell_size: CELL_SIZE,
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            spawn_cell: CellCoord::new(SPAWN_CELL.0, SPAWN_CELL.1),
            leak_cell: CellCoord::new(LEAK_CELL.0, LEAK_CELL.1),
            flying_altitude: FLYING_ALTITUDE,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_gold: STARTING_GOLD,
            starting_lives: STARTING_LIVES,
            gold_reward_per_level: GOLD_REWARD_PER_LEVEL,
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            enemies_per_level: ENEMIES_PER_LEVEL,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            first_spawn_delay_secs: FIRST_SPAWN_DELAY_SECS,
            flying_level_interval: FLYING_LEVEL_INTERVAL,
        }
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            ground: EnemyStats {
                max_health: GROUND_MAX_HEALTH,
                health_gain_per_level: GROUND_HEALTH_GAIN_PER_LEVEL,
                speed: GROUND_SPEED,
                seek_point_height: SEEK_POINT_HEIGHT,
            },
            flying: EnemyStats {
                max_health: FLYING_MAX_HEALTH,
                health_gain_per_level: FLYING_HEALTH_GAIN_PER_LEVEL,
                speed: FLYING_SPEED,
                seek_point_height: SEEK_POINT_HEIGHT,
            },
        }
    }
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self {
            arrow: TowerStats {
                cost: ARROW_COST,
                refund_factor: DEFAULT_REFUND_FACTOR,
                range: ARROW_RANGE,
                sensor: SensorShape::Box,
                attack: TowerAttack::Seeking {
                    damage: ARROW_DAMAGE,
                    fire_interval_secs: ARROW_FIRE_INTERVAL_SECS,
                    projectile_speed: ARROW_PROJECTILE_SPEED,
                    can_attack_flying: true,
                },
            },
            cannon: TowerStats {
                cost: CANNON_COST,
                refund_factor: DEFAULT_REFUND_FACTOR,
                range: CANNON_RANGE,
                sensor: SensorShape::Sphere,
                attack: TowerAttack::Arcing {
                    damage: CANNON_DAMAGE,
                    fire_interval_secs: CANNON_FIRE_INTERVAL_SECS,
                    projectile_speed: CANNON_PROJECTILE_SPEED,
                    explosion_radius: CANNON_EXPLOSION_RADIUS,
                    can_attack_flying: false,
                },
            },
            hot_plate: TowerStats {
                cost: HOT_PLATE_COST,
                refund_factor: DEFAULT_REFUND_FACTOR,
                range: HOT_PLATE_RANGE,
                sensor: SensorShape::Box,
                attack: TowerAttack::Area {
                    damage_per_second: HOT_PLATE_DAMAGE_PER_SECOND,
                },
            },
            barricade: TowerStats {
                cost: BARRICADE_COST,
                refund_factor: 1.0,
                range: 0.0,
                sensor: SensorShape::Box,
                attack: TowerAttack::None,
            },
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            recompute_delay_secs: ROUTE_RECOMPUTE_DELAY_SECS,
        }
    }
}

impl SimConfig {
    /// Parses a JSON document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Seconds per step at the configured tick rate.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.tick_rate == 0 {
            return invalid("tick_rate must be positive");
        }
        let grid = &self.grid;
        if !(grid.cell_size > 0.0) || grid.columns == 0 || grid.rows == 0 {
            return invalid("grid must have positive cell size and dimensions");
        }
        if !grid.contains(grid.spawn_cell) || !grid.contains(grid.leak_cell) {
            return invalid("spawn and leak cells must lie inside the grid");
        }
        if grid.spawn_cell == grid.leak_cell {
            return invalid("spawn and leak cells must differ");
        }
        if self.waves.flying_level_interval == 0 {
            return invalid("flying_level_interval must be positive");
        }
        if self.waves.spawn_interval_secs < 0.0 || self.waves.first_spawn_delay_secs < 0.0 {
            return invalid("spawn timings must not be negative");
        }
        for stats in [&self.enemies.ground, &self.enemies.flying] {
            if !(stats.speed > 0.0) || !(stats.max_health > 0.0) {
                return invalid("enemy speed and health must be positive");
            }
        }
        for kind in TowerKind::ALL {
            let stats = self.towers.stats(kind);
            if !(0.0..=1.0).contains(&stats.refund_factor) {
                return invalid("refund_factor must be within [0, 1]");
            }
            match stats.attack {
                TowerAttack::Seeking {
                    projectile_speed, ..
                } if !(projectile_speed > 0.0) => {
                    return invalid("projectile_speed must be positive");
                }
                TowerAttack::Arcing {
                    projectile_speed,
                    explosion_radius,
                    ..
                } if !(projectile_speed > 0.0) || !(explosion_radius > 0.0) => {
                    return invalid("arcing towers need positive speed and radius");
                }
                _ => {}
            }
        }
        if self.route.recompute_delay_secs < 0.0 {
            return invalid("recompute_delay_secs must not be negative");
        }
        if !self.arc_curve.is_well_formed() {
            return invalid("arc_curve keys must ascend and end at value 1");
        }
        Ok(())
    }
}

impl GridConfig {
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column < self.columns && cell.row < self.rows
    }

    /// World position of a cell centre on the ground plane.
    pub fn cell_center(&self, cell: CellCoord) -> Vec3 {
        Vec3::new(
            self.origin_x + cell.column as f32 * self.cell_size,
            0.0,
            self.origin_z + cell.row as f32 * self.cell_size,
        )
    }

    pub fn spawn_point(&self) -> Vec3 {
        self.cell_center(self.spawn_cell)
    }

    pub fn leak_point(&self) -> Vec3 {
        self.cell_center(self.leak_cell)
    }

    /// Whether towers may never be built on this cell.
    pub fn is_reserved(&self, cell: CellCoord) -> bool {
        cell == self.spawn_cell || cell == self.leak_cell
    }
}

impl EnemyRoster {
    pub fn stats(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Ground => &self.ground,
            EnemyKind::Flying => &self.flying,
        }
    }
}

impl TowerStats {
    /// Area towers sit flush with the ground and can be walked over.
    pub fn blocks_route(&self) -> bool {
        !matches!(self.attack, TowerAttack::Area { .. })
    }
}

impl TowerCatalog {
    pub fn stats(&self, kind: TowerKind) -> &TowerStats {
        match kind {
            TowerKind::Arrow => &self.arrow,
            TowerKind::Cannon => &self.cannon,
            TowerKind::HotPlate => &self.hot_plate,
            TowerKind::Barricade => &self.barricade,
        }
    }
}

impl WaveConfig {
    /// Unit type spawned throughout `level`.
    pub fn enemy_kind_for_level(&self, level: u32) -> EnemyKind {
        if self.flying_level_interval > 0 && level % self.flying_level_interval == 0 {
            EnemyKind::Flying
        } else {
            EnemyKind::Ground
        }
    }
}
