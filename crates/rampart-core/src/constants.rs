//! Simulation constants and default tuning parameters.
//!
//! These seed `SimConfig::default()`; a configuration file may override
//! any of them.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Build grid ---

/// Side length of one build cell in world units.
pub const CELL_SIZE: f32 = 10.0;

/// World x of the centre of column 0.
pub const GRID_ORIGIN_X: f32 = -70.0;

/// World z of the centre of row 0.
pub const GRID_ORIGIN_Z: f32 = -80.0;

/// Number of build columns (x from -70 to 70).
pub const GRID_COLUMNS: u32 = 15;

/// Number of build rows (z from -80 to 80).
pub const GRID_ROWS: u32 = 17;

/// Cell enemies spawn from (far end, positive z).
pub const SPAWN_CELL: (u32, u32) = (7, 16);

/// Cell enemies leak through (near end, negative z).
pub const LEAK_CELL: (u32, u32) = (7, 0);

/// Altitude above the spawn point at which flying units travel.
pub const FLYING_ALTITUDE: f32 = 18.0;

// --- Economy ---

pub const STARTING_GOLD: u32 = 50;
pub const STARTING_LIVES: u32 = 40;
pub const GOLD_REWARD_PER_LEVEL: u32 = 12;

// --- Waves ---

pub const ENEMIES_PER_LEVEL: u32 = 15;

/// Seconds between two spawns within a level.
pub const SPAWN_INTERVAL_SECS: f32 = 0.35;

/// Seconds from level start to the first spawn.
pub const FIRST_SPAWN_DELAY_SECS: f32 = 0.5;

/// Every Nth level is a flying level.
pub const FLYING_LEVEL_INTERVAL: u32 = 4;

// --- Enemies ---

pub const GROUND_MAX_HEALTH: f32 = 20.0;
pub const GROUND_HEALTH_GAIN_PER_LEVEL: f32 = 3.0;
pub const GROUND_SPEED: f32 = 22.0;

pub const FLYING_MAX_HEALTH: f32 = 12.0;
pub const FLYING_HEALTH_GAIN_PER_LEVEL: f32 = 2.0;
pub const FLYING_SPEED: f32 = 16.0;

/// Offset from a unit's origin to the point projectiles aim at.
pub const SEEK_POINT_HEIGHT: f32 = 2.5;

// --- Towers ---

pub const ARROW_COST: u32 = 5;
pub const ARROW_RANGE: f32 = 45.0;
pub const ARROW_DAMAGE: f32 = 4.0;
pub const ARROW_FIRE_INTERVAL_SECS: f32 = 0.5;
pub const ARROW_PROJECTILE_SPEED: f32 = 60.0;

pub const CANNON_COST: u32 = 12;
pub const CANNON_RANGE: f32 = 40.0;
pub const CANNON_DAMAGE: f32 = 14.0;
pub const CANNON_FIRE_INTERVAL_SECS: f32 = 1.6;
pub const CANNON_PROJECTILE_SPEED: f32 = 35.0;
pub const CANNON_EXPLOSION_RADIUS: f32 = 25.0;

pub const HOT_PLATE_COST: u32 = 8;
/// Half a cell: the plate only covers its own footprint.
pub const HOT_PLATE_RANGE: f32 = 5.0;
pub const HOT_PLATE_DAMAGE_PER_SECOND: f32 = 10.0;

pub const BARRICADE_COST: u32 = 2;

/// Fraction of the build cost refunded on sale.
pub const DEFAULT_REFUND_FACTOR: f32 = 0.5;

/// Height of a box-shaped sensor volume.
pub const SENSOR_BOX_HEIGHT: f32 = 30.0;

/// Slerp ratio applied to a tower's aim each tick.
pub const AIM_SMOOTHING: f32 = 0.8;

/// Height above the tower origin at which projectiles are released.
pub const MUZZLE_HEIGHT: f32 = 8.0;

// --- Route ---

/// Delay between a grid edit and the route recomputation it triggers.
pub const ROUTE_RECOMPUTE_DELAY_SECS: f32 = 0.1;
