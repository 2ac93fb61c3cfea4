//! ECS systems that operate on the simulation world each step.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only) plus whatever engine-owned state they touch.

pub mod cleanup;
pub mod damage;
pub mod fire_control;
pub mod hot_plate;
pub mod movement;
pub mod projectile;
pub mod route;
pub mod sensor;
pub mod snapshot;
pub mod wave_spawner;
