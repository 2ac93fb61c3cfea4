//! Simulation engine for Rampart.
//!
//! Owns the hecs ECS world, runs systems once per step, and produces
//! `GameStateSnapshot`s for whatever is driving it.

pub mod engine;
pub mod ledger;
pub mod links;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use rampart_core as core;
