//! Headless runner for the rampart simulation.
//!
//! Wires the engine to a scripted player and reports the outcome of a run.

pub mod autoplay;
pub mod game_loop;
pub mod state;

pub use rampart_core as core;
