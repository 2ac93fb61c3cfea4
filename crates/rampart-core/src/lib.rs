//! Core types and definitions for the Rampart simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, events, state snapshots, configuration and
//! constants. It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod curve;
pub mod enums;
pub mod error;
pub mod events;
pub mod sensor;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
