//! Build grid, route solving and route-following motion for Rampart.
//!
//! Everything here is plain data and pure functions; there is no ECS
//! dependency. The sim crate owns the single current [`route::Route`] and
//! feeds it to the movement system each step.

pub mod grid;
pub mod motion;
pub mod route;
pub mod solver;

pub use rampart_core as core;

#[cfg(test)]
mod tests;
