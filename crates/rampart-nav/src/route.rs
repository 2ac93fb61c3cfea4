//! The shared ground route and its deferred recomputation.

use std::sync::Arc;

use glam::Vec3;
use rampart_core::enums::RouteStatus;

use crate::solver::RouteSolution;

/// Immutable snapshot of the corner sequence every ground unit follows.
///
/// A new version replaces the old one wholesale; units compare the version
/// they last read against [`Route::version`] to notice the swap.
#[derive(Debug, Clone, Default)]
pub struct Route {
    version: u64,
    status: RouteStatus,
    corners: Arc<[Vec3]>,
}

impl Route {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn status(&self) -> RouteStatus {
        self.status
    }

    pub fn corners(&self) -> &[Vec3] {
        &self.corners
    }

    pub fn corner(&self, index: usize) -> Option<Vec3> {
        self.corners.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.corners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.corners.len().checked_sub(1)
    }

    /// Successor route after a computation.
    ///
    /// A complete solution bumps the version and swaps the corners. An
    /// incomplete one keeps the last good corners and version and only
    /// records the failure.
    pub fn succeeded_by(&self, solution: RouteSolution) -> Route {
        match solution {
            RouteSolution::Complete(corners) => Route {
                version: self.version + 1,
                status: RouteStatus::Complete,
                corners: corners.into(),
            },
            RouteSolution::Incomplete => Route {
                version: self.version,
                status: RouteStatus::Incomplete,
                corners: Arc::clone(&self.corners),
            },
        }
    }

    /// True when the last computation found no path.
    pub fn is_blocked(&self) -> bool {
        self.status == RouteStatus::Incomplete
    }
}

/// Single-slot debounce for route recomputation.
///
/// Each request replaces whatever was pending, so a burst of grid edits
/// produces exactly one computation `delay` seconds after the last edit.
#[derive(Debug, Clone)]
pub struct RecomputeSchedule {
    delay_secs: f32,
    pending: Option<f32>,
}

impl RecomputeSchedule {
    pub fn new(delay_secs: f32) -> Self {
        Self {
            delay_secs,
            pending: None,
        }
    }

    /// Schedule a recomputation, superseding any pending one.
    pub fn request(&mut self) {
        if self.pending.is_some() {
            tracing::trace!("superseding pending route recompute");
        }
        self.pending = Some(self.delay_secs);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance by `dt`. Returns true exactly once, when the pending request
    /// comes due.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.pending.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
