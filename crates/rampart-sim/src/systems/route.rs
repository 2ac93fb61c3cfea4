//! Route scheduler: runs the deferred recomputation and tracks the build lock.

use rampart_core::events::SimEvent;
use rampart_nav::grid::BuildGrid;
use rampart_nav::route::{RecomputeSchedule, Route};
use rampart_nav::solver::RouteSolver;

/// The shared route plus everything needed to refresh it.
#[derive(Debug, Clone)]
pub struct RouteState {
    pub route: Route,
    pub schedule: RecomputeSchedule,
    /// Raised while the latest computation found no path.
    pub build_locked: bool,
}

impl RouteState {
    pub fn new(recompute_delay_secs: f32) -> Self {
        Self {
            route: Route::default(),
            schedule: RecomputeSchedule::new(recompute_delay_secs),
            build_locked: false,
        }
    }
}

/// Tick the debounce timer and, when it comes due, solve against the grid
/// as it is now.
pub fn run(
    state: &mut RouteState,
    grid: &BuildGrid,
    solver: &dyn RouteSolver,
    dt: f32,
    events: &mut Vec<SimEvent>,
) {
    if !state.schedule.tick(dt) {
        return;
    }

    let config = grid.config();
    let solution = solver.solve(grid, config.spawn_cell, config.leak_cell);
    state.route = state.route.succeeded_by(solution);

    let complete = !state.route.is_blocked();
    tracing::debug!(
        version = state.route.version(),
        complete,
        corners = state.route.len(),
        "route recomputed"
    );
    events.push(SimEvent::RouteRecomputed {
        version: state.route.version(),
        complete,
    });

    if state.build_locked == complete {
        state.build_locked = !complete;
        tracing::debug!(locked = state.build_locked, "build lock changed");
        events.push(SimEvent::BuildLockChanged {
            locked: state.build_locked,
        });
    }
}
