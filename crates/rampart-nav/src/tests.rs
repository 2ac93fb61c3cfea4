use glam::Vec3;
use rampart_core::components::{FlyingMover, GroundMover};
use rampart_core::config::GridConfig;
use rampart_core::enums::RouteStatus;
use rampart_core::types::CellCoord;

use crate::grid::BuildGrid;
use crate::motion::{flying_destination, step_flying, step_ground};
use crate::route::{RecomputeSchedule, Route};
use crate::solver::{cell_path, GridRouteSolver, RouteSolution, RouteSolver};

const DT: f32 = 1.0 / 60.0;

fn route_through(corners: &[Vec3]) -> Route {
    Route::default().succeeded_by(RouteSolution::Complete(corners.to_vec()))
}

fn five_corners() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -10.0),
        Vec3::new(10.0, 0.0, -10.0),
        Vec3::new(10.0, 0.0, -20.0),
        Vec3::new(20.0, 0.0, -20.0),
    ]
}

fn ground_mover(speed: f32) -> GroundMover {
    GroundMover {
        speed,
        route_version: 0,
        corner_index: 0,
        current_corner: None,
    }
}

/// Step until arrival or `max_steps`, returning the final state.
fn walk(
    mut position: Vec3,
    mut mover: GroundMover,
    route: &Route,
    max_steps: usize,
) -> (Vec3, GroundMover, bool) {
    for _ in 0..max_steps {
        let step = step_ground(position, mover, route, DT);
        position = step.position;
        mover = step.mover;
        if step.arrived {
            return (position, mover, true);
        }
    }
    (position, mover, false)
}

// ---- Build grid ----

#[test]
fn test_out_of_bounds_cells_are_blocked() {
    let mut grid = BuildGrid::new(GridConfig::default());
    assert!(!grid.is_blocked(CellCoord::new(0, 0)));
    assert!(grid.is_blocked(CellCoord::new(99, 0)));
    assert!(!grid.set_blocked(CellCoord::new(99, 0), true));
    assert!(grid.set_blocked(CellCoord::new(3, 3), true));
    assert!(grid.is_blocked(CellCoord::new(3, 3)));
    assert_eq!(grid.blocked_count(), 1);
}

#[test]
fn test_default_grid_routes_straight_from_spawn_to_leak() {
    let grid = BuildGrid::new(GridConfig::default());
    let config = *grid.config();
    let solution = GridRouteSolver.solve(&grid, config.spawn_cell, config.leak_cell);
    assert_eq!(
        solution,
        RouteSolution::Complete(vec![config.spawn_point(), config.leak_point()])
    );
}

#[test]
fn test_full_wall_blocks_default_grid() {
    let mut grid = BuildGrid::new(GridConfig::default());
    let config = *grid.config();
    for column in 0..config.columns {
        grid.set_blocked(CellCoord::new(column, 8), true);
    }
    assert_eq!(
        GridRouteSolver.solve(&grid, config.spawn_cell, config.leak_cell),
        RouteSolution::Incomplete
    );

    grid.set_blocked(CellCoord::new(0, 8), false);
    let cells = cell_path(&grid, config.spawn_cell, config.leak_cell).unwrap();
    assert!(cells.contains(&CellCoord::new(0, 8)));
    assert!(matches!(
        GridRouteSolver.solve(&grid, config.spawn_cell, config.leak_cell),
        RouteSolution::Complete(_)
    ));
}

// ---- Route versions ----

#[test]
fn test_complete_solution_bumps_version() {
    let first = route_through(&five_corners());
    assert_eq!(first.version(), 1);
    assert_eq!(first.status(), RouteStatus::Complete);
    assert_eq!(first.len(), 5);

    let second = first.succeeded_by(RouteSolution::Complete(vec![Vec3::ZERO, Vec3::X]));
    assert_eq!(second.version(), 2);
    assert_eq!(second.len(), 2);
}

#[test]
fn test_incomplete_solution_keeps_last_corners() {
    let good = route_through(&five_corners());
    let failed = good.succeeded_by(RouteSolution::Incomplete);
    assert_eq!(failed.version(), good.version());
    assert_eq!(failed.corners(), good.corners());
    assert!(failed.is_blocked());

    let empty = Route::default().succeeded_by(RouteSolution::Incomplete);
    assert!(empty.is_empty());
    assert_eq!(empty.last_index(), None);
}

// ---- Debounce ----

#[test]
fn test_repeated_requests_fire_once() {
    let mut schedule = RecomputeSchedule::new(0.1);
    let mut fired = 0;
    for _ in 0..5 {
        schedule.request();
        if schedule.tick(DT) {
            fired += 1;
        }
    }
    assert_eq!(fired, 0, "each request should push the deadline back");

    for _ in 0..60 {
        if schedule.tick(DT) {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
    assert!(!schedule.is_pending());
}

#[test]
fn test_request_after_fire_schedules_again() {
    let mut schedule = RecomputeSchedule::new(0.1);
    schedule.request();
    assert!((0..10).any(|_| schedule.tick(DT)));
    assert!(!schedule.tick(DT));
    schedule.request();
    assert!(schedule.is_pending());
}

// ---- Ground movement ----

#[test]
fn test_ground_unit_holds_without_route() {
    let step = step_ground(Vec3::ZERO, ground_mover(22.0), &Route::default(), DT);
    assert_eq!(step.position, Vec3::ZERO);
    assert!(step.mover.current_corner.is_none());
    assert!(!step.arrived);
}

#[test]
fn test_spawn_leg_keeps_orientation() {
    let route = route_through(&five_corners());
    let step = step_ground(Vec3::new(0.0, 0.0, 5.0), ground_mover(22.0), &route, DT);
    assert_eq!(step.mover.corner_index, 0);
    assert_eq!(step.facing, None);
}

#[test]
fn test_ground_unit_turns_toward_each_new_corner() {
    let route = route_through(&five_corners());
    // Reaches corner 0 (its own position) on the first step.
    let step = step_ground(Vec3::ZERO, ground_mover(22.0), &route, DT);
    assert_eq!(step.mover.corner_index, 1);

    let step = step_ground(step.position, step.mover, &route, DT);
    assert_eq!(step.facing, Some(Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn test_ground_unit_leaks_at_final_corner() {
    let route = route_through(&five_corners());
    let (position, mover, arrived) = walk(Vec3::ZERO, ground_mover(22.0), &route, 600);
    assert!(arrived);
    assert_eq!(position, Vec3::new(20.0, 0.0, -20.0));
    assert_eq!(mover.corner_index, 4);
}

#[test]
fn test_movement_never_overshoots_a_corner() {
    let route = route_through(&five_corners());
    // Huge step: one corner per tick, never past it.
    let step = step_ground(Vec3::ZERO, ground_mover(22.0), &route, DT);
    let step = step_ground(step.position, step.mover, &route, 100.0);
    assert_eq!(step.position, Vec3::new(0.0, 0.0, -10.0));
    assert_eq!(step.mover.corner_index, 2);
}

#[test]
fn test_route_swap_at_index_two_continues_on_new_sequence() {
    let old = route_through(&five_corners());
    let mover = GroundMover {
        speed: 22.0,
        route_version: old.version(),
        corner_index: 2,
        current_corner: old.corner(2),
    };
    let start = Vec3::new(5.0, 0.0, -10.0);

    let new_corners = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(-10.0, 0.0, 0.0),
        Vec3::new(-10.0, 0.0, -30.0),
        Vec3::new(20.0, 0.0, -30.0),
        Vec3::new(20.0, 0.0, -20.0),
    ];
    let new = old.succeeded_by(RouteSolution::Complete(new_corners.clone()));

    // Finishes the leg it started, then re-reads index 2 of the new route.
    let mut position = start;
    let mut mover = mover;
    for _ in 0..60 {
        let step = step_ground(position, mover, &new, DT);
        position = step.position;
        mover = step.mover;
        assert!(!step.arrived);
        if mover.route_version == new.version() {
            break;
        }
    }
    assert_eq!(position, Vec3::new(10.0, 0.0, -10.0));
    assert_eq!(mover.corner_index, 2);
    assert_eq!(mover.current_corner, Some(new_corners[2]));

    let (position, mover, arrived) = walk(position, mover, &new, 2000);
    assert!(arrived);
    assert_eq!(position, new_corners[4]);
    assert_eq!(mover.corner_index, 4);
}

#[test]
fn test_route_swap_to_shorter_route_clamps_index() {
    let old = route_through(&five_corners());
    let mover = GroundMover {
        speed: 22.0,
        route_version: old.version(),
        corner_index: 4,
        current_corner: old.corner(4),
    };
    let new = old.succeeded_by(RouteSolution::Complete(vec![
        Vec3::ZERO,
        Vec3::new(30.0, 0.0, -30.0),
    ]));

    // Reaching the stale final corner is not a leak.
    let step = step_ground(Vec3::new(20.0, 0.0, -20.0), mover, &new, DT);
    assert!(!step.arrived);
    assert_eq!(step.mover.corner_index, 1);
    assert_eq!(step.mover.current_corner, new.corner(1));

    let (position, _, arrived) = walk(step.position, step.mover, &new, 600);
    assert!(arrived);
    assert_eq!(position, Vec3::new(30.0, 0.0, -30.0));
}

// ---- Flying movement ----

#[test]
fn test_flying_destination_keeps_altitude() {
    let route = route_through(&five_corners());
    assert_eq!(
        flying_destination(&route, 18.0),
        Some(Vec3::new(20.0, 18.0, -20.0))
    );
    assert_eq!(flying_destination(&Route::default(), 18.0), None);
}

#[test]
fn test_flying_unit_ignores_route_changes() {
    let route = route_through(&five_corners());
    let mover = FlyingMover {
        speed: 16.0,
        destination: None,
    };
    let start = Vec3::new(0.0, 18.0, 0.0);
    let step = step_flying(start, mover, &route, DT);
    let captured = step.mover.destination;
    assert_eq!(captured, Some(Vec3::new(20.0, 18.0, -20.0)));

    let changed = route.succeeded_by(RouteSolution::Complete(vec![Vec3::ZERO, Vec3::X]));
    let mut position = step.position;
    let mut mover = step.mover;
    let mut arrived = false;
    for _ in 0..600 {
        let step = step_flying(position, mover, &changed, DT);
        position = step.position;
        mover = step.mover;
        assert_eq!(position.y, 18.0);
        if step.arrived {
            arrived = true;
            break;
        }
    }
    assert!(arrived);
    assert_eq!(Some(position), captured);
}
