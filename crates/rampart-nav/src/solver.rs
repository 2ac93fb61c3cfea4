//! Route solving from the spawn cell to the leak cell.

use std::collections::VecDeque;

use glam::Vec3;
use rampart_core::types::CellCoord;

use crate::grid::BuildGrid;

/// Outcome of one route computation.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteSolution {
    /// Ordered corner points, first at the start and last at the goal.
    Complete(Vec<Vec3>),
    /// No traversable path exists.
    Incomplete,
}

/// Anything that can turn a grid layout into a corner sequence.
pub trait RouteSolver {
    fn solve(&self, grid: &BuildGrid, start: CellCoord, goal: CellCoord) -> RouteSolution;
}

/// Four-connected breadth-first solver over the build grid.
///
/// Distances are seeded from the goal and the walk from the start keeps its
/// heading whenever a tie allows it, which keeps the corner count low.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridRouteSolver;

impl RouteSolver for GridRouteSolver {
    fn solve(&self, grid: &BuildGrid, start: CellCoord, goal: CellCoord) -> RouteSolution {
        match cell_path(grid, start, goal) {
            Some(cells) => RouteSolution::Complete(compress_corners(grid, &cells)),
            None => RouteSolution::Incomplete,
        }
    }
}

/// Shortest four-connected cell path from `start` to `goal`, inclusive.
pub fn cell_path(grid: &BuildGrid, start: CellCoord, goal: CellCoord) -> Option<Vec<CellCoord>> {
    if grid.is_blocked(start) || grid.is_blocked(goal) {
        return None;
    }

    let distances = distance_field(grid, goal);
    let distance_at = |cell: CellCoord| grid.index(cell).map_or(u32::MAX, |i| distances[i]);

    if distance_at(start) == u32::MAX {
        return None;
    }

    let mut path = vec![start];
    let mut current = start;
    let mut heading: Option<(i64, i64)> = None;

    while current != goal {
        let wanted = distance_at(current) - 1;
        let mut choice = None;
        for neighbor in grid.neighbors(current) {
            if distance_at(neighbor) != wanted {
                continue;
            }
            let step = direction(current, neighbor);
            if Some(step) == heading {
                choice = Some(neighbor);
                break;
            }
            if choice.is_none() {
                choice = Some(neighbor);
            }
        }
        let next = choice?;
        heading = Some(direction(current, next));
        path.push(next);
        current = next;
    }

    Some(path)
}

fn distance_field(grid: &BuildGrid, goal: CellCoord) -> Vec<u32> {
    let config = grid.config();
    let mut distances = vec![u32::MAX; config.columns as usize * config.rows as usize];
    let mut queue = VecDeque::new();

    if let Some(i) = grid.index(goal) {
        distances[i] = 0;
        queue.push_back(goal);
    }

    while let Some(cell) = queue.pop_front() {
        let Some(current_index) = grid.index(cell) else {
            continue;
        };
        let next_distance = distances[current_index] + 1;

        for neighbor in grid.neighbors(cell) {
            if grid.is_blocked(neighbor) {
                continue;
            }
            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };
            if distances[neighbor_index] <= next_distance {
                continue;
            }
            distances[neighbor_index] = next_distance;
            queue.push_back(neighbor);
        }
    }

    distances
}

fn direction(from: CellCoord, to: CellCoord) -> (i64, i64) {
    (
        i64::from(to.column) - i64::from(from.column),
        i64::from(to.row) - i64::from(from.row),
    )
}

/// Keeps the endpoints and every cell where the heading changes.
fn compress_corners(grid: &BuildGrid, cells: &[CellCoord]) -> Vec<Vec3> {
    let config = grid.config();
    let mut corners = Vec::new();

    for (i, cell) in cells.iter().enumerate() {
        let is_endpoint = i == 0 || i + 1 == cells.len();
        let turns = !is_endpoint
            && direction(cells[i - 1], *cell) != direction(*cell, cells[i + 1]);
        if is_endpoint || turns {
            corners.push(config.cell_center(*cell));
        }
    }

    corners
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::config::GridConfig;

    fn small_grid() -> BuildGrid {
        BuildGrid::new(GridConfig {
            origin_x: 0.0,
            origin_z: 0.0,
            cell_size: 10.0,
            columns: 3,
            rows: 4,
            spawn_cell: CellCoord::new(1, 3),
            leak_cell: CellCoord::new(1, 0),
            flying_altitude: 18.0,
        })
    }

    #[test]
    fn straight_corridor_has_two_corners() {
        let grid = small_grid();
        let solution = GridRouteSolver.solve(&grid, CellCoord::new(1, 3), CellCoord::new(1, 0));
        assert_eq!(
            solution,
            RouteSolution::Complete(vec![Vec3::new(10.0, 0.0, 30.0), Vec3::new(10.0, 0.0, 0.0)])
        );
    }

    #[test]
    fn wall_forces_a_detour() {
        let mut grid = small_grid();
        grid.set_blocked(CellCoord::new(1, 1), true);
        let cells = cell_path(&grid, CellCoord::new(1, 3), CellCoord::new(1, 0)).unwrap();
        assert_eq!(cells.len(), 6);
        assert!(!cells.contains(&CellCoord::new(1, 1)));

        let RouteSolution::Complete(corners) =
            GridRouteSolver.solve(&grid, CellCoord::new(1, 3), CellCoord::new(1, 0))
        else {
            panic!("expected a route");
        };
        assert_eq!(corners.first(), Some(&Vec3::new(10.0, 0.0, 30.0)));
        assert_eq!(corners.last(), Some(&Vec3::new(10.0, 0.0, 0.0)));
        assert!(corners.len() > 2);
    }

    #[test]
    fn sealed_goal_is_incomplete() {
        let mut grid = small_grid();
        for column in 0..3 {
            grid.set_blocked(CellCoord::new(column, 1), true);
        }
        assert_eq!(
            GridRouteSolver.solve(&grid, CellCoord::new(1, 3), CellCoord::new(1, 0)),
            RouteSolution::Incomplete
        );
    }

    #[test]
    fn start_equal_to_goal_is_a_single_corner() {
        let grid = small_grid();
        let solution = GridRouteSolver.solve(&grid, CellCoord::new(0, 0), CellCoord::new(0, 0));
        assert_eq!(solution, RouteSolution::Complete(vec![Vec3::ZERO]));
    }
}
