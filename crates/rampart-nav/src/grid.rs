//! Occupancy of the build grid.

use rampart_core::config::GridConfig;
use rampart_core::types::CellCoord;

/// Dense row-major record of which cells hold a tower.
#[derive(Debug, Clone)]
pub struct BuildGrid {
    config: GridConfig,
    blocked: Vec<bool>,
}

impl BuildGrid {
    pub fn new(config: GridConfig) -> Self {
        let cells = config.columns as usize * config.rows as usize;
        Self {
            config,
            blocked: vec![false; cells],
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        self.config.contains(cell)
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, cell: CellCoord) -> bool {
        self.index(cell).map_or(true, |i| self.blocked[i])
    }

    /// Marks a cell. Returns false if the cell lies outside the grid.
    pub fn set_blocked(&mut self, cell: CellCoord, blocked: bool) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.blocked[i] = blocked;
                true
            }
            None => false,
        }
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    pub(crate) fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(cell.row as usize * self.config.columns as usize + cell.column as usize)
    }

    /// In-bounds orthogonal neighbours in N, E, S, W order.
    pub(crate) fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        let CellCoord { column, row } = cell;
        let candidates = [
            row.checked_add(1).map(|r| CellCoord::new(column, r)),
            column.checked_add(1).map(|c| CellCoord::new(c, row)),
            row.checked_sub(1).map(|r| CellCoord::new(column, r)),
            column.checked_sub(1).map(|c| CellCoord::new(c, row)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |c| self.contains(*c))
    }
}
