//! Player commands sent from the build surface to the simulation.
//!
//! Commands are queued and applied at the next step boundary.

use serde::{Deserialize, Serialize};

use crate::enums::TowerKind;
use crate::types::CellCoord;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Build a tower on an empty cell.
    BuildTower { kind: TowerKind, cell: CellCoord },
    /// Sell the tower on a cell for a partial refund.
    SellTower { cell: CellCoord },
    /// Leave build mode and start spawning the current level.
    StartLevel,
}
