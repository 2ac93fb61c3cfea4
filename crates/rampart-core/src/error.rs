//! Error types for rejected commands and bad configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CellCoord;

/// Why a player command was refused. None of these are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandError {
    #[error("towers can only be built or sold between levels")]
    NotInBuildMode,
    #[error("cell {cell:?} is outside the build grid")]
    CellOutOfBounds { cell: CellCoord },
    #[error("cell {cell:?} is the spawn or leak point")]
    CellReserved { cell: CellCoord },
    #[error("cell {cell:?} already holds a tower")]
    CellOccupied { cell: CellCoord },
    #[error("need {cost} gold, have {gold}")]
    InsufficientGold { cost: u32, gold: u32 },
    #[error("no tower at cell {cell:?}")]
    NoTowerAt { cell: CellCoord },
    #[error("no route from spawn to leak point")]
    RouteBlocked,
    #[error("the game is over")]
    GameOver,
}

/// Configuration that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
