//! Gold, lives and running score.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities.

use rampart_core::config::EconomyConfig;
use rampart_core::error::CommandError;

/// The player's purse and remaining lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ledger {
    pub gold: u32,
    pub lives: u32,
}

impl Ledger {
    pub fn new(economy: &EconomyConfig) -> Self {
        Self {
            gold: economy.starting_gold,
            lives: economy.starting_lives,
        }
    }

    /// Deducts `cost`, or refuses without touching the balance.
    pub fn spend(&mut self, cost: u32) -> Result<(), CommandError> {
        if self.gold < cost {
            return Err(CommandError::InsufficientGold {
                cost,
                gold: self.gold,
            });
        }
        self.gold -= cost;
        Ok(())
    }

    pub fn credit(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// One unit got through. Lives never go below zero.
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }
}

/// Running score state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub kills: u32,
    pub leaks: u32,
    pub shots_fired: u32,
}
