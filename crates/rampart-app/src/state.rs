//! Messages to the game loop thread and the tally of a finished run.

use serde::Serialize;

use rampart_core::commands::PlayerCommand;
use rampart_core::enums::GamePhase;
use rampart_core::events::SimEvent;
use rampart_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Outcome of a run, printed as JSON when the runner exits.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub levels_completed: u32,
    pub final_level: u32,
    pub final_phase: GamePhase,
    pub gold: u32,
    pub lives: u32,
    pub kills: u32,
    pub leaks: u32,
    pub shots_fired: u32,
    pub towers_built: u32,
    pub route_recomputes: u32,
    pub commands_rejected: u32,
    pub ticks: u64,
}

impl RunSummary {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Fold one snapshot into the tally.
    pub fn record(&mut self, snapshot: &GameStateSnapshot) {
        for event in &snapshot.events {
            match event {
                SimEvent::LevelComplete { level } => {
                    self.levels_completed += 1;
                    tracing::info!(level, lives = snapshot.lives, gold = snapshot.gold, "level complete");
                }
                SimEvent::GameLost { level } => {
                    tracing::info!(level, "game lost");
                }
                SimEvent::RouteRecomputed { .. } => self.route_recomputes += 1,
                SimEvent::CommandRejected { .. } => self.commands_rejected += 1,
                _ => {}
            }
        }
        self.final_level = snapshot.level;
        self.final_phase = snapshot.phase;
        self.gold = snapshot.gold;
        self.lives = snapshot.lives;
        self.kills = snapshot.score.kills;
        self.leaks = snapshot.score.leaks;
        self.shots_fired = snapshot.score.shots_fired;
        self.ticks = snapshot.time.tick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_events_and_keeps_latest_totals() {
        let mut summary = RunSummary::new(9);
        let mut snap = GameStateSnapshot {
            level: 2,
            gold: 30,
            lives: 35,
            ..Default::default()
        };
        snap.events = vec![
            SimEvent::LevelComplete { level: 1 },
            SimEvent::RouteRecomputed {
                version: 3,
                complete: true,
            },
        ];
        summary.record(&snap);

        snap.events.clear();
        snap.gold = 12;
        summary.record(&snap);

        assert_eq!(summary.seed, 9);
        assert_eq!(summary.levels_completed, 1);
        assert_eq!(summary.route_recomputes, 1);
        assert_eq!(summary.gold, 12);
        assert_eq!(summary.final_level, 2);
    }
}
