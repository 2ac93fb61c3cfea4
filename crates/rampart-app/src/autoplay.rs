//! Scripted player that drives the engine from its snapshots.
//!
//! Each build phase it places a few towers on random free cells, waits for
//! the route to be recomputed, sells its newest blocking tower while the
//! route is cut, and then starts the level. The RNG is seeded, so a lockstep
//! run is reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::PlayerCommand;
use rampart_core::config::SimConfig;
use rampart_core::enums::{GamePhase, TowerKind};
use rampart_core::events::SimEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::CellCoord;

/// Relative odds of each tower kind being picked.
const TOWER_WEIGHTS: [(TowerKind, u32); 4] = [
    (TowerKind::Arrow, 4),
    (TowerKind::Cannon, 2),
    (TowerKind::HotPlate, 1),
    (TowerKind::Barricade, 3),
];

/// Random draws per build phase before giving up on spending more.
const PLACEMENT_ATTEMPTS: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Waiting for a build phase to place towers in.
    Planning,
    /// Builds or a sale were issued; waiting for the recomputed route.
    AwaitingRoute,
    /// `StartLevel` was issued.
    Launching,
    Done,
}

pub struct Autoplayer {
    rng: ChaCha8Rng,
    config: SimConfig,
    target_levels: u32,
    builds_per_level: u32,
    stage: Stage,
    placed: Vec<(TowerKind, CellCoord)>,
    towers_built: u32,
}

impl Autoplayer {
    pub fn new(config: SimConfig, seed: u64, target_levels: u32, builds_per_level: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            target_levels,
            builds_per_level,
            stage: Stage::Planning,
            placed: Vec::new(),
            towers_built: 0,
        }
    }

    /// True once the target level count is reached or the game is lost.
    pub fn finished(&self) -> bool {
        self.stage == Stage::Done
    }

    pub fn towers_built(&self) -> u32 {
        self.towers_built
    }

    /// React to one snapshot. Returns the commands to queue next.
    pub fn observe(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::Lost => {
                self.stage = Stage::Done;
                return Vec::new();
            }
            GamePhase::Play => {
                self.stage = Stage::Planning;
                return Vec::new();
            }
            GamePhase::Build => {}
        }
        if snapshot.level > self.target_levels {
            self.stage = Stage::Done;
        }

        match self.stage {
            Stage::Done => Vec::new(),
            Stage::Planning => {
                let builds = self.plan_builds(snapshot);
                if builds.is_empty() {
                    self.stage = Stage::Launching;
                    return vec![PlayerCommand::StartLevel];
                }
                self.stage = Stage::AwaitingRoute;
                builds
            }
            Stage::AwaitingRoute => {
                let recomputed = snapshot
                    .events
                    .iter()
                    .any(|e| matches!(e, SimEvent::RouteRecomputed { .. }));
                if !recomputed {
                    return Vec::new();
                }
                if snapshot.build_locked {
                    return self.unblock();
                }
                self.stage = Stage::Launching;
                vec![PlayerCommand::StartLevel]
            }
            Stage::Launching => {
                let rejected = snapshot
                    .events
                    .iter()
                    .any(|e| matches!(e, SimEvent::CommandRejected { .. }));
                if rejected {
                    tracing::debug!(level = snapshot.level, "start refused, replanning");
                    self.stage = Stage::Planning;
                }
                Vec::new()
            }
        }
    }

    /// Sell the most recently placed tower that blocks the route.
    fn unblock(&mut self) -> Vec<PlayerCommand> {
        let newest = self
            .placed
            .iter()
            .rposition(|(kind, _)| self.config.towers.stats(*kind).blocks_route());
        match newest {
            Some(index) => {
                let (kind, cell) = self.placed.remove(index);
                tracing::debug!(?kind, ?cell, "selling tower that cut the route");
                vec![PlayerCommand::SellTower { cell }]
            }
            None => {
                tracing::warn!("route is cut and no placed tower can be sold");
                self.stage = Stage::Done;
                Vec::new()
            }
        }
    }

    fn plan_builds(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let grid = self.config.grid;
        let mut taken: Vec<CellCoord> = snapshot.towers.iter().map(|t| t.cell).collect();
        let mut gold = snapshot.gold;
        let mut commands = Vec::new();

        for _ in 0..PLACEMENT_ATTEMPTS {
            if commands.len() >= self.builds_per_level as usize {
                break;
            }
            let kind = self.pick_kind();
            let cost = self.config.towers.stats(kind).cost;
            if cost > gold {
                continue;
            }
            let cell = CellCoord::new(
                self.rng.gen_range(0..grid.columns),
                self.rng.gen_range(0..grid.rows),
            );
            if grid.is_reserved(cell) || taken.contains(&cell) {
                continue;
            }
            gold -= cost;
            taken.push(cell);
            self.placed.push((kind, cell));
            self.towers_built += 1;
            commands.push(PlayerCommand::BuildTower { kind, cell });
        }

        tracing::debug!(
            level = snapshot.level,
            builds = commands.len(),
            gold_left = gold,
            "build phase planned"
        );
        commands
    }

    fn pick_kind(&mut self) -> TowerKind {
        let total: u32 = TOWER_WEIGHTS.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.gen_range(0..total);
        for (kind, weight) in TOWER_WEIGHTS {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        TowerKind::Arrow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_snapshot(gold: u32) -> GameStateSnapshot {
        GameStateSnapshot {
            phase: GamePhase::Build,
            level: 1,
            gold,
            lives: 40,
            ..Default::default()
        }
    }

    fn builds(commands: &[PlayerCommand]) -> Vec<(TowerKind, CellCoord)> {
        commands
            .iter()
            .filter_map(|c| match *c {
                PlayerCommand::BuildTower { kind, cell } => Some((kind, cell)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_same_seed_same_plan() {
        let config = SimConfig::default();
        let mut a = Autoplayer::new(config.clone(), 7, 3, 4);
        let mut b = Autoplayer::new(config, 7, 3, 4);
        let snap = build_snapshot(50);
        assert_eq!(a.observe(&snap), b.observe(&snap));
    }

    #[test]
    fn test_plan_stays_within_gold_and_free_cells() {
        let config = SimConfig::default();
        let mut player = Autoplayer::new(config.clone(), 11, 3, 10);
        let commands = player.observe(&build_snapshot(20));
        let placed = builds(&commands);

        let spent: u32 = placed
            .iter()
            .map(|(kind, _)| config.towers.stats(*kind).cost)
            .sum();
        assert!(spent <= 20);
        for (_, cell) in &placed {
            assert!(config.grid.contains(*cell));
            assert!(!config.grid.is_reserved(*cell));
        }
        let mut cells: Vec<_> = placed.iter().map(|(_, c)| *c).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), placed.len());
    }

    #[test]
    fn test_no_gold_starts_level_immediately() {
        let mut player = Autoplayer::new(SimConfig::default(), 1, 3, 4);
        let commands = player.observe(&build_snapshot(0));
        assert_eq!(commands, vec![PlayerCommand::StartLevel]);
    }

    #[test]
    fn test_waits_for_route_then_starts() {
        let mut player = Autoplayer::new(SimConfig::default(), 3, 3, 2);
        let first = player.observe(&build_snapshot(50));
        assert!(!first.is_empty());

        assert!(player.observe(&build_snapshot(40)).is_empty());

        let mut settled = build_snapshot(40);
        settled.events = vec![SimEvent::RouteRecomputed {
            version: 2,
            complete: true,
        }];
        assert_eq!(player.observe(&settled), vec![PlayerCommand::StartLevel]);
    }

    #[test]
    fn test_sells_newest_blocking_tower_when_route_cut() {
        let mut config = SimConfig::default();
        config.economy.starting_gold = 0;
        let mut player = Autoplayer::new(config, 5, 3, 1);
        player.placed = vec![
            (TowerKind::Barricade, CellCoord::new(1, 8)),
            (TowerKind::HotPlate, CellCoord::new(2, 8)),
        ];
        player.stage = Stage::AwaitingRoute;

        let mut locked = build_snapshot(10);
        locked.build_locked = true;
        locked.events = vec![SimEvent::RouteRecomputed {
            version: 1,
            complete: false,
        }];
        assert_eq!(
            player.observe(&locked),
            vec![PlayerCommand::SellTower {
                cell: CellCoord::new(1, 8)
            }]
        );
        assert_eq!(player.placed.len(), 1);
    }

    #[test]
    fn test_finishes_after_target_levels_or_loss() {
        let mut player = Autoplayer::new(SimConfig::default(), 0, 2, 4);
        let mut snap = build_snapshot(50);
        snap.level = 3;
        assert!(player.observe(&snap).is_empty());
        assert!(player.finished());

        let mut player = Autoplayer::new(SimConfig::default(), 0, 2, 4);
        snap.level = 1;
        snap.phase = GamePhase::Lost;
        player.observe(&snap);
        assert!(player.finished());
    }
}
