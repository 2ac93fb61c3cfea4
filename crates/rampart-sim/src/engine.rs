//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::{BTreeMap, VecDeque};

use hecs::{Entity, World};

use rampart_core::commands::PlayerCommand;
use rampart_core::components::Tower;
use rampart_core::config::SimConfig;
use rampart_core::enums::{GamePhase, TowerKind};
use rampart_core::error::CommandError;
use rampart_core::events::SimEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::{CellCoord, SimTime};
use rampart_nav::grid::BuildGrid;
use rampart_nav::route::Route;
use rampart_nav::solver::{GridRouteSolver, RouteSolver};

use crate::ledger::{Ledger, ScoreState};
use crate::systems;
use crate::systems::route::RouteState;
use crate::systems::wave_spawner::WaveState;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    level: u32,
    ledger: Ledger,
    grid: BuildGrid,
    towers: BTreeMap<CellCoord, Entity>,
    route: RouteState,
    solver: Box<dyn RouteSolver + Send>,
    waves: WaveState,
    next_serial: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create an engine on the grid solver. The first route computation is
    /// scheduled immediately.
    pub fn new(config: SimConfig) -> Self {
        Self::with_solver(config, Box::new(GridRouteSolver))
    }

    /// Create an engine with a custom route solver.
    pub fn with_solver(config: SimConfig, solver: Box<dyn RouteSolver + Send>) -> Self {
        let mut route = RouteState::new(config.route.recompute_delay_secs);
        route.schedule.request();

        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::Build,
            level: 1,
            ledger: Ledger::new(&config.economy),
            grid: BuildGrid::new(config.grid),
            towers: BTreeMap::new(),
            route,
            solver,
            waves: WaveState::default(),
            next_serial: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
            config,
        }
    }

    /// Queue a player command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a command right away.
    ///
    /// A rejection leaves the game untouched; it is logged and reported as a
    /// `CommandRejected` event in the next snapshot.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        let result = match command {
            PlayerCommand::BuildTower { kind, cell } => self.build_tower(kind, cell),
            PlayerCommand::SellTower { cell } => self.sell_tower(cell),
            PlayerCommand::StartLevel => self.start_level(),
        };
        if let Err(reason) = result {
            tracing::warn!(?command, %reason, "command rejected");
            self.events.push(SimEvent::CommandRejected { reason });
        }
        result
    }

    /// Advance one fixed step at the configured tick rate.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.step(self.config.dt())
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn step(&mut self, dt: f32) -> GameStateSnapshot {
        self.process_commands();

        if self.phase != GamePhase::Lost {
            self.run_systems(dt);
            self.time.advance(dt);
            self.check_level_end();
        }

        self.snapshot()
    }

    /// Snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.level,
            &self.ledger,
            &self.route,
            events,
            &self.score,
        )
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn ledger(&self) -> Ledger {
        self.ledger
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// The route ground units currently follow.
    pub fn route(&self) -> &Route {
        &self.route.route
    }

    /// Raised while the latest route computation found no path.
    pub fn build_locked(&self) -> bool {
        self.route.build_locked
    }

    pub fn route_recompute_pending(&self) -> bool {
        self.route.schedule.is_pending()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tower_at(&self, cell: CellCoord) -> Option<Entity> {
        self.towers.get(&cell).copied()
    }

    /// Gold a sale at `cell` would return, if a tower stands there.
    pub fn refund_for(&self, cell: CellCoord) -> Option<u32> {
        let entity = self.tower_at(cell)?;
        let tower = self.world.get::<&Tower>(entity).ok()?;
        Some(tower.refund())
    }

    /// Whether a tower of `kind` could be built at `cell` right now.
    pub fn can_build(&self, kind: TowerKind, cell: CellCoord) -> Result<(), CommandError> {
        self.ensure_build_mode()?;
        let grid = &self.config.grid;
        if !grid.contains(cell) {
            return Err(CommandError::CellOutOfBounds { cell });
        }
        if grid.is_reserved(cell) {
            return Err(CommandError::CellReserved { cell });
        }
        if self.towers.contains_key(&cell) {
            return Err(CommandError::CellOccupied { cell });
        }
        let cost = self.config.towers.stats(kind).cost;
        if self.ledger.gold < cost {
            return Err(CommandError::InsufficientGold {
                cost,
                gold: self.ledger.gold,
            });
        }
        Ok(())
    }

    /// Spawn a unit of `kind` at an arbitrary position (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_enemy(
        &mut self,
        kind: rampart_core::enums::EnemyKind,
        position: glam::Vec3,
    ) -> Entity {
        let serial = self.next_serial;
        self.next_serial += 1;
        let entity = world_setup::spawn_enemy(
            &mut self.world,
            &self.config,
            kind,
            self.level,
            serial,
            &self.route.route,
        );
        if let Ok(mut p) = self.world.get::<&mut rampart_core::types::Position>(entity) {
            p.0 = position;
        }
        entity
    }

    /// Swap in a route directly, as a finished recomputation would (for tests).
    #[cfg(test)]
    pub(crate) fn replace_route(&mut self, corners: Vec<glam::Vec3>) {
        self.route.route = self
            .route
            .route
            .succeeded_by(rampart_nav::solver::RouteSolution::Complete(corners));
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            let _ = self.apply_command(command);
        }
    }

    fn ensure_build_mode(&self) -> Result<(), CommandError> {
        match self.phase {
            GamePhase::Build => Ok(()),
            GamePhase::Play => Err(CommandError::NotInBuildMode),
            GamePhase::Lost => Err(CommandError::GameOver),
        }
    }

    fn build_tower(&mut self, kind: TowerKind, cell: CellCoord) -> Result<(), CommandError> {
        self.can_build(kind, cell)?;
        let stats = *self.config.towers.stats(kind);
        self.ledger.spend(stats.cost)?;

        let entity = world_setup::spawn_tower(&mut self.world, &self.config, kind, cell);
        self.towers.insert(cell, entity);
        if stats.blocks_route() {
            self.grid.set_blocked(cell, true);
        }
        self.route.schedule.request();

        tracing::debug!(?kind, ?cell, cost = stats.cost, gold = self.ledger.gold, "tower built");
        self.events.push(SimEvent::TowerBuilt {
            kind,
            cell,
            cost: stats.cost,
        });
        Ok(())
    }

    fn sell_tower(&mut self, cell: CellCoord) -> Result<(), CommandError> {
        self.ensure_build_mode()?;
        let entity = self
            .towers
            .get(&cell)
            .copied()
            .ok_or(CommandError::NoTowerAt { cell })?;
        let tower = self
            .world
            .get::<&Tower>(entity)
            .map(|tower| *tower)
            .map_err(|_| CommandError::NoTowerAt { cell })?;

        let refund = tower.refund();
        self.ledger.credit(refund);
        self.towers.remove(&cell);
        let _ = self.world.despawn(entity);
        self.grid.set_blocked(cell, false);
        self.route.schedule.request();

        tracing::debug!(kind = ?tower.kind, ?cell, refund, gold = self.ledger.gold, "tower sold");
        self.events.push(SimEvent::TowerSold {
            kind: tower.kind,
            cell,
            refund,
        });
        Ok(())
    }

    fn start_level(&mut self) -> Result<(), CommandError> {
        self.ensure_build_mode()?;
        if self.route.build_locked {
            return Err(CommandError::RouteBlocked);
        }

        self.phase = GamePhase::Play;
        self.waves.start(&self.config, self.time.elapsed_secs);
        tracing::info!(level = self.level, "level started");
        self.events.push(SimEvent::LevelStarted { level: self.level });
        Ok(())
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let now = self.time.elapsed_secs;

        // 1. Deferred route recomputation
        systems::route::run(
            &mut self.route,
            &self.grid,
            self.solver.as_ref(),
            dt,
            &mut self.events,
        );
        // 2. Wave spawning
        if self.phase == GamePhase::Play {
            systems::wave_spawner::run(
                &mut self.world,
                &self.config,
                &mut self.waves,
                self.level,
                &self.route.route,
                &mut self.next_serial,
                now,
                &mut self.events,
            );
        }
        // 3. Sensor membership
        systems::sensor::run(&mut self.world);
        // 4. Firing towers
        systems::fire_control::run(&mut self.world, now, &mut self.events, &mut self.score);
        // 5. Hot plates
        systems::hot_plate::run(&mut self.world, dt, &mut self.events, &mut self.score);
        // 6. Projectiles
        systems::projectile::run(
            &mut self.world,
            &self.config.arc_curve,
            now,
            dt,
            &mut self.events,
            &mut self.score,
            &mut self.despawn_buffer,
        );
        // 7. Unit movement and leaks
        systems::movement::run(
            &mut self.world,
            &self.route.route,
            dt,
            &mut self.ledger,
            &mut self.events,
            &mut self.score,
        );
        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Close the level once every unit has spawned and none remain.
    fn check_level_end(&mut self) {
        if self.phase != GamePhase::Play
            || !self.waves.finished(&self.config)
            || systems::cleanup::hostile_count(&self.world) > 0
        {
            return;
        }

        self.waves.reset();
        if self.ledger.lives > 0 {
            tracing::info!(level = self.level, lives = self.ledger.lives, "level complete");
            self.events.push(SimEvent::LevelComplete { level: self.level });
            self.phase = GamePhase::Build;
            self.level += 1;
            self.ledger.credit(self.config.economy.gold_reward_per_level);
        } else {
            tracing::info!(level = self.level, "game lost");
            self.events.push(SimEvent::GameLost { level: self.level });
            self.phase = GamePhase::Lost;
        }
    }
}
