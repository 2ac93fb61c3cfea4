//! Game loops that drive the engine with the scripted player.
//!
//! `run_lockstep` ticks the engine on the calling thread and feeds commands
//! back between ticks, so a seed fully determines the run. `spawn_game_loop`
//! runs the engine on its own thread at wall-clock pace; commands arrive via
//! `mpsc` and every snapshot is sent back on a second channel.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};

use rampart_core::config::SimConfig;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::SimulationEngine;

use crate::autoplay::Autoplayer;
use crate::state::{GameLoopCommand, RunSummary};

/// Nominal duration of one tick at 1x speed.
fn tick_duration(config: &SimConfig) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(config.tick_rate))
}

/// Tick until the player is done, feeding its commands in between ticks.
pub fn run_lockstep(
    config: SimConfig,
    player: &mut Autoplayer,
    summary: &mut RunSummary,
    max_ticks: u64,
) -> anyhow::Result<()> {
    let mut engine = SimulationEngine::new(config);
    for _ in 0..max_ticks {
        let snapshot = engine.tick();
        summary.record(&snapshot);
        engine.queue_commands(player.observe(&snapshot));
        if player.finished() {
            return Ok(());
        }
    }
    bail!("run did not finish within {max_ticks} ticks");
}

/// Handle to a running game loop thread.
pub struct GameLoopHandle {
    commands: mpsc::Sender<GameLoopCommand>,
    snapshots: mpsc::Receiver<GameStateSnapshot>,
    thread: JoinHandle<()>,
}

impl GameLoopHandle {
    pub fn send(&self, command: GameLoopCommand) -> anyhow::Result<()> {
        self.commands
            .send(command)
            .context("game loop thread has stopped")
    }

    /// Blocks for the next snapshot. `None` once the loop has exited.
    pub fn next_snapshot(&self) -> Option<GameStateSnapshot> {
        self.snapshots.recv().ok()
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) -> anyhow::Result<()> {
        let _ = self.commands.send(GameLoopCommand::Shutdown);
        drop(self.snapshots);
        self.thread
            .join()
            .map_err(|_| anyhow::anyhow!("game loop thread panicked"))
    }
}

/// Spawns the game loop in a new thread, paced at `time_scale` times real time.
pub fn spawn_game_loop(config: SimConfig, time_scale: f64) -> anyhow::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (snap_tx, snap_rx) = mpsc::channel::<GameStateSnapshot>();

    let thread = std::thread::Builder::new()
        .name("rampart-game-loop".into())
        .spawn(move || run_game_loop(config, time_scale, cmd_rx, snap_tx))
        .context("failed to spawn game loop thread")?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        snapshots: snap_rx,
        thread,
    })
}

/// The game loop. Runs until Shutdown, or until either channel disconnects.
fn run_game_loop(
    config: SimConfig,
    time_scale: f64,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    snap_tx: mpsc::Sender<GameStateSnapshot>,
) {
    let nominal = tick_duration(&config);
    let effective = if time_scale > 0.001 {
        nominal.div_f64(time_scale)
    } else {
        nominal
    };
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        if snap_tx.send(engine.tick()).is_err() {
            return;
        }

        next_tick_time += effective;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective * 2 {
            // Too far behind; reset rather than spiral.
            next_tick_time = now;
        }
    }
}

/// Play on a paced game loop thread until the player is done.
pub fn run_realtime(
    config: SimConfig,
    time_scale: f64,
    player: &mut Autoplayer,
    summary: &mut RunSummary,
    max_ticks: u64,
) -> anyhow::Result<()> {
    let handle = spawn_game_loop(config, time_scale)?;
    let mut seen = 0u64;
    while let Some(snapshot) = handle.next_snapshot() {
        summary.record(&snapshot);
        for command in player.observe(&snapshot) {
            handle.send(GameLoopCommand::PlayerCommand(command))?;
        }
        seen += 1;
        if player.finished() {
            return handle.shutdown();
        }
        if seen >= max_ticks {
            handle.shutdown()?;
            bail!("run did not finish within {max_ticks} ticks");
        }
    }
    handle.shutdown()?;
    bail!("game loop exited before the run finished");
}
