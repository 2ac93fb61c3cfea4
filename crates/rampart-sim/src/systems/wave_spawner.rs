//! Wave spawning system: releases a level's units on a fixed cadence.

use hecs::World;

use rampart_core::config::SimConfig;
use rampart_core::events::SimEvent;
use rampart_nav::route::Route;

use crate::world_setup;

/// Spawn progress for the level in play.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    pub spawned: u32,
    /// Due time of the next spawn; `None` when nothing more is scheduled.
    pub next_spawn_secs: Option<f32>,
}

impl WaveState {
    /// Begin a level: first unit after the initial delay.
    pub fn start(&mut self, config: &SimConfig, now_secs: f32) {
        self.spawned = 0;
        self.next_spawn_secs = (config.waves.enemies_per_level > 0)
            .then(|| now_secs + config.waves.first_spawn_delay_secs);
    }

    /// Every unit of the level has been released.
    pub fn finished(&self, config: &SimConfig) -> bool {
        self.spawned >= config.waves.enemies_per_level
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Spawn every unit that has come due by `now_secs`.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    config: &SimConfig,
    state: &mut WaveState,
    level: u32,
    route: &Route,
    next_serial: &mut u32,
    now_secs: f32,
    events: &mut Vec<SimEvent>,
) {
    let kind = config.waves.enemy_kind_for_level(level);

    while let Some(due) = state.next_spawn_secs {
        if now_secs < due {
            break;
        }

        let serial = *next_serial;
        *next_serial += 1;
        world_setup::spawn_enemy(world, config, kind, level, serial, route);
        events.push(SimEvent::EnemySpawned { serial, kind });

        state.spawned += 1;
        state.next_spawn_secs = if state.finished(config) {
            None
        } else {
            Some(due + config.waves.spawn_interval_secs)
        };
    }
}
