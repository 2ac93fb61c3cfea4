//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::GamePhase;
use rampart_core::events::SimEvent;
use rampart_core::state::*;
use rampart_core::types::{Facing, Position, SimTime};

use crate::ledger::{Ledger, ScoreState};
use crate::links::FiringTower;
use crate::systems::route::RouteState;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    level: u32,
    ledger: &Ledger,
    route: &RouteState,
    events: Vec<SimEvent>,
    score: &ScoreState,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        level,
        gold: ledger.gold,
        lives: ledger.lives,
        build_locked: route.build_locked,
        route: RouteView {
            version: route.route.version(),
            status: route.route.status(),
            corners: route.route.corners().to_vec(),
        },
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        events,
        score: ScoreView {
            kills: score.kills,
            leaks: score.leaks,
            shots_fired: score.shots_fired,
        },
    }
}

/// Living units in spawn order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Hostile, &Vitals, &Position, &Facing)>()
        .iter()
        .filter(|(_, (_, vitals, _, _))| vitals.alive)
        .map(|(_, (hostile, vitals, position, facing))| EnemyView {
            serial: hostile.serial,
            kind: hostile.kind,
            position: position.0,
            facing: facing.0,
            health: vitals.health,
            max_health: vitals.max_health,
        })
        .collect();

    enemies.sort_by_key(|e| e.serial);
    enemies
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position, Option<&FiringTower>)>()
        .iter()
        .map(|(_, (tower, position, firing))| TowerView {
            kind: tower.kind,
            cell: tower.cell,
            position: position.0,
            aim: firing.map(|f| f.aim).unwrap_or_default(),
            target: firing
                .and_then(|f| f.target)
                .and_then(|target| world.get::<&Hostile>(target).ok().map(|h| h.serial)),
            refund: tower.refund(),
        })
        .collect();

    towers.sort_by_key(|t| t.cell);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u32, ProjectileView)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (projectile, position))| {
            (
                entity.id(),
                ProjectileView {
                    kind: projectile.kind,
                    position: position.0,
                },
            )
        })
        .collect();

    projectiles.sort_by_key(|(id, _)| *id);
    projectiles.into_iter().map(|(_, view)| view).collect()
}
