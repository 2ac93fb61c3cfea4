//! Projectile flight and impact resolution.

use glam::Vec3;
use hecs::{Entity, World};

use rampart_core::components::{
    explosion_damage, ArcFlight, DamageOutcome, Hostile, Projectile, SeekOffset, Vitals,
};
use rampart_core::curve::ArcCurve;
use rampart_core::enums::{EnemyKind, ProjectileKind};
use rampart_core::events::SimEvent;
use rampart_core::types::{flatten, move_towards, Facing, Position};

use crate::ledger::ScoreState;
use crate::links::{live_position, SeekingFlight};
use crate::systems::damage;

/// Advance every projectile by `dt` and resolve arrivals. Spent projectiles
/// are queued in `despawn_buffer`.
pub fn run(
    world: &mut World,
    curve: &ArcCurve,
    now_secs: f32,
    dt: f32,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
    despawn_buffer: &mut Vec<Entity>,
) {
    advance_seeking(world, dt, events, score, despawn_buffer);
    advance_arcing(world, curve, now_secs, dt, events, score, despawn_buffer);
}

/// Point a seeking projectile steers at for `target`, if it is still alive.
fn seek_point(world: &World, target: Entity) -> Option<Vec3> {
    let position = live_position(world, target)?;
    let offset = world
        .get::<&SeekOffset>(target)
        .map(|offset| offset.0)
        .unwrap_or(Vec3::ZERO);
    Some(position + offset)
}

fn advance_seeking(
    world: &mut World,
    dt: f32,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut arrivals: Vec<(Entity, Option<Entity>, f32, Vec3)> = Vec::new();
    {
        let world: &World = world;
        let mut query =
            world.query::<(&Projectile, &mut Position, &mut Facing, &mut SeekingFlight)>();
        for (entity, (projectile, position, facing, flight)) in query.iter() {
            if let Some(target) = flight.target {
                match seek_point(world, target) {
                    Some(point) => flight.aim_point = point,
                    None => flight.target = None,
                }
            }

            if let Some(direction) = (flight.aim_point - position.0).try_normalize() {
                facing.0 = direction;
            }
            position.0 = move_towards(position.0, flight.aim_point, projectile.speed * dt);

            if position.0 == flight.aim_point {
                arrivals.push((entity, flight.target, projectile.damage, position.0));
            }
        }
    }

    for (entity, target, amount, position) in arrivals {
        let hits = match target {
            Some(target) => u32::from(
                damage::apply(world, target, amount, events, score) != DamageOutcome::Ignored,
            ),
            None => 0,
        };
        events.push(SimEvent::ProjectileImpact {
            kind: ProjectileKind::Seeking,
            position,
            hits,
        });
        despawn_buffer.push(entity);
    }
}

/// An arcing shell that reached the ground this step.
struct Detonation {
    entity: Entity,
    position: Vec3,
    damage: f32,
    radius: f32,
    hits_flying: bool,
}

fn advance_arcing(
    world: &mut World,
    curve: &ArcCurve,
    now_secs: f32,
    dt: f32,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut detonations = Vec::new();
    for (entity, (projectile, position, flight)) in
        world.query_mut::<(&Projectile, &mut Position, &ArcFlight)>()
    {
        let mut next = move_towards(flatten(position.0), flight.destination, projectile.speed * dt);
        let t = curve.evaluate(flight.fraction_travelled(now_secs, projectile.speed));
        // Unclamped, so curve values below zero lift the shell above its launch height.
        next.y = flight.initial.y + (flight.destination.y - flight.initial.y) * t;
        position.0 = next;

        if next == flight.destination {
            detonations.push(Detonation {
                entity,
                position: next,
                damage: projectile.damage,
                radius: flight.explosion_radius,
                hits_flying: flight.hits_flying,
            });
        }
    }

    for detonation in detonations {
        let hits = explode(world, &detonation, events, score);
        tracing::trace!(position = ?detonation.position, hits, "shell exploded");
        events.push(SimEvent::ProjectileImpact {
            kind: ProjectileKind::Arcing,
            position: detonation.position,
            hits,
        });
        despawn_buffer.push(detonation.entity);
    }
}

/// Damage every live unit inside the blast and count those that took damage. Victims and their distances are
/// captured before any damage lands, and each is hit once.
fn explode(
    world: &mut World,
    detonation: &Detonation,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) -> u32 {
    let mut victims: Vec<(u32, Entity, f32)> = world
        .query::<(&Hostile, &Vitals, &Position)>()
        .iter()
        .filter(|(_, (hostile, vitals, _))| {
            vitals.alive && (detonation.hits_flying || hostile.kind == EnemyKind::Ground)
        })
        .map(|(entity, (hostile, _, position))| {
            (hostile.serial, entity, detonation.position.distance(position.0))
        })
        .filter(|(_, _, distance)| *distance <= detonation.radius)
        .collect();
    victims.sort_by_key(|(serial, _, _)| *serial);

    let mut hits = 0;
    for (_, entity, distance) in victims {
        let amount = explosion_damage(detonation.damage, distance, detonation.radius);
        if damage::apply(world, entity, amount, events, score) != DamageOutcome::Ignored {
            hits += 1;
        }
    }
    hits
}
