use crate::commands::PlayerCommand;
use crate::components::{explosion_damage, ArcFlight, DamageOutcome, Tower, Vitals};
use crate::config::{SimConfig, TowerAttack};
use crate::enums::*;
use crate::error::{CommandError, ConfigError};
use crate::events::SimEvent;
use crate::state::GameStateSnapshot;
use crate::types::CellCoord;
use glam::Vec3;

// ---- Vitals ----

#[test]
fn test_spawn_health_scales_with_level() {
    let v = Vitals::at_level(20.0, 3.0, 1);
    assert_eq!(v.max_health, 20.0);
    assert_eq!(v.health, 20.0);
    assert!(v.alive);

    let v = Vitals::at_level(20.0, 3.0, 5);
    assert_eq!(v.max_health, 32.0);
    assert_eq!(v.health, 32.0);
}

#[test]
fn test_non_positive_damage_is_ignored() {
    for amount in [0.0, -1.0, -0.0001, f32::NAN] {
        let mut v = Vitals::at_level(10.0, 0.0, 1);
        assert_eq!(v.apply_damage(amount), DamageOutcome::Ignored);
        assert_eq!(v.health, 10.0);
        assert!(v.alive);
    }
}

#[test]
fn test_damage_floors_at_zero_and_kills_once() {
    let mut v = Vitals::at_level(10.0, 0.0, 1);
    assert_eq!(v.apply_damage(4.0), DamageOutcome::Wounded);
    assert_eq!(v.health, 6.0);

    assert_eq!(v.apply_damage(100.0), DamageOutcome::Killed);
    assert_eq!(v.health, 0.0);
    assert!(!v.alive);

    // Further hits on a dead unit change nothing observable.
    assert_eq!(v.apply_damage(5.0), DamageOutcome::Ignored);
    assert_eq!(v.health, 0.0);
    assert!(!v.alive);
}

#[test]
fn test_damage_after_retire_is_ignored() {
    let mut v = Vitals::at_level(20.0, 0.0, 1);
    assert!(v.retire());
    assert_eq!(v.apply_damage(5.0), DamageOutcome::Ignored);
    assert_eq!(v.health, 20.0);
    assert!(!v.alive);
}

#[test]
fn test_damage_arithmetic_matches_max_formula() {
    let amounts = [0.5, 1.0, 3.25, 7.0, 9.999, 10.0, 12.0];
    for a in amounts {
        let mut v = Vitals::at_level(10.0, 0.0, 1);
        let before = v.health;
        let outcome = v.apply_damage(a);
        assert_eq!(v.health, (before - a).max(0.0));
        assert_eq!(outcome == DamageOutcome::Killed, v.health == 0.0);
    }
}

#[test]
fn test_retire_is_idempotent() {
    let mut v = Vitals::at_level(10.0, 0.0, 1);
    assert!(v.retire());
    assert!(!v.retire());
}

// ---- Explosion falloff ----

#[test]
fn test_explosion_damage_endpoints() {
    assert_eq!(explosion_damage(14.0, 0.0, 25.0), 14.0);
    assert_eq!(explosion_damage(14.0, 25.0, 25.0), 0.0);
    assert_eq!(explosion_damage(14.0, 40.0, 25.0), 0.0);
    assert!((explosion_damage(14.0, 12.5, 25.0) - 7.0).abs() < 1e-5);
}

#[test]
fn test_explosion_damage_monotonic() {
    let mut last = f32::INFINITY;
    for i in 0..=60 {
        let d = i as f32 * 0.5;
        let dmg = explosion_damage(10.0, d, 25.0);
        assert!(dmg <= last, "damage rose at distance {d}");
        last = dmg;
    }
}

#[test]
fn test_arc_fraction_handles_zero_distance() {
    let flight = ArcFlight {
        initial: Vec3::new(0.0, 8.0, 0.0),
        destination: Vec3::ZERO,
        xz_distance: 0.0,
        spawn_secs: 2.0,
        explosion_radius: 25.0,
        hits_flying: false,
    };
    assert_eq!(flight.fraction_travelled(2.0, 35.0), 1.0);

    let flight = ArcFlight {
        xz_distance: 35.0,
        ..flight
    };
    assert!((flight.fraction_travelled(2.5, 35.0) - 0.5).abs() < 1e-6);
}

#[test]
fn test_tower_refund_rounds_up() {
    let tower = Tower {
        kind: TowerKind::Arrow,
        cell: CellCoord::new(0, 0),
        cost: 5,
        refund_factor: 0.5,
    };
    assert_eq!(tower.refund(), 3);
}

// ---- Config ----

#[test]
fn test_default_config_is_valid() {
    SimConfig::default().validate().unwrap();
}

#[test]
fn test_partial_config_keeps_defaults() {
    let json = r#"{ "economy": { "starting_gold": 200 }, "waves": { "flying_level_interval": 2 } }"#;
    let config = SimConfig::from_json_str(json).unwrap();
    assert_eq!(config.economy.starting_gold, 200);
    assert_eq!(config.economy.starting_lives, 40);
    assert_eq!(config.waves.flying_level_interval, 2);
    assert_eq!(config.waves.enemies_per_level, 15);
    assert_eq!(config.grid, SimConfig::default().grid);
}

#[test]
fn test_tower_attack_parses_tagged() {
    let json = r#"{ "towers": { "arrow": {
        "cost": 7, "refund_factor": 0.25, "range": 30.0, "sensor": "Sphere",
        "attack": { "type": "Seeking", "damage": 2.0, "fire_interval_secs": 0.2,
                    "projectile_speed": 80.0, "can_attack_flying": false } } } }"#;
    let config = SimConfig::from_json_str(json).unwrap();
    assert_eq!(config.towers.arrow.cost, 7);
    assert_eq!(config.towers.arrow.sensor, SensorShape::Sphere);
    assert!(matches!(
        config.towers.arrow.attack,
        TowerAttack::Seeking {
            can_attack_flying: false,
            ..
        }
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let err = SimConfig::from_json_str(r#"{ "tick_rate": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = SimConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let mut config = SimConfig::default();
    config.grid.leak_cell = config.grid.spawn_cell;
    assert!(config.validate().is_err());
}

#[test]
fn test_grid_cell_center() {
    let grid = SimConfig::default().grid;
    let center = grid.cell_center(CellCoord::new(3, 9));
    assert_eq!(center, Vec3::new(-40.0, 0.0, 10.0));
    assert!(grid.contains(CellCoord::new(3, 9)));
    assert!(!grid.contains(CellCoord::new(grid.columns, 0)));
}

#[test]
fn test_flying_level_rule() {
    let waves = SimConfig::default().waves;
    assert_eq!(waves.enemy_kind_for_level(1), EnemyKind::Ground);
    assert_eq!(waves.enemy_kind_for_level(4), EnemyKind::Flying);
    assert_eq!(waves.enemy_kind_for_level(8), EnemyKind::Flying);
    assert_eq!(waves.enemy_kind_for_level(9), EnemyKind::Ground);
}

// ---- Serde surfaces ----

#[test]
fn test_command_serde() {
    let commands = vec![
        PlayerCommand::BuildTower {
            kind: TowerKind::Cannon,
            cell: CellCoord::new(2, 3),
        },
        PlayerCommand::SellTower {
            cell: CellCoord::new(2, 3),
        },
        PlayerCommand::StartLevel,
    ];
    for c in commands {
        let json = serde_json::to_string(&c).unwrap();
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}

#[test]
fn test_rejection_event_serializes_reason() {
    let event = SimEvent::CommandRejected {
        reason: CommandError::InsufficientGold { cost: 12, gold: 3 },
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("CommandRejected"));
    assert!(json.contains("InsufficientGold"));
}

#[test]
fn test_default_snapshot_serializes() {
    let snap = GameStateSnapshot::default();
    let json = serde_json::to_string(&snap).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.phase, GamePhase::Build);
    assert!(back.enemies.is_empty());
}
