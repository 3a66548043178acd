//! Determinism tests
//!
//! Same seed + same inputs → identical world after N fixed ticks

use bevy::prelude::*;
use bossfight_simulation::spawn::{boss_bundle, enemy_bundle, player_bundle};
use bossfight_simulation::*;

const TICK_COUNT: usize = 600;

/// Player locked on, attacking whenever in reach, rolling every 90 ticks
fn scripted_input(tick: usize) -> Vec<PlayerAction> {
    let mut actions = Vec::new();
    if tick == 3 {
        actions.push(PlayerAction::ToggleCombatMode);
    }
    if tick % 90 == 45 {
        actions.push(PlayerAction::Move { forward: -1.0, right: 0.5 });
        actions.push(PlayerAction::Roll);
    } else {
        actions.push(PlayerAction::Move { forward: 1.0, right: 0.0 });
    }
    if tick % 20 == 0 {
        actions.push(PlayerAction::Attack);
    }
    if tick % 150 == 100 {
        actions.push(PlayerAction::CycleTarget { clockwise: tick % 300 == 100 });
    }
    actions
}

fn run_fight(seed: u64) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut app = create_headless_app(seed);
    let tuning = app.world().resource::<CombatTuning>().clone();

    let player = app.world_mut().spawn(player_bundle(Vec3::ZERO, &tuning)).id();
    app.world_mut()
        .spawn(boss_bundle(Vec3::new(0.0, 0.0, -1000.0), Some(player), &tuning));
    for x in [-400.0, 400.0] {
        app.world_mut()
            .spawn(enemy_bundle(Vec3::new(x, 0.0, -700.0), Some(player), &tuning));
    }

    for tick in 0..TICK_COUNT {
        for action in scripted_input(tick) {
            app.world_mut().send_event(PlayerInput::new(player, action));
        }
        run_fixed_tick(&mut app);
    }

    let world = app.world_mut();
    (
        world_snapshot::<Transform>(world),
        world_snapshot::<Health>(world),
        world_snapshot::<Combatant>(world),
    )
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_fight(SEED);
    let second = run_fight(SEED);
    let third = run_fight(SEED);

    assert_eq!(first.0, second.0, "Transforms diverged between run 1 and 2");
    assert_eq!(first.0, third.0, "Transforms diverged between run 1 and 3");
    assert_eq!(first.1, second.1, "Health diverged between run 1 and 2");
    assert_eq!(first.1, third.1, "Health diverged between run 1 and 3");
    assert_eq!(first.2, second.2, "Combatant state diverged between run 1 and 2");
}

#[test]
fn test_fight_actually_happens() {
    let (_, health, _) = run_fight(7);
    let untouched = run_untouched_health();

    // Someone took damage within ten seconds of fighting
    assert_ne!(health, untouched);
}

/// Health snapshot of the same line-up before any tick ran
fn run_untouched_health() -> Vec<u8> {
    let mut app = create_headless_app(7);
    let tuning = app.world().resource::<CombatTuning>().clone();

    let player = app.world_mut().spawn(player_bundle(Vec3::ZERO, &tuning)).id();
    app.world_mut()
        .spawn(boss_bundle(Vec3::new(0.0, 0.0, -1000.0), Some(player), &tuning));
    for x in [-400.0, 400.0] {
        app.world_mut()
            .spawn(enemy_bundle(Vec3::new(x, 0.0, -700.0), Some(player), &tuning));
    }

    world_snapshot::<Health>(app.world_mut())
}

#[test]
fn test_snapshot_orders_by_entity() {
    let mut app = create_headless_app(1);
    let tuning = app.world().resource::<CombatTuning>().clone();
    app.world_mut().spawn(player_bundle(Vec3::ZERO, &tuning));
    app.world_mut().spawn(player_bundle(Vec3::X * 500.0, &tuning));

    let world = app.world_mut();
    let snapshot = world_snapshot::<Health>(world);
    assert_eq!(snapshot, world_snapshot::<Health>(world));
    assert!(!snapshot.is_empty());
}
