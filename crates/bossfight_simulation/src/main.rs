//! Headless BOSSFIGHT duel
//!
//! Spawns the player and the boss, then plays a scripted player (lock on,
//! close in, attack, roll away when the boss swings) until one of them falls or
//! the tick budget runs out.

use bevy::prelude::*;
use bossfight_simulation::spawn::{boss_bundle, player_bundle};
use bossfight_simulation::*;

const MAX_TICKS: usize = 60 * 120;

fn main() {
    let seed = std::env::args().nth(1).and_then(|arg| arg.parse().ok()).unwrap_or(42);
    println!("Starting BOSSFIGHT headless duel (seed: {})", seed);

    let mut app = create_headless_app(seed);
    set_log_level(LogLevel::Info);

    let tuning = app.world().resource::<CombatTuning>().clone();
    let player = app.world_mut().spawn(player_bundle(Vec3::ZERO, &tuning)).id();
    let boss = app
        .world_mut()
        .spawn(boss_bundle(Vec3::new(0.0, 0.0, -2000.0), Some(player), &tuning))
        .id();

    for tick in 0..MAX_TICKS {
        for action in scripted_actions(app.world(), player, boss) {
            app.world_mut().send_event(PlayerInput::new(player, action));
        }
        run_fixed_tick(&mut app);

        if tick % 60 == 0 {
            print_status(app.world(), player, boss);
        }
        if app.world().get::<Dead>(player).is_some() || app.world().get::<Dead>(boss).is_some() {
            print_status(app.world(), player, boss);
            break;
        }
    }

    let winner = match (app.world().get::<Dead>(player), app.world().get::<Dead>(boss)) {
        (None, Some(_)) => "player",
        (Some(_), None) => "boss",
        _ => "nobody",
    };
    println!("Duel complete: {} wins", winner);
}

/// Simple scripted opponent for the boss
fn scripted_actions(world: &World, player: Entity, boss: Entity) -> Vec<PlayerAction> {
    let (Some(me), Some(combatant), Some(behavior)) = (
        world.get::<Transform>(player),
        world.get::<Combatant>(player),
        world.get::<Behavior>(player),
    ) else {
        return Vec::new();
    };
    let Some(boss_transform) = world.get::<Transform>(boss) else {
        return Vec::new();
    };
    let rolling = behavior.as_player().is_some_and(|policy| policy.rolling);

    let mut actions = Vec::new();
    if !combatant.target_locked {
        actions.push(PlayerAction::ToggleCombatMode);
    }

    let boss_swinging = world.get::<Combatant>(boss).is_some_and(|boss| boss.attacking);
    let distance = me.translation.distance(boss_transform.translation);

    if boss_swinging && distance < 400.0 && !rolling && !combatant.attacking {
        actions.push(PlayerAction::Move { forward: -1.0, right: 0.0 });
        actions.push(PlayerAction::Roll);
    } else if distance > 220.0 {
        actions.push(PlayerAction::Move { forward: 1.0, right: 0.0 });
    } else {
        actions.push(PlayerAction::Move { forward: 0.0, right: 0.0 });
        actions.push(PlayerAction::Attack);
    }
    actions
}

fn print_status(world: &World, player: Entity, boss: Entity) {
    let tick = world.resource::<CombatClock>().tick();
    let health = |entity| world.get::<Health>(entity).map(|h| h.current).unwrap_or(0);
    let state = world
        .get::<Behavior>(boss)
        .and_then(|behavior| behavior.as_boss())
        .map(|boss| boss.state());
    let distance = match (world.get::<Transform>(player), world.get::<Transform>(boss)) {
        (Some(a), Some(b)) => a.translation.distance(b.translation),
        _ => 0.0,
    };
    println!(
        "Tick {}: player hp {} | boss hp {} ({:?}) | distance {:.0}",
        tick,
        health(player),
        health(boss),
        state,
        distance
    );
}
