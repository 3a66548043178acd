//! BOSSFIGHT Simulation Core
//!
//! Melee boss-fight combat on Bevy 0.16 ECS, headless and deterministic.
//!
//! The core owns combat rules (swings, damage windows, stagger, poise, lock-on,
//! enemy/boss state machines). Animation timelines, navigation, overlap sensing
//! and the camera are collaborators: the core talks to them through events and
//! intent components, and `HeadlessCollaboratorsPlugin` provides stand-ins so the
//! whole fight runs without an engine.
//!
//! One fixed tick (`CombatSet`, chained):
//! Clock → Sense → Cues → Input → Behavior → Hits → Actuate → Collaborators

use bevy::ecs::schedule::ExecutorKind;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod ai;
pub mod behavior;
pub mod clock;
pub mod combat;
pub mod components;
pub mod headless;
pub mod logger;
pub mod movement;
pub mod player;
pub mod spawn;
pub mod targeting;
pub mod tuning;

pub use ai::{BossPolicy, EnemyPolicy, EnemyState};
pub use behavior::{Behavior, BehaviorPlugin, BehaviorPolicy, Directive, Outbox};
pub use clock::CombatClock;
pub use combat::{
    ClipId, ClipLibrary, ClipPlayback, ClipRequested, CombatPlugin, Combatant, DamageDealt, DamageRequest, EntityDied,
    TimelineCue, TimelineEvent, Weapon,
};
pub use components::*;
pub use headless::HeadlessCollaboratorsPlugin;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use player::{PlayerAction, PlayerInput, PlayerPlugin, PlayerPolicy};
pub use targeting::{DetectionEvent, NearbyEnemies, TargetingPlugin};
pub use tuning::{CombatTuning, TuningError};

/// Phases of one fixed combat tick (configured as a chain)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Advance `CombatClock`
    Clock,
    /// Fold collaborator reports (detection transitions) into core state
    Sense,
    /// Drain timeline cues into the policies
    Cues,
    /// Player input actions
    Input,
    /// Target facing + one policy step per combatant
    Behavior,
    /// Weapon hits, damage requests, deaths
    Hits,
    /// Flush outboxes to the collaborators, camera assist
    Actuate,
    /// Collaborator stand-ins (clip player, movement, sensing)
    Collaborators,
}

/// Main simulation plugin (combines every combat subsystem)
///
/// Collaborators are not included: add `HeadlessCollaboratorsPlugin` for
/// headless runs, or the engine bridge in a game build.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz for the combat tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<CombatClock>()
            .init_resource::<DeterministicRng>()
            .init_resource::<CombatTuning>()
            .register_type::<CombatClock>()
            .register_type::<Combatant>()
            .register_type::<Health>()
            .register_type::<CameraRig>();

        // Single-threaded for deterministic ordering of RNG draws and events
        app.edit_schedule(FixedUpdate, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        });

        app.configure_sets(
            FixedUpdate,
            (
                CombatSet::Clock,
                CombatSet::Sense,
                CombatSet::Cues,
                CombatSet::Input,
                CombatSet::Behavior,
                CombatSet::Hits,
                CombatSet::Actuate,
                CombatSet::Collaborators,
            )
                .chain(),
        )
        .add_systems(FixedUpdate, clock::advance_combat_clock.in_set(CombatSet::Clock))
        .add_plugins((CombatPlugin, BehaviorPlugin, TargetingPlugin, PlayerPlugin));
    }
}

/// Deterministic RNG resource (seeded)
///
/// Every random draw of the combat core (attack/stumble clip selection) goes
/// through this one stream.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Creates a headless App with the full combat core and collaborator stand-ins
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins((SimulationPlugin, HeadlessCollaboratorsPlugin));

    app
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Runs exactly one combat tick, independent of wall-clock time
///
/// `app.update()` runs FixedUpdate zero or several times depending on real
/// elapsed time; scenario tests and the headless binary step with this instead.
/// Event buffers are swapped afterwards, like the engine does once per frame.
pub fn run_fixed_tick(app: &mut App) {
    let world = app.world_mut();
    world.run_schedule(FixedUpdate);

    update_events::<TimelineEvent>(world);
    update_events::<ClipRequested>(world);
    update_events::<DamageRequest>(world);
    update_events::<DamageDealt>(world);
    update_events::<EntityDied>(world);
    update_events::<DetectionEvent>(world);
    update_events::<PlayerInput>(world);
}

/// Runs `ticks` combat ticks
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        run_fixed_tick(app);
    }
}

/// World snapshot for determinism comparison
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Sorted by entity index so spawn order alone decides the layout
    entities.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
