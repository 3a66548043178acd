//! Tests for the enemy state machine.

#[cfg(test)]
mod tests {
    use super::super::components::EnemyState;
    use super::super::enemy::EnemyPolicy;
    use crate::behavior::test_support::PolicyRig;
    use crate::behavior::{BehaviorPolicy, Directive, IncomingHit};
    use crate::combat::{ClipId, Combatant, TimelineCue};
    use bevy::prelude::*;

    fn combatant() -> Combatant {
        Combatant::new(
            vec![ClipId::new("smash"), ClipId::new("sweep")],
            vec![ClipId::new("stumble_a"), ClipId::new("stumble_b")],
        )
        .with_target(Some(Entity::from_raw(99)))
    }

    /// Enemy at the origin whose forward·direction-to-target equals `dot`
    /// for a target straight down -Z
    fn rig_with_dot(dot: f32) -> PolicyRig {
        let angle = dot.clamp(-1.0, 1.0).acos();
        let look_at = Vec3::new(angle.sin(), 0.0, -angle.cos()) * 100.0;
        PolicyRig::new().placed(Vec3::ZERO, look_at)
    }

    fn hit_from(causer: Entity, position: Vec3) -> IncomingHit {
        IncomingHit {
            amount: 1,
            instigator: Some(causer),
            causer,
            causer_position: Some(position),
        }
    }

    #[test]
    fn test_idle_engages_only_inside_radius() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        let mut combatant = combatant();

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -1250.0))));
        assert_eq!(enemy.state, EnemyState::Idle);
        assert!(!combatant.target_locked);

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -1100.0))));
        assert_eq!(enemy.state, EnemyState::ChaseClose);
        assert!(combatant.target_locked);
    }

    #[test]
    fn test_idle_without_target_stays_idle() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        let mut combatant = combatant().with_target(None);

        enemy.on_tick(&mut combatant, &mut rig.ctx(None));

        assert_eq!(enemy.state, EnemyState::Idle);
        assert!(rig.outbox.is_empty());
    }

    #[test]
    fn test_chase_close_attacks_when_facing_in_range() {
        let mut rig = rig_with_dot(0.97);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::ChaseClose);
        let mut combatant = combatant();

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -250.0))));

        assert_eq!(enemy.state, EnemyState::Attack);
        assert!(combatant.attacking);
        assert!(rig.issued(&Directive::StopMovement));
        assert_eq!(rig.clips().len(), 1);
        assert!(combatant.attack_clips.contains(&rig.clips()[0]));
    }

    #[test]
    fn test_chase_close_waits_when_misaligned_in_range() {
        let mut rig = rig_with_dot(0.9);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::ChaseClose);
        let mut combatant = combatant();

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -250.0))));

        assert_eq!(enemy.state, EnemyState::ChaseClose);
        assert!(!combatant.attacking);
        assert!(rig.outbox.is_empty());
    }

    #[test]
    fn test_chase_close_does_not_attack_while_stumbling() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::ChaseClose);
        let mut combatant = combatant();
        combatant.stumbling = true;

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -200.0))));

        assert_eq!(enemy.state, EnemyState::ChaseClose);
        assert!(!combatant.attacking);
    }

    #[test]
    fn test_chase_close_paths_to_distant_target() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::ChaseClose);
        let mut combatant = combatant();

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -600.0))));
        assert!(rig.issued(&Directive::MoveToActor(Entity::from_raw(99))));

        rig.clear();
        rig.sensors.following_path = true;
        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -600.0))));
        assert!(!rig.issued_move_to());
    }

    #[test]
    fn test_chase_far_returns_below_threshold() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::ChaseFar);
        let mut combatant = combatant();

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -850.0))));
        assert_eq!(enemy.state, EnemyState::ChaseFar);

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -849.0))));
        assert_eq!(enemy.state, EnemyState::ChaseClose);
    }

    #[test]
    fn test_attack_moves_forward_at_base_rate() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::Attack);
        let mut combatant = combatant();
        combatant.attack();
        combatant.set_moving_forward(true);

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -250.0))));

        let expected = 500.0 / 60.0;
        assert!((rig.transform.translation.z + expected).abs() < 1e-3);
    }

    #[test]
    fn test_attack_end_cue_returns_to_chase_close() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::Attack);
        let mut combatant = combatant();
        combatant.attack();

        enemy.on_cue(&mut combatant, &mut rig.ctx(None), TimelineCue::AttackEnd);

        assert_eq!(enemy.state, EnemyState::ChaseClose);
        assert!(!combatant.attacking);
    }

    #[test]
    fn test_hit_staggers_interruptable_enemy() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::Attack);
        let mut combatant = combatant();
        combatant.attack();
        combatant.set_attack_damaging(true);

        let source = Vec3::new(300.0, 0.0, 0.0);
        let applied = enemy.on_damage(&mut combatant, &mut rig.ctx(None), &hit_from(Entity::from_raw(5), source));

        assert_eq!(applied, 1);
        assert_eq!(enemy.state, EnemyState::Stumble);
        assert!(combatant.stumbling);
        assert!(!combatant.attacking);
        assert!(!combatant.attack_damaging);
        assert!(rig.issued(&Directive::StopMovement));
        assert_eq!(rig.clips().len(), 1);
        // Snapped to face the source on +X
        assert!(rig.transform.forward().dot(Vec3::X) > 0.999);
    }

    #[test]
    fn test_consecutive_staggers_never_repeat_clip() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        let mut combatant = combatant();

        let mut previous: Option<ClipId> = None;
        for _ in 0..20 {
            rig.clear();
            enemy.on_damage(&mut combatant, &mut rig.ctx(None), &hit_from(Entity::from_raw(5), Vec3::X));
            let clip = rig.clips().pop();
            assert!(clip.is_some());
            assert_ne!(clip, previous);
            previous = clip;
        }
    }

    #[test]
    fn test_self_damage_rejected() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        let mut combatant = combatant();
        let me = rig.entity;

        let applied = enemy.on_damage(&mut combatant, &mut rig.ctx(None), &hit_from(me, Vec3::X));

        assert_eq!(applied, 0);
        assert_eq!(enemy.state, EnemyState::Idle);
        assert!(!combatant.stumbling);
    }

    #[test]
    fn test_non_interruptable_takes_damage_without_stagger() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::Attack);
        enemy.interruptable = false;
        let mut combatant = combatant();
        combatant.attack();

        let applied = enemy.on_damage(&mut combatant, &mut rig.ctx(None), &hit_from(Entity::from_raw(5), Vec3::X));

        assert_eq!(applied, 1);
        assert_eq!(enemy.state, EnemyState::Attack);
        assert!(combatant.attacking);
        assert!(!combatant.stumbling);
        assert!(rig.outbox.is_empty());
    }

    #[test]
    fn test_stumble_backs_off_then_resumes_chase() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::Stumble);
        let mut combatant = combatant();
        combatant.stumbling = true;
        combatant.set_moving_backwards(true);

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -250.0))));
        let inputs = rig.movement_inputs();
        assert_eq!(inputs.len(), 1);
        assert!(inputs[0].0.dot(Vec3::Z) > 0.999);
        assert!((inputs[0].1 - 10.0 / 60.0).abs() < 1e-5);
        assert_eq!(enemy.state, EnemyState::Stumble);

        enemy.on_cue(&mut combatant, &mut rig.ctx(None), TimelineCue::StumbleEnd);
        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -250.0))));
        assert_eq!(enemy.state, EnemyState::ChaseClose);
    }

    #[test]
    fn test_dead_is_absorbing() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        let mut combatant = combatant();
        combatant.attack();

        enemy.on_death(&mut combatant, &mut rig.ctx(None));
        assert_eq!(enemy.state, EnemyState::Dead);
        assert!(!combatant.attacking);
        assert_eq!(rig.outbox.0, vec![Directive::StopMovement]);

        enemy.set_state(EnemyState::ChaseClose);
        assert_eq!(enemy.state, EnemyState::Dead);

        rig.clear();
        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -100.0))));
        assert!(!enemy.on_attack(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -100.0)))));
        let applied = enemy.on_damage(&mut combatant, &mut rig.ctx(None), &hit_from(Entity::from_raw(5), Vec3::X));
        assert_eq!(applied, 0);
        assert_eq!(enemy.state, EnemyState::Dead);
        assert!(rig.outbox.is_empty());
    }

    #[test]
    fn test_no_attack_clips_means_no_swing() {
        let mut rig = rig_with_dot(1.0);
        let mut enemy = EnemyPolicy::new();
        enemy.set_state(EnemyState::ChaseClose);
        let mut combatant = Combatant::new(Vec::new(), Vec::new()).with_target(Some(Entity::from_raw(99)));

        enemy.on_tick(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -200.0))));

        assert_eq!(enemy.state, EnemyState::ChaseClose);
        assert!(!combatant.attacking);
    }

    #[test]
    fn test_explicit_attack_snaps_to_target() {
        let mut rig = rig_with_dot(0.0);
        let mut enemy = EnemyPolicy::new();
        let mut combatant = combatant();

        assert!(enemy.on_attack(&mut combatant, &mut rig.ctx(Some(Vec3::new(0.0, 0.0, -400.0)))));

        assert_eq!(enemy.state, EnemyState::Attack);
        assert!(rig.transform.forward().dot(Vec3::NEG_Z) > 0.999);
    }
}
