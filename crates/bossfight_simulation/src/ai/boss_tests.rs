//! Tests for the boss overrides (long attack, poise).

#[cfg(test)]
mod tests {
    use super::super::boss::BossPolicy;
    use super::super::components::EnemyState;
    use crate::behavior::test_support::PolicyRig;
    use crate::behavior::{BehaviorPolicy, Directive, IncomingHit};
    use crate::combat::{ClipId, Combatant};
    use crate::tuning::BossTuning;
    use bevy::prelude::*;

    const TARGET: Entity = Entity::from_raw(99);

    fn combatant() -> Combatant {
        Combatant::new(
            vec![ClipId::new("smash")],
            vec![ClipId::new("stumble_a"), ClipId::new("stumble_b")],
        )
        .with_target(Some(TARGET))
    }

    fn boss_in_chase() -> BossPolicy {
        let mut boss = BossPolicy::new(vec![ClipId::new("leap_slam")], &BossTuning::default());
        boss.enemy.set_state(EnemyState::ChaseClose);
        boss
    }

    /// Boss at the origin facing -Z (aligned) or +X (misaligned)
    fn rig(aligned: bool) -> PolicyRig {
        let look_at = if aligned { Vec3::NEG_Z } else { Vec3::X };
        PolicyRig::new().placed(Vec3::ZERO, look_at)
    }

    fn target_at(distance: f32) -> Option<Vec3> {
        Some(Vec3::new(0.0, 0.0, -distance))
    }

    fn hit() -> IncomingHit {
        IncomingHit {
            amount: 1,
            instigator: Some(TARGET),
            causer: TARGET,
            causer_position: target_at(200.0),
        }
    }

    fn fired_long_attack(rig: &PolicyRig) -> bool {
        rig.clips() == vec![ClipId::new("leap_slam")]
    }

    #[test]
    fn test_long_attack_available_from_the_start() {
        let boss = boss_in_chase();
        assert!(boss.long_attack_ready(0.0));
        assert!((boss.long_attack_timestamp + 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_close_and_aligned_uses_standard_swing() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(250.0)));

        assert_eq!(boss.state(), EnemyState::Attack);
        assert!(!boss.long_attack_active);
        assert_eq!(rig.clips(), vec![ClipId::new("smash")]);
        assert!(boss.long_attack_ready(rig.clock.elapsed_secs()));
    }

    #[test]
    fn test_far_target_triggers_long_attack() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));

        assert!(fired_long_attack(&rig));
        assert_eq!(boss.state(), EnemyState::Attack);
        assert!(boss.long_attack_active);
        assert!((boss.long_attack_forward_speed - 1600.0).abs() < 1e-3);
        assert!((boss.long_attack_timestamp - 10.0).abs() < 1e-5);
        assert!(rig.issued(&Directive::StopMovement));
        assert!(!rig.issued_move_to());
    }

    #[test]
    fn test_misaligned_within_range_triggers_long_attack() {
        let mut rig = rig(false);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(500.0)));

        assert!(fired_long_attack(&rig));
        // Snapped towards the target before leaping
        assert!(rig.transform.forward().dot(Vec3::NEG_Z) > 0.999);
    }

    #[test]
    fn test_long_attack_needs_cooldown() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        boss.long_attack_timestamp = 8.0;
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));

        assert!(!fired_long_attack(&rig));
        assert!(rig.issued(&Directive::MoveToActor(TARGET)));
        assert_eq!(boss.state(), EnemyState::ChaseClose);
    }

    #[test]
    fn test_long_attack_needs_line_of_sight() {
        let mut rig = rig(true);
        rig.sensors.line_of_sight = false;
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));

        assert!(!fired_long_attack(&rig));
        assert!(rig.issued_move_to());
        assert!(boss.long_attack_ready(rig.clock.elapsed_secs()));
    }

    #[test]
    fn test_aligned_mid_range_closes_in() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(500.0)));

        assert!(rig.clips().is_empty());
        assert!(rig.issued_move_to());
        assert_eq!(boss.state(), EnemyState::ChaseClose);
    }

    #[test]
    fn test_cooldown_blocks_second_leap() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));
        assert!(fired_long_attack(&rig));
        boss.on_end_attack(&mut combatant);

        rig.clear();
        rig.at_time(14.9);
        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));
        assert!(!fired_long_attack(&rig));

        rig.clear();
        rig.at_time(15.0);
        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));
        assert!(fired_long_attack(&rig));
    }

    #[test]
    fn test_missing_long_clips_keep_cooldown() {
        let mut rig = rig(true);
        let mut boss = BossPolicy::new(Vec::new(), &BossTuning::default());
        boss.enemy.set_state(EnemyState::ChaseClose);
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));

        assert_eq!(boss.state(), EnemyState::ChaseClose);
        assert!((boss.long_attack_timestamp + 5.0).abs() < f32::EPSILON);
        assert!(rig.issued_move_to());
    }

    #[test]
    fn test_long_attack_drives_forward_at_computed_speed() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));
        combatant.set_moving_forward(true);
        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));

        let expected = 1600.0 / 60.0;
        assert!((rig.transform.translation.z + expected).abs() < 1e-3);
    }

    #[test]
    fn test_standard_swing_after_leap_uses_base_speed() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));
        boss.on_end_attack(&mut combatant);
        assert_eq!(boss.state(), EnemyState::ChaseClose);

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(250.0)));
        assert!(!boss.long_attack_active);
        combatant.set_moving_forward(true);
        let before = rig.transform.translation;
        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(250.0)));

        let moved = before.distance(rig.transform.translation);
        assert!((moved - 500.0 / 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_stagger_interrupts_leap() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));
        assert!(boss.long_attack_active);

        assert_eq!(boss.on_damage(&mut combatant, &mut rig.ctx(None), &hit()), 1);
        assert_eq!(boss.state(), EnemyState::Stumble);
        assert!(!boss.long_attack_active);
    }

    #[test]
    fn test_poise_immune_hit_keeps_leap_running() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));
        boss.enemy.interruptable = false;
        boss.quick_hits_taken = 3;
        boss.quick_hits_timestamp = 10.0;

        assert_eq!(boss.on_damage(&mut combatant, &mut rig.ctx(None), &hit()), 1);
        assert_eq!(boss.state(), EnemyState::Attack);
        assert!(boss.long_attack_active);
    }

    #[test]
    fn test_poise_three_quick_hits_grant_stagger_immunity() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        for time in [10.0, 10.4] {
            rig.at_time(time);
            assert_eq!(boss.on_damage(&mut combatant, &mut rig.ctx(None), &hit()), 1);
            assert!(boss.enemy.interruptable);
            assert_eq!(boss.state(), EnemyState::Stumble);
        }

        rig.at_time(11.2);
        rig.clear();
        combatant.end_stumble();
        boss.enemy.set_state(EnemyState::Attack);
        combatant.attack();

        assert_eq!(boss.on_damage(&mut combatant, &mut rig.ctx(None), &hit()), 1);
        assert_eq!(boss.quick_hits_taken, 3);
        assert!(!boss.enemy.interruptable);
        assert_eq!(boss.state(), EnemyState::Attack);
        assert!(combatant.attacking);
        assert!(rig.clips().is_empty());
    }

    #[test]
    fn test_poise_resets_on_hit_after_window() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        for time in [10.0, 10.4, 11.2] {
            rig.at_time(time);
            boss.on_damage(&mut combatant, &mut rig.ctx(None), &hit());
        }
        assert!(!boss.enemy.interruptable);

        rig.at_time(13.0);
        rig.clear();
        boss.enemy.set_state(EnemyState::ChaseClose);
        let applied = boss.on_damage(&mut combatant, &mut rig.ctx(None), &hit());

        assert_eq!(applied, 1);
        assert_eq!(boss.quick_hits_taken, 0);
        assert!(boss.enemy.interruptable);
        assert_eq!(boss.state(), EnemyState::Stumble);
        assert_eq!(rig.clips().len(), 1);
    }

    #[test]
    fn test_poise_window_measured_from_first_hit() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        for time in [10.0, 11.0] {
            rig.at_time(time);
            boss.on_damage(&mut combatant, &mut rig.ctx(None), &hit());
        }
        assert_eq!(boss.quick_hits_taken, 2);

        // 1.6 after the first hit even though only 0.6 after the second
        rig.at_time(11.6);
        boss.on_damage(&mut combatant, &mut rig.ctx(None), &hit());
        assert_eq!(boss.quick_hits_taken, 0);
        assert!(boss.enemy.interruptable);
    }

    #[test]
    fn test_self_damage_rejected_before_counting() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();
        let own = IncomingHit {
            causer: rig.entity,
            ..hit()
        };

        assert_eq!(boss.on_damage(&mut combatant, &mut rig.ctx(None), &own), 0);
        assert_eq!(boss.quick_hits_taken, 0);
        assert_eq!(boss.state(), EnemyState::ChaseClose);
    }

    #[test]
    fn test_dead_boss_ignores_everything() {
        let mut rig = rig(true);
        let mut boss = boss_in_chase();
        let mut combatant = combatant();

        boss.on_death(&mut combatant, &mut rig.ctx(None));
        rig.clear();

        boss.on_tick(&mut combatant, &mut rig.ctx(target_at(1000.0)));
        assert_eq!(boss.on_damage(&mut combatant, &mut rig.ctx(None), &hit()), 0);
        assert_eq!(boss.state(), EnemyState::Dead);
        assert!(rig.outbox.is_empty());
    }
}
