//! Tests for the enemy FSM state.

#[cfg(test)]
mod tests {
    use super::super::fsm::EnemyState;

    #[test]
    fn test_enemy_state_default() {
        assert_eq!(EnemyState::default(), EnemyState::Idle);
    }

    #[test]
    fn test_only_dead_is_terminal() {
        assert!(EnemyState::Dead.is_terminal());
        for state in [
            EnemyState::Idle,
            EnemyState::ChaseClose,
            EnemyState::ChaseFar,
            EnemyState::Attack,
            EnemyState::Stumble,
            EnemyState::Taunt,
        ] {
            assert!(!state.is_terminal());
        }
    }
}
