//! Transition scoring and the terminal predicate

use super::state::WorldState;
use crate::params::{Constraints, Params};

/// Score a transition by how much it closed the ball/plank gap.
///
/// An unchanged gap is rewarded when the ball sits over the plank and
/// penalized otherwise; any change scores the change itself, unbounded.
pub fn reward(
    previous: &WorldState,
    current: &WorldState,
    constraints: &Constraints,
    params: &Params,
) -> f32 {
    let after = current.distance();
    let delta = previous.distance() - after;

    if delta == 0.0 && after < constraints.plank_half_width {
        params.on_target_reward
    } else if delta == 0.0 {
        params.off_target_reward
    } else {
        delta
    }
}

/// Ball has reached the bottom of the screen
pub fn is_terminal(state: &WorldState, constraints: &Constraints) -> bool {
    state.y_ball > constraints.terminal_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score(prev: WorldState, cur: WorldState) -> f32 {
        reward(&prev, &cur, &Constraints::default(), &Params::default())
    }

    #[test]
    fn test_stable_on_target() {
        let s = WorldState::new(240.0, 250.0, 0.0, 100.0, 0.0);
        assert_eq!(score(s, s), 50.0);
    }

    #[test]
    fn test_stable_off_target() {
        let s = WorldState::new(100.0, 400.0, 0.0, 100.0, 0.0);
        assert_eq!(score(s, s), -30.0);
    }

    #[test]
    fn test_edge_of_plank_is_off_target() {
        // Exactly half a plank away does not count as on target
        let s = WorldState::new(240.0, 300.0, 0.0, 100.0, 0.0);
        assert_eq!(score(s, s), -30.0);
    }

    #[test]
    fn test_closing_and_opening_gap() {
        let prev = WorldState::new(100.0, 300.0, 0.0, 100.0, 0.0);
        let closer = WorldState::new(150.0, 300.0, 50.0, 100.0, 0.0);
        assert_eq!(score(prev, closer), 50.0);

        let farther = WorldState::new(50.0, 300.0, 50.0, 100.0, 0.0);
        assert_eq!(score(prev, farther), -50.0);
    }

    #[test]
    fn test_crossing_sides_uses_absolute_gap() {
        let prev = WorldState::new(200.0, 240.0, 0.0, 100.0, 0.0);
        let cur = WorldState::new(250.0, 240.0, 50.0, 100.0, 0.0);
        assert_eq!(score(prev, cur), 30.0);
    }

    #[test]
    fn test_gap_ignores_stale_diff() {
        // Reward reads positions, not the cached offset
        let prev = WorldState::new(100.0, 300.0, 0.0, 100.0, 0.0);
        let mut cur = WorldState::new(150.0, 300.0, 50.0, 100.0, 0.0);
        cur.diff = 0.0;
        assert_eq!(score(prev, cur), 50.0);
    }

    #[test]
    fn test_terminal_threshold() {
        let c = Constraints::default();
        assert!(!is_terminal(&WorldState::new(240.0, 240.0, 630.0, 100.0, 0.0), &c));
        assert!(is_terminal(&WorldState::new(240.0, 240.0, 630.5, 100.0, 0.0), &c));
    }

    proptest! {
        #[test]
        fn prop_reward_is_deterministic(
            a in 0.0f32..480.0, b in 0.0f32..480.0,
            c in 0.0f32..480.0, d in 0.0f32..480.0,
        ) {
            let prev = WorldState::new(a, b, 0.0, 100.0, 0.0);
            let cur = WorldState::new(c, d, 50.0, 100.0, 0.0);
            prop_assert_eq!(score(prev, cur).to_bits(), score(prev, cur).to_bits());
        }
    }
}
