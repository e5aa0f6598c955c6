//! Boundary enforcement for plank and ball

use super::state::WorldState;
use crate::params::Constraints;

/// Clamp the plank center and the ball's horizontal position into their
/// legal ranges. Leaves `diff` alone; the physics step recomputes it.
pub fn enforce_bounds(state: &mut WorldState, constraints: &Constraints) {
    state.x_plank = state.x_plank.clamp(constraints.x_min, constraints.x_max);
    state.x_ball = state.x_ball.clamp(constraints.ball_min, constraints.ball_max);
}

/// True when both positions already sit inside their ranges
pub fn within_bounds(state: &WorldState, constraints: &Constraints) -> bool {
    (constraints.x_min..=constraints.x_max).contains(&state.x_plank)
        && (constraints.ball_min..=constraints.ball_max).contains(&state.x_ball)
}
