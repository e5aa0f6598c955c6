//! Ball integration

use super::state::WorldState;
use crate::params::Constraints;

/// Advance the ball one fixed step along its heading and refresh `diff`.
///
/// No clamping happens here. Callers clamp first and step second; swapping
/// the order changes results whenever the ball is pushed out of range.
pub fn step_ball(state: &mut WorldState, constraints: &Constraints) {
    let displacement = state.heading() * state.v * constraints.time_step;
    let pos = state.ball_pos() + displacement;
    state.x_ball = pos.x;
    state.y_ball = pos.y;
    state.refresh_diff();
}
