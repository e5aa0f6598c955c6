//! Single-action transition
//!
//! Core step that advances the world deterministically.

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::bounds::enforce_bounds;
use super::physics::step_ball;
use super::reward::{is_terminal, reward};
use super::state::WorldState;
use crate::params::{Constraints, Params};

/// What a driver sees after one action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: WorldState,
    pub reward: f32,
    pub done: bool,
}

/// Advance `state` by one action and return the transition plus the
/// snapshot taken before the action was applied.
///
/// Order is fixed: action, clamp, physics, reward, terminal check.
pub fn tick(
    state: &mut WorldState,
    action: Action,
    constraints: &Constraints,
    params: &Params,
) -> (WorldState, Transition) {
    let previous = *state;

    action.apply(state, params);
    enforce_bounds(state, constraints);
    step_ball(state, constraints);

    let mut outcome = reward(&previous, state, constraints, params);
    let done = is_terminal(state, constraints);
    if done {
        outcome *= params.terminal_scale;
    }

    (
        previous,
        Transition {
            state: *state,
            reward: outcome,
            done,
        },
    )
}
