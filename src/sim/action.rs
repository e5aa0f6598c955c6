//! Discrete plank actions

use serde::{Deserialize, Serialize};

use super::state::WorldState;
use crate::params::Params;

/// The five moves an agent can make each step
///
/// "Left" moves push the plank toward larger x; the naming follows the
/// screen as seen from the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeftLong,
    MoveLeft,
    Stay,
    MoveRight,
    MoveRightLong,
}

impl Action {
    /// Palette order; an action's position here is its discrete id
    pub const ALL: [Action; 5] = [
        Action::MoveLeftLong,
        Action::MoveLeft,
        Action::Stay,
        Action::MoveRight,
        Action::MoveRightLong,
    ];

    pub fn index(&self) -> usize {
        match self {
            Action::MoveLeftLong => 0,
            Action::MoveLeft => 1,
            Action::Stay => 2,
            Action::MoveRight => 3,
            Action::MoveRightLong => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeftLong => "moveLeftLong",
            Action::MoveLeft => "moveLeft",
            Action::Stay => "stay",
            Action::MoveRight => "moveRight",
            Action::MoveRightLong => "moveRightLong",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleftlong" | "left_long" => Some(Action::MoveLeftLong),
            "moveleft" | "left" => Some(Action::MoveLeft),
            "stay" => Some(Action::Stay),
            "moveright" | "right" => Some(Action::MoveRight),
            "moverightlong" | "right_long" => Some(Action::MoveRightLong),
            _ => None,
        }
    }

    /// Signed plank displacement
    pub fn plank_delta(&self, params: &Params) -> f32 {
        match self {
            Action::MoveLeftLong => params.long_step,
            Action::MoveLeft => params.step,
            Action::Stay => 0.0,
            Action::MoveRight => -params.step,
            Action::MoveRightLong => -params.long_step,
        }
    }

    /// Shift the plank. Clamping and physics are left to the caller.
    pub fn apply(&self, state: &mut WorldState, params: &Params) {
        state.x_plank += self.plank_delta(params);
    }
}
