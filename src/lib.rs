//! Plank Bounce - a ball falling toward a movable plank, as an RL environment
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state, actions, physics, reward, episodes)
//! - `params`: Fixed parameters and the derived constraint table
//! - `messaging`: Broadcast of reset states across cooperating workers
//! - `stats`: Per-episode bookkeeping
//! - `policy`: Reference drivers that pick actions (no learning)

pub mod error;
pub mod messaging;
pub mod params;
pub mod policy;
pub mod sim;
pub mod stats;

pub use error::SimError;
pub use messaging::{Broadcast, ChannelGroup, MessagingError, Solo};
pub use params::{Constraints, Params};
pub use sim::{Action, Phase, Simulation, Transition, WorldState};
pub use stats::{EpisodeLog, EpisodeRecord};

/// Default environment parameters
pub mod consts {
    /// Screen width in pixels
    pub const SCREEN_WIDTH: f32 = 480.0;
    /// Screen height in pixels (ball falls along this axis)
    pub const SCREEN_HEIGHT: f32 = 640.0;
    /// Full plank width
    pub const PLANK_SIZE: f32 = 120.0;
    /// Full ball size
    pub const BALL_SIZE: f32 = 10.0;
    /// Fixed simulation step
    pub const TIME_STEP: f32 = 0.5;

    /// Ball speed range drawn on every beam
    pub const V_MIN: f32 = 80.0;
    pub const V_MAX: f32 = 120.0;
    /// Heading range in degrees from vertical (equal bounds keep the angle fixed)
    pub const ANGLE_MIN: f32 = 0.0;
    pub const ANGLE_MAX: f32 = 0.0;

    /// Episode ends once the ball is this close to the bottom edge
    pub const TERMINAL_MARGIN: f32 = 10.0;
    /// Multiplier applied to the reward of the terminal step
    pub const TERMINAL_SCALE: f32 = 1.5;
    /// Reward for holding position with the ball over the plank
    pub const ON_TARGET_REWARD: f32 = 50.0;
    /// Reward for holding position with the ball off the plank
    pub const OFF_TARGET_REWARD: f32 = -30.0;

    /// Plank displacement per action
    pub const STEP: f32 = 30.0;
    pub const LONG_STEP: f32 = 50.0;

    /// Starting world before the first beam
    pub const START_X: f32 = 240.0;
}
