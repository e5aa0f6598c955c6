//! Environment parameters and the constraint table derived from them
//!
//! Parameters are built in code; the serde derives only exist so a run can
//! report what it was configured with.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Tunable environment parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    // === Geometry ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Full plank width
    pub plank_size: f32,
    /// Full ball size
    pub ball_size: f32,
    pub time_step: f32,

    // === Beam ranges ===
    pub v_min: f32,
    pub v_max: f32,
    /// Heading bounds in degrees
    pub angle_min: f32,
    pub angle_max: f32,

    // === Reward shaping ===
    pub terminal_margin: f32,
    pub terminal_scale: f32,
    pub on_target_reward: f32,
    pub off_target_reward: f32,

    // === Actions ===
    pub step: f32,
    pub long_step: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            plank_size: PLANK_SIZE,
            ball_size: BALL_SIZE,
            time_step: TIME_STEP,

            v_min: V_MIN,
            v_max: V_MAX,
            angle_min: ANGLE_MIN,
            angle_max: ANGLE_MAX,

            terminal_margin: TERMINAL_MARGIN,
            terminal_scale: TERMINAL_SCALE,
            on_target_reward: ON_TARGET_REWARD,
            off_target_reward: OFF_TARGET_REWARD,

            step: STEP,
            long_step: LONG_STEP,
        }
    }
}

impl Params {
    /// Reject parameter sets that would leave a range empty
    pub fn validate(&self) -> Result<(), SimError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(SimError::InvalidParams("screen dimensions must be positive"));
        }
        if self.plank_size <= 0.0 || self.plank_size >= self.screen_width {
            return Err(SimError::InvalidParams("plank must be narrower than the screen"));
        }
        if self.ball_size <= 0.0 || self.ball_size >= self.screen_width {
            return Err(SimError::InvalidParams("ball must be narrower than the screen"));
        }
        if self.time_step <= 0.0 {
            return Err(SimError::InvalidParams("time step must be positive"));
        }
        if self.v_min > self.v_max {
            return Err(SimError::InvalidParams("v_min exceeds v_max"));
        }
        if self.angle_min > self.angle_max {
            return Err(SimError::InvalidParams("angle_min exceeds angle_max"));
        }
        if self.terminal_margin < 0.0 || self.terminal_margin >= self.screen_height {
            return Err(SimError::InvalidParams("terminal margin outside the screen"));
        }
        Ok(())
    }
}

/// Read-only bounds consumed by every part of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub plank_half_width: f32,
    pub ball_half_size: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Legal range for the plank center
    pub x_min: f32,
    pub x_max: f32,
    /// Legal horizontal range for the ball center
    pub ball_min: f32,
    pub ball_max: f32,
    pub v_min: f32,
    pub v_max: f32,
    pub angle_min: f32,
    pub angle_max: f32,
    pub time_step: f32,
    /// Ball height past which the episode is over
    pub terminal_y: f32,
}

impl Constraints {
    pub fn from_params(params: &Params) -> Result<Self, SimError> {
        params.validate()?;
        Ok(Self::derive(params))
    }

    fn derive(params: &Params) -> Self {
        let plank_half_width = params.plank_size / 2.0;
        let ball_half_size = params.ball_size / 2.0;

        Self {
            plank_half_width,
            ball_half_size,
            screen_width: params.screen_width,
            screen_height: params.screen_height,
            x_min: plank_half_width,
            x_max: params.screen_width - plank_half_width,
            ball_min: ball_half_size,
            ball_max: params.screen_width - ball_half_size,
            v_min: params.v_min,
            v_max: params.v_max,
            angle_min: params.angle_min,
            angle_max: params.angle_max,
            time_step: params.time_step,
            terminal_y: params.screen_height - params.terminal_margin,
        }
    }

    /// Whether beams redraw the heading
    pub fn angle_enabled(&self) -> bool {
        self.angle_max > self.angle_min
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::derive(&Params::default())
    }
}
