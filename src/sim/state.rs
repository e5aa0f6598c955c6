//! World state and core simulation types
//!
//! Everything a cooperating worker needs to resume an episode lives in
//! `WorldState`, which is why it is `Copy` and serializable.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::START_X;

/// Episode phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Ball still falling
    #[default]
    Running,
    /// Ball reached the bottom; waiting for a beam
    Terminated,
}

/// Ball and plank positions for one worker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Plank center (horizontal)
    pub x_plank: f32,
    pub x_ball: f32,
    /// Ball height, growing toward the bottom of the screen
    pub y_ball: f32,
    /// Ball speed
    pub v: f32,
    /// Heading in degrees, measured from vertical
    pub angle: f32,
    /// `x_ball - x_plank`; negative when the ball is left of the plank
    pub diff: f32,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(START_X, START_X, 0.0, 0.0, 0.0)
    }
}

impl WorldState {
    pub fn new(x_plank: f32, x_ball: f32, y_ball: f32, v: f32, angle: f32) -> Self {
        Self {
            x_plank,
            x_ball,
            y_ball,
            v,
            angle,
            diff: x_ball - x_plank,
        }
    }

    /// Recompute the derived offset after positions changed
    pub fn refresh_diff(&mut self) {
        self.diff = self.x_ball - self.x_plank;
    }

    /// Unsigned horizontal distance between ball and plank centers
    pub fn distance(&self) -> f32 {
        (self.x_ball - self.x_plank).abs()
    }

    pub fn ball_pos(&self) -> Vec2 {
        Vec2::new(self.x_ball, self.y_ball)
    }

    /// Unit vector of the ball's travel direction
    pub fn heading(&self) -> Vec2 {
        let rads = self.angle.to_radians();
        Vec2::new(rads.sin(), rads.cos())
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
