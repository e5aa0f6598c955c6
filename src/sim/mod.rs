//! Deterministic simulation module
//!
//! All environment logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed transition order (action, clamp, physics, reward, terminal check)
//! - No I/O apart from logging

pub mod action;
pub mod bounds;
pub mod episode;
pub mod physics;
pub mod reward;
pub mod state;
pub mod tick;

pub use action::Action;
pub use bounds::{enforce_bounds, within_bounds};
pub use episode::{ROOT_RANK, Simulation};
pub use physics::step_ball;
pub use reward::{is_terminal, reward};
pub use state::{Phase, RngState, WorldState};
pub use tick::{Transition, tick};
