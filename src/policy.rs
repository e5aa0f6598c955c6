//! Reference drivers
//!
//! Fixed action-selection rules for exercising the environment. None of
//! them learn; they exist to drive demos and smoke tests.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::messaging::Broadcast;
use crate::params::{Constraints, Params};
use crate::sim::{Action, RngState, Simulation, WorldState};

pub trait Policy {
    fn select(&mut self, state: &WorldState, constraints: &Constraints, params: &Params) -> Action;
}

/// Greedy tracker: picks the action that leaves the plank closest to where
/// the ball will be after the next step
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackBall;

impl TrackBall {
    /// Candidates in preference order; ties go to the smaller move
    const CANDIDATES: [Action; 5] = [
        Action::Stay,
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveLeftLong,
        Action::MoveRightLong,
    ];
}

impl Policy for TrackBall {
    fn select(&mut self, state: &WorldState, constraints: &Constraints, params: &Params) -> Action {
        // Predict where the ball lands horizontally after clamp + step
        let ball_x = state.x_ball.clamp(constraints.ball_min, constraints.ball_max)
            + state.heading().x * state.v * constraints.time_step;

        let gap = |action: &Action| {
            let plank = (state.x_plank + action.plank_delta(params))
                .clamp(constraints.x_min, constraints.x_max);
            (ball_x - plank).abs()
        };

        Self::CANDIDATES
            .iter()
            .copied()
            .min_by(|a, b| gap(a).partial_cmp(&gap(b)).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(Action::Stay)
    }
}

/// Uniform choice over the action palette
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RngState::new(seed).to_rng(),
        }
    }
}

impl Policy for RandomPolicy {
    fn select(&mut self, _: &WorldState, _: &Constraints, _: &Params) -> Action {
        Action::ALL[self.rng.random_range(0..Action::ALL.len())]
    }
}

/// Outcome of one driven episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rollout {
    pub steps: u32,
    pub total_reward: f32,
    /// False when `max_steps` ran out first
    pub terminated: bool,
}

/// Beam a fresh episode and drive it with `policy` until it ends or
/// `max_steps` actions have been taken.
///
/// Every worker of a group must call this in lockstep, since the beam is a
/// collective operation.
pub fn run_episode<B: Broadcast, P: Policy>(
    sim: &mut Simulation<B>,
    policy: &mut P,
    max_steps: u32,
) -> Result<Rollout, SimError> {
    sim.init_new_trial()?;

    let mut rollout = Rollout {
        steps: 0,
        total_reward: 0.0,
        terminated: false,
    };
    while rollout.steps < max_steps {
        let state = sim.get_state();
        let action = policy.select(&state, sim.constraints(), sim.params());
        let t = sim.step(action);
        rollout.steps += 1;
        rollout.total_reward += t.reward;
        if t.done {
            rollout.terminated = true;
            break;
        }
    }
    Ok(rollout)
}
