//! Episode controller
//!
//! `Simulation` owns one worker's world, the snapshot taken before the last
//! action, and the broadcaster used to share resets with the rest of the
//! group.

use rand::Rng;
use rand_pcg::Pcg32;

use super::action::Action;
use super::state::{Phase, RngState, WorldState};
use super::tick::{Transition, tick};
use crate::error::SimError;
use crate::messaging::{Broadcast, Solo};
use crate::params::{Constraints, Params};
use crate::stats::{EpisodeLog, EpisodeRecord};

/// Rank that draws reset states for the whole group
pub const ROOT_RANK: usize = 0;

pub struct Simulation<B: Broadcast = Solo> {
    state: WorldState,
    previous: WorldState,
    constraints: Constraints,
    params: Params,
    rng_state: RngState,
    rng: Pcg32,
    messenger: B,
    phase: Phase,
    /// Completed episodes
    episodes: u64,
    episode_steps: u32,
    episode_return: f32,
    log: EpisodeLog,
}

impl Simulation<Solo> {
    /// Single-worker simulation with default parameters
    pub fn solo(seed: u64) -> Self {
        Self::assemble(
            Params::default(),
            Constraints::default(),
            seed,
            Solo,
            WorldState::default(),
        )
    }
}

impl<B: Broadcast> Simulation<B> {
    /// Start from the default world. Call [`Simulation::init_new_trial`] to
    /// draw a first episode.
    pub fn new(params: Params, seed: u64, messenger: B) -> Result<Self, SimError> {
        let constraints = Constraints::from_params(&params)?;
        Ok(Self::assemble(params, constraints, seed, messenger, WorldState::default()))
    }

    /// Start from an explicit world, e.g. to replay a recorded state
    pub fn from_state(
        params: Params,
        seed: u64,
        messenger: B,
        state: WorldState,
    ) -> Result<Self, SimError> {
        let constraints = Constraints::from_params(&params)?;
        let mut state = state;
        state.refresh_diff();
        Ok(Self::assemble(params, constraints, seed, messenger, state))
    }

    fn assemble(
        params: Params,
        constraints: Constraints,
        seed: u64,
        messenger: B,
        state: WorldState,
    ) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        Self {
            state,
            previous: state,
            constraints,
            params,
            rng_state,
            rng,
            messenger,
            phase: Phase::Running,
            episodes: 0,
            episode_steps: 0,
            episode_return: 0.0,
            log: EpisodeLog::new(),
        }
    }

    /// Apply one action and advance the world by one time step
    pub fn step(&mut self, action: Action) -> Transition {
        if self.phase == Phase::Terminated {
            log::warn!(
                "rank {} stepping a terminated episode; call init_new_trial first",
                self.messenger.rank()
            );
        }

        let (previous, transition) = tick(&mut self.state, action, &self.constraints, &self.params);
        self.previous = previous;
        self.episode_steps += 1;
        self.episode_return += transition.reward;

        if transition.done && self.phase == Phase::Running {
            self.finish_episode(transition);
        }

        transition
    }

    fn finish_episode(&mut self, transition: Transition) {
        self.phase = Phase::Terminated;
        self.episodes += 1;

        let record = EpisodeRecord {
            episode: self.episodes,
            steps: self.episode_steps,
            total_reward: self.episode_return,
            final_reward: transition.reward,
        };
        let rank = self.log.record(record);

        match serde_json::to_string(&transition.state) {
            Ok(json) => log::info!(
                "rank {} episode {} ended after {} steps, return {:.1}: {}",
                self.messenger.rank(),
                record.episode,
                record.steps,
                record.total_reward,
                json
            ),
            Err(e) => log::warn!("could not encode final state: {}", e),
        }
        if let Some(place) = rank {
            log::debug!("episode {} placed #{} on this worker", record.episode, place);
        }
    }

    /// Random beam: draw a new world on the root, share it with the group,
    /// and start a fresh episode.
    ///
    /// Every worker in the group must call this together. If the broadcast
    /// fails the current world is left as it was.
    pub fn init_new_trial(&mut self) -> Result<Transition, SimError> {
        let candidate = self.random_beam();
        let shared = self.messenger.broadcast(candidate, ROOT_RANK)?;

        self.state = shared;
        self.state.refresh_diff();
        self.previous = self.state;
        self.phase = Phase::Running;
        self.episode_steps = 0;
        self.episode_return = 0.0;

        log::debug!(
            "rank {} beam: plank {} ball {} speed {}",
            self.messenger.rank(),
            self.state.x_plank,
            self.state.x_ball,
            self.state.v
        );

        Ok(Transition {
            state: self.state,
            reward: 0.0,
            done: false,
        })
    }

    fn random_beam(&mut self) -> WorldState {
        let c = self.constraints;
        let x_plank = draw(&mut self.rng, c.x_min, c.x_max);
        let x_ball = draw(&mut self.rng, c.ball_min, c.ball_max);
        let v = draw(&mut self.rng, c.v_min, c.v_max);
        let angle = if c.angle_enabled() {
            draw(&mut self.rng, c.angle_min, c.angle_max)
        } else {
            self.state.angle
        };
        WorldState::new(x_plank, x_ball, 0.0, v, angle)
    }

    pub fn get_state(&self) -> WorldState {
        self.state
    }

    /// World as it was before the most recent action
    pub fn previous_state(&self) -> WorldState {
        self.previous
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    pub fn log(&self) -> &EpisodeLog {
        &self.log
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn rank(&self) -> usize {
        self.messenger.rank()
    }
}

/// Whole-number draw from `[lo, hi)`, or `lo` when the range is empty
fn draw(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    let lo_i = lo.ceil() as i64;
    let hi_i = hi.ceil() as i64;
    if hi_i <= lo_i {
        return lo;
    }
    rng.random_range(lo_i..hi_i) as f32
}
