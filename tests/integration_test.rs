use std::thread;

use plank_bounce::policy::{Policy, RandomPolicy, TrackBall, run_episode};
use plank_bounce::sim::within_bounds;
use plank_bounce::*;
use proptest::prelude::*;

fn from(state: WorldState) -> Simulation {
    Simulation::from_state(Params::default(), 1, Solo, state).unwrap()
}

fn centered() -> WorldState {
    WorldState::new(240.0, 240.0, 0.0, 100.0, 0.0)
}

#[test]
fn test_stay_on_target() {
    let mut sim = from(centered());
    let t = sim.step(Action::Stay);

    assert_eq!(t.state.y_ball, 50.0);
    assert_eq!(t.state.x_ball, 240.0);
    assert_eq!(t.state.diff, 0.0);
    assert_eq!(t.reward, 50.0);
    assert!(!t.done);
}

#[test]
fn test_move_right_opens_gap() {
    let mut sim = from(centered());
    let t = sim.step(Action::MoveRight);

    assert_eq!(t.state.x_plank, 210.0);
    assert_eq!(t.state.diff, 30.0);
    assert_eq!(t.reward, -30.0);
    assert!(!t.done);
}

#[test]
fn test_reaching_bottom_scales_reward() {
    let mut sim = from(centered());
    let c = *sim.constraints();
    let p = sim.params().clone();

    loop {
        let previous = sim.get_state();
        let t = sim.step(Action::MoveLeft);
        let raw = plank_bounce::sim::reward(&previous, &t.state, &c, &p);
        if t.done {
            assert!(t.state.y_ball > 630.0);
            assert_eq!(t.reward, raw * 1.5);
            break;
        }
        assert_eq!(t.reward, raw);
    }
    assert_eq!(sim.phase(), Phase::Terminated);
    assert_eq!(sim.episodes(), 1);
}

#[test]
fn test_new_trial() {
    let mut sim = Simulation::solo(77);
    let t = sim.init_new_trial().unwrap();
    assert_eq!(t.reward, 0.0);
    assert!(!t.done);

    let s = sim.get_state();
    assert_eq!(s.y_ball, 0.0);
    assert!(within_bounds(&s, sim.constraints()));
    assert_eq!(s.diff, s.x_ball - s.x_plank);
}

#[test]
fn test_group_workers_share_every_reset() {
    let handles: Vec<_> = ChannelGroup::group(3)
        .into_iter()
        .enumerate()
        .map(|(rank, group)| {
            thread::spawn(move || {
                let mut sim = Simulation::new(Params::default(), rank as u64 * 31, group).unwrap();
                let mut starts = Vec::new();
                for _ in 0..5 {
                    run_episode(&mut sim, &mut TrackBall, 100).unwrap();
                    starts.push(sim.log().last().map(|r| r.steps));
                }
                let mut resets = Vec::new();
                for _ in 0..5 {
                    resets.push(sim.init_new_trial().unwrap().state);
                }
                (starts, resets)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (starts, resets) in &results[1..] {
        assert_eq!(starts, &results[0].0);
        assert_eq!(resets, &results[0].1);
    }
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_move(
        seed in any::<u64>(),
        actions in prop::collection::vec(0usize..5, 1..60),
    ) {
        let mut sim = Simulation::solo(seed);
        sim.init_new_trial().unwrap();
        let c = *sim.constraints();

        for index in actions {
            let action = Action::from_index(index).unwrap();
            let t = sim.step(action);
            prop_assert!(c.x_min <= t.state.x_plank && t.state.x_plank <= c.x_max);
            prop_assert!(c.ball_min <= t.state.x_ball && t.state.x_ball <= c.ball_max);
            prop_assert_eq!(t.state.diff, t.state.x_ball - t.state.x_plank);
            if t.done {
                sim.init_new_trial().unwrap();
            }
        }
    }

    #[test]
    fn prop_termination_is_monotonic(seed in any::<u64>()) {
        let mut sim = Simulation::solo(seed);
        let mut policy = RandomPolicy::new(seed);
        sim.init_new_trial().unwrap();

        let mut seen_done = false;
        for _ in 0..40 {
            let state = sim.get_state();
            let action = policy.select(&state, sim.constraints(), sim.params());
            let t = sim.step(action);
            if seen_done {
                prop_assert!(t.done);
            }
            seen_done |= t.done;
        }
        prop_assert!(seen_done);
    }
}
