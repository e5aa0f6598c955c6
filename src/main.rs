use std::thread;
use std::time::Duration;

use serde::Serialize;

use plank_bounce::policy::{TrackBall, run_episode};
use plank_bounce::stats::EpisodeRecord;
use plank_bounce::{ChannelGroup, Params, SimError, Simulation};

/// Cooperating workers in the demo group
const WORKERS: usize = 4;
/// Episodes each worker plays
const EPISODES: u32 = 20;
/// Safety cap on actions per episode
const MAX_STEPS: u32 = 500;
/// How long a worker waits on the group before giving up
const BROADCAST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct WorkerSummary {
    rank: usize,
    seed: u64,
    episodes: u64,
    mean_return: Option<f32>,
    best: Option<EpisodeRecord>,
}

fn run_worker(group: ChannelGroup, seed: u64) -> Result<WorkerSummary, SimError> {
    let group = group.with_timeout(BROADCAST_TIMEOUT);
    let mut sim = Simulation::new(Params::default(), seed, group)?;
    let mut policy = TrackBall;

    for _ in 0..EPISODES {
        let rollout = run_episode(&mut sim, &mut policy, MAX_STEPS)?;
        if !rollout.terminated {
            log::warn!("rank {} episode truncated after {} steps", sim.rank(), rollout.steps);
        }
    }

    Ok(WorkerSummary {
        rank: sim.rank(),
        seed: sim.seed(),
        episodes: sim.episodes(),
        mean_return: sim.log().mean_recent_return(),
        best: sim.log().best().first().copied(),
    })
}

fn main() {
    env_logger::init();
    log::info!("Plank Bounce starting {} workers...", WORKERS);

    let handles: Vec<_> = ChannelGroup::group(WORKERS)
        .into_iter()
        .enumerate()
        .map(|(rank, group)| {
            let seed = 1000 + rank as u64;
            thread::spawn(move || run_worker(group, seed))
        })
        .collect();

    let mut failed = false;
    for (rank, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok(summary)) => match serde_json::to_string(&summary) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("rank {} summary not encodable: {}", rank, e),
            },
            Ok(Err(e)) => {
                log::error!("rank {} failed: {}", rank, e);
                failed = true;
            }
            Err(_) => {
                log::error!("rank {} panicked", rank);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
