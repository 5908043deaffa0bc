//! Seeded training-data generation
//!
//! Drives independent matches with a ChaCha8 caller that picks actions and
//! targets around the ball. This is a data driver, not a tactics model: it
//! only needs to cover the event space (passes, shots, dribbles, turnovers
//! and every restart) reproducibly.
//!
//! Matches share nothing, so batches run in parallel with rayon and come
//! back in seed order.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::engine::config::{RestartPolicy, SimConfig};
use crate::engine::coordinates::{self, MeterPos};
use crate::engine::events::{ActionKind, Event};
use crate::engine::match_sim::MatchSimulator;
use crate::engine::physics_constants::field;
use crate::error::Result;
use crate::models::{create_sample_team_seeded, TeamSide, MAX_PLAYERS};

/// Max distance a generated pass target lies from the ball (per axis)
const PASS_RANGE_M: f32 = 25.0;
/// Shots land up to this far behind the goal line
const SHOT_OVERSHOOT_M: f32 = 8.0;
/// Lateral spread of shot targets around the goal center
const SHOT_SPREAD_M: f32 = 20.0;
/// Decorrelates the away roster seed from the home one
const AWAY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Event log of one generated match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLog {
    pub seed: u64,
    pub events: Vec<Event>,
}

/// Play `steps` generated actions with full sample teams.
///
/// Same seed and config, same log.
pub fn generate_match(seed: u64, steps: usize, config: &SimConfig) -> Result<MatchLog> {
    let home = create_sample_team_seeded("Home", MAX_PLAYERS, TeamSide::Home, seed)?;
    let away =
        create_sample_team_seeded("Away", MAX_PLAYERS, TeamSide::Away, seed ^ AWAY_SEED_SALT)?;
    let mut sim = MatchSimulator::with_config(home, away, config.clone())?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for _ in 0..steps {
        let (action, target) = pick_action(&mut rng, &sim);
        sim.simulate_step(action, Some(target))?;
    }

    debug!("Generated match seed={} with {} events", seed, steps);

    Ok(MatchLog { seed, events: sim.get_training_data().to_vec() })
}

/// Generate one match per seed in parallel; output follows `seeds` order.
pub fn generate_batch(seeds: &[u64], steps: usize, config: &SimConfig) -> Result<Vec<MatchLog>> {
    config.validate()?;

    seeds.par_iter().map(|&seed| generate_match(seed, steps, config)).collect()
}

/// SHA-256 over the serialized logs, for reproducibility checks
pub fn digest_logs(logs: &[MatchLog]) -> Result<String> {
    let bytes = serde_json::to_vec(logs)?;
    Ok(sha256_hex(&bytes))
}

#[inline]
fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn pick_action(rng: &mut ChaCha8Rng, sim: &MatchSimulator) -> (ActionKind, MeterPos) {
    // A held restart must be taken with a pass or a shot
    let restart_held = sim.game_state().is_dead_ball()
        && sim.config().restart_policy == RestartPolicy::HoldUntilRestart;
    let choices = if restart_held { 2 } else { 3 };

    let action = match rng.gen_range(0..choices) {
        0 => ActionKind::Pass,
        1 => ActionKind::Shoot,
        _ => ActionKind::Dribble,
    };

    let ball = sim.ball().position;
    let target = match action {
        ActionKind::Shoot => {
            let depth = field::LENGTH_M + rng.gen_range(0.0..SHOT_OVERSHOOT_M);
            (
                coordinates::x_to_world_m(depth, sim.possession().attacks_right()),
                field::CENTER_Y + rng.gen_range(-SHOT_SPREAD_M..SHOT_SPREAD_M),
            )
        }
        ActionKind::Pass => scatter(rng, ball, PASS_RANGE_M),
        ActionKind::Dribble => scatter(rng, ball, sim.config().engagement.dribble_stride_m),
    };

    (action, target)
}

fn scatter(rng: &mut ChaCha8Rng, around: MeterPos, range: f32) -> MeterPos {
    (around.0 + rng.gen_range(-range..range), around.1 + rng.gen_range(-range..range))
}
