//! Scripted scenario JSON API
//!
//! A request describes both teams, an optional config and ball start, and a
//! list of (action token, target) steps. The response carries the full event
//! log plus the final ball state.
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "home": { "name": "Home", "sample": 11 },
//!   "away": { "name": "Away", "players": [
//!     { "name": "Keeper", "position": [100.0, 34.0], "role": "GK" }
//!   ]},
//!   "ball_start": [40.0, 34.0],
//!   "steps": [ { "action": "PASS", "target": [70.0, 34.0] } ]
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::config::SimConfig;
use crate::engine::coordinates::MeterPos;
use crate::engine::events::Event;
use crate::engine::match_sim::MatchSimulator;
use crate::engine::set_pieces::GameState;
use crate::error::{Result, SimError};
use crate::models::{
    create_sample_team, create_sample_team_seeded, Player, Position, Team, TeamSide,
};
use crate::SCHEMA_VERSION;

/// Scenario request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub schema_version: u8,
    /// Defaults to `SimConfig::default()`
    #[serde(default)]
    pub config: Option<SimConfig>,
    pub home: TeamSpec,
    pub away: TeamSpec,
    /// Defaults to the center spot
    #[serde(default)]
    pub ball_start: Option<MeterPos>,
    /// Defaults to home
    #[serde(default)]
    pub possession: Option<TeamSide>,
    pub steps: Vec<StepSpec>,
}

/// Either a generated sample team or an explicit roster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamSpec {
    Sample {
        name: String,
        /// Number of players (1..=11)
        sample: usize,
        /// Seeded jitter; plain formation when absent
        #[serde(default)]
        seed: Option<u64>,
    },
    Roster {
        name: String,
        players: Vec<PlayerSpec>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub position: MeterPos,
    pub role: Position,
    #[serde(default)]
    pub interception_skill: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    /// "PASS", "SHOOT" or "DRIBBLE"
    pub action: String,
    #[serde(default)]
    pub target: Option<MeterPos>,
}

/// Scenario response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub schema_version: u8,
    pub events: Vec<Event>,
    pub final_ball: MeterPos,
    pub final_possession: TeamSide,
    pub final_game_state: GameState,
}

impl TeamSpec {
    pub fn build(&self, side: TeamSide) -> Result<Team> {
        match self {
            TeamSpec::Sample { name, sample, seed: Some(seed) } => {
                create_sample_team_seeded(name, *sample, side, *seed)
            }
            TeamSpec::Sample { name, sample, seed: None } => {
                create_sample_team(name, *sample, side)
            }
            TeamSpec::Roster { name, players } => {
                let players = players
                    .iter()
                    .map(|spec| {
                        let player = Player::new(spec.name.clone(), spec.position, spec.role);
                        match spec.interception_skill {
                            Some(skill) => player.with_interception_skill(skill),
                            None => player,
                        }
                    })
                    .collect();
                Team::new(name.clone(), side, players)
            }
        }
    }
}

/// Run a scenario.
///
/// Stops at the first failing step and returns its error.
pub fn simulate_script(request: &ScriptRequest) -> Result<ScriptResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::Configuration(format!(
            "Unsupported schema version: {}",
            request.schema_version
        )));
    }

    let home = request.home.build(TeamSide::Home)?;
    let away = request.away.build(TeamSide::Away)?;
    let config = request.config.clone().unwrap_or_default();
    let mut sim = MatchSimulator::with_config(home, away, config)?;

    if let Some(pos) = request.ball_start {
        sim.set_ball_position(pos);
    }
    if let Some(side) = request.possession {
        sim.set_possession(side);
    }

    for step in &request.steps {
        sim.simulate_step_str(&step.action, step.target)?;
    }

    debug!("Script finished after {} steps", request.steps.len());

    Ok(ScriptResponse {
        schema_version: SCHEMA_VERSION,
        events: sim.get_training_data().to_vec(),
        final_ball: sim.ball().position,
        final_possession: sim.possession(),
        final_game_state: sim.game_state(),
    })
}

/// JSON in, JSON out
pub fn simulate_script_json(request_json: &str) -> Result<String> {
    let request: ScriptRequest = serde_json::from_str(request_json)?;
    let response = simulate_script(&request)?;
    Ok(serde_json::to_string(&response)?)
}

/// JSON schema of a single `Event`
pub fn event_schema_json() -> Result<String> {
    let schema = schemars::schema_for!(Event);
    Ok(serde_json::to_string_pretty(&schema)?)
}
