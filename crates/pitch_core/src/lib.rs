//! # pitch_core - Deterministic football pitch physics and set-piece engine
//!
//! This library resolves football actions geometrically and records one
//! training event per action.
//!
//! ## Features
//! - Ray-cast pass interception (point-to-segment distance, stable tie-breaks)
//! - Boundary detection with last-touch attribution (corner / goal kick / throw-in)
//! - Deterministic set-piece repositioning
//! - Append-only event log for training pipelines, JSON API, parallel batches
//!
//! ## Example
//! ```rust
//! use pitch_core::{create_sample_team, ActionKind, MatchSimulator, TeamSide};
//!
//! let home = create_sample_team("Home", 11, TeamSide::Home).unwrap();
//! let away = create_sample_team("Away", 11, TeamSide::Away).unwrap();
//! let mut sim = MatchSimulator::new(home, away).unwrap();
//!
//! let event = sim.simulate_step(ActionKind::Pass, Some((60.0, 40.0))).unwrap();
//! assert_eq!(sim.get_training_data().len(), 1);
//! assert_eq!(sim.get_training_data()[0], event);
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod training;

pub use api::{
    event_schema_json, simulate_script, simulate_script_json, ScriptRequest, ScriptResponse,
};
pub use engine::ball::Ball;
pub use engine::config::{EngagementConfig, RestartPolicy, SimConfig};
pub use engine::coordinates::MeterPos;
pub use engine::events::{ActionKind, Event, PlayerRef, SetPieceAward, StepResult};
pub use engine::match_sim::MatchSimulator;
pub use engine::physics::{
    check_interception, distance_point_to_segment, Interception, DEFAULT_INTERCEPTION_RADIUS_M,
};
pub use engine::set_pieces::{BoundaryLine, Exit, GameState, SetPieceManager};
pub use error::{Result, SimError};
pub use models::{create_sample_team, create_sample_team_seeded, Player, Position, Team, TeamSide};
pub use training::{digest_logs, generate_batch, generate_match, MatchLog};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
