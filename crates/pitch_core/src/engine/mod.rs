pub mod ball;
pub mod config; // Tuning values and restart policy
pub mod coordinates;
pub mod events;
pub mod match_sim;
pub mod physics; // Ray-cast interception (pure functions)
pub mod physics_constants;
pub mod set_pieces; // Boundary detection and dead-ball restarts

pub use ball::Ball;
pub use config::{EngagementConfig, RestartPolicy, SimConfig};
pub use events::{ActionKind, Event, PlayerRef, SetPieceAward, StepResult};
pub use match_sim::MatchSimulator;
pub use set_pieces::{GameState, SetPieceManager};
