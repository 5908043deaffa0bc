pub mod player;
pub mod sample;
pub mod team;

pub use player::{Player, Position};
pub use sample::{create_sample_team, create_sample_team_seeded, MAX_PLAYERS};
pub use team::{Team, TeamSide};
