//! Sample team construction
//!
//! Builds a conventional line-up: one goalkeeper, up to four defenders,
//! up to three midfielders and the remaining players as forwards.
//! The plain builder is fully deterministic; the seeded builder adds a
//! reproducible ChaCha8 jitter on top of the same layout.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{Player, Position, Team, TeamSide};
use crate::engine::coordinates::{self, MeterPos};
use crate::engine::physics_constants::field;
use crate::error::{Result, SimError};

/// Max players per side on the pitch
pub const MAX_PLAYERS: usize = 11;

const MAX_DEFENDERS: usize = 4;
const MAX_MIDFIELDERS: usize = 3;

/// TeamView depth (from own goal line) and lateral spacing per line
const GK_DEPTH_M: f32 = 5.0;
const DF_LINE: (f32, f32) = (20.0, 14.0);
const MF_LINE: (f32, f32) = (38.0, 16.0);
const FW_LINE: (f32, f32) = (48.0, 16.0);

const JITTER_M: f32 = 3.0;

/// Create a sample team with a deterministic formation.
///
/// `num_players` must be within `1..=11`.
pub fn create_sample_team(name: &str, num_players: usize, side: TeamSide) -> Result<Team> {
    let players = layout(name, num_players, side)?
        .into_iter()
        .map(|(player_name, pos, role)| Player::new(player_name, pos, role))
        .collect();

    Team::new(name, side, players)
}

/// Create a sample team with seeded positional jitter and interception skills.
///
/// Same seed, same team.
pub fn create_sample_team_seeded(
    name: &str,
    num_players: usize,
    side: TeamSide,
    seed: u64,
) -> Result<Team> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let players = layout(name, num_players, side)?
        .into_iter()
        .map(|(player_name, pos, role)| {
            if role.is_goalkeeper() {
                return Player::new(player_name, pos, role);
            }
            let jittered = coordinates::clamp_to_pitch((
                pos.0 + rng.gen_range(-JITTER_M..JITTER_M),
                pos.1 + rng.gen_range(-JITTER_M..JITTER_M),
            ));
            Player::new(player_name, jittered, role)
                .with_interception_skill(rng.gen_range(0.3f32..0.8))
        })
        .collect();

    Team::new(name, side, players)
}

fn layout(
    name: &str,
    num_players: usize,
    side: TeamSide,
) -> Result<Vec<(String, MeterPos, Position)>> {
    if num_players == 0 || num_players > MAX_PLAYERS {
        return Err(SimError::Configuration(format!(
            "sample team {} needs 1..={} players, got {}",
            name, MAX_PLAYERS, num_players
        )));
    }

    let outfield = num_players - 1;
    let defenders = outfield.min(MAX_DEFENDERS);
    let midfielders = (outfield - defenders).min(MAX_MIDFIELDERS);
    let forwards = outfield - defenders - midfielders;

    let attacks_right = side.attacks_right();
    let mut players = Vec::with_capacity(num_players);

    players.push((
        format!("{}_GK", name),
        (coordinates::x_to_world_m(GK_DEPTH_M, attacks_right), field::CENTER_Y),
        Position::GK,
    ));

    for i in 0..outfield {
        let (role, (depth, spacing), k, n) = if i < defenders {
            (Position::DF, DF_LINE, i, defenders)
        } else if i < defenders + midfielders {
            (Position::MF, MF_LINE, i - defenders, midfielders)
        } else {
            (Position::FW, FW_LINE, i - defenders - midfielders, forwards)
        };

        let pos = (
            coordinates::x_to_world_m(depth, attacks_right),
            coordinates::spread_y(field::CENTER_Y, k, n, spacing),
        );
        players.push((format!("{}_P{}", name, i + 1), pos, role));
    }

    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sample_team() {
        let team = create_sample_team("Arsenal", 11, TeamSide::Home).unwrap();

        assert_eq!(team.name, "Arsenal");
        assert_eq!(team.len(), 11);

        let keepers: Vec<_> = team.players.iter().filter(|p| p.role.is_goalkeeper()).collect();
        assert_eq!(keepers.len(), 1);
        assert_eq!(keepers[0].position, (5.0, 34.0));

        let defenders = team.players.iter().filter(|p| p.role == Position::DF).count();
        let midfielders = team.players.iter().filter(|p| p.role == Position::MF).count();
        let forwards = team.players.iter().filter(|p| p.role == Position::FW).count();
        assert_eq!((defenders, midfielders, forwards), (4, 3, 3));
    }

    #[test]
    fn test_away_team_is_mirrored() {
        let home = create_sample_team("Home", 11, TeamSide::Home).unwrap();
        let away = create_sample_team("Away", 11, TeamSide::Away).unwrap();

        for (h, a) in home.players.iter().zip(&away.players) {
            assert!((h.position.0 - (field::LENGTH_M - a.position.0)).abs() < 1e-4);
            assert_eq!(h.position.1, a.position.1);
        }
        assert_eq!(away.players[0].position, (100.0, 34.0));
    }

    #[test]
    fn test_player_count_bounds() {
        assert!(matches!(
            create_sample_team("None", 0, TeamSide::Home),
            Err(SimError::Configuration(_))
        ));
        assert!(create_sample_team("Crowd", 12, TeamSide::Home).is_err());

        let solo = create_sample_team("Solo", 1, TeamSide::Home).unwrap();
        assert_eq!(solo.players[0].name, "Solo_GK");
    }

    #[test]
    fn test_small_team_roles() {
        let team = create_sample_team("Five", 5, TeamSide::Away).unwrap();
        assert_eq!(team.players[0].role, Position::GK);
        assert!(team.players[1..].iter().all(|p| p.role == Position::DF));
    }

    #[test]
    fn test_seeded_team_is_reproducible() {
        let a = create_sample_team_seeded("Home", 11, TeamSide::Home, 7).unwrap();
        let b = create_sample_team_seeded("Home", 11, TeamSide::Home, 7).unwrap();
        let c = create_sample_team_seeded("Home", 11, TeamSide::Home, 8).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        for player in a.players.iter().filter(|p| !p.role.is_goalkeeper()) {
            assert!((0.3..0.8).contains(&player.interception_skill));
            assert!(coordinates::is_inside_pitch(player.position));
        }
    }
}
