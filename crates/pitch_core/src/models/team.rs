use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::Player;
use crate::engine::coordinates::{self, MeterPos};
use crate::engine::physics_constants::field;
use crate::error::{Result, SimError};

/// Which end of the pitch a team defends.
///
/// Home defends the x = 0 goal line and attacks toward x = 105; Away the
/// opposite. Also used as the weak reference for possession and last touch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Attacking toward higher X
    #[inline]
    pub const fn attacks_right(self) -> bool {
        matches!(self, TeamSide::Home)
    }

    /// X coordinate of the goal line this side defends
    #[inline]
    pub const fn own_goal_line_x(self) -> f32 {
        match self {
            TeamSide::Home => 0.0,
            TeamSide::Away => field::LENGTH_M,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TeamSide::Home => write!(f, "HOME"),
            TeamSide::Away => write!(f, "AWAY"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    pub side: TeamSide,
    /// Roster order is stable and breaks ties deterministically
    pub players: Vec<Player>,
}

impl Team {
    /// Build a validated team.
    ///
    /// Fails on an empty roster, duplicate player names, or an invalid player.
    pub fn new(name: impl Into<String>, side: TeamSide, players: Vec<Player>) -> Result<Self> {
        let team = Self { name: name.into(), side, players };
        team.validate()?;
        Ok(team)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SimError::Configuration("team name must not be empty".to_string()));
        }
        if self.players.is_empty() {
            return Err(SimError::Configuration(format!("team {} has an empty roster", self.name)));
        }

        let mut names = HashSet::new();
        for player in &self.players {
            player.validate()?;
            if !names.insert(player.name.as_str()) {
                return Err(SimError::Configuration(format!(
                    "team {} has duplicate player name {}",
                    self.name, player.name
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// First goalkeeper in roster order
    pub fn goalkeeper_index(&self) -> Option<usize> {
        self.players.iter().position(|p| p.role.is_goalkeeper())
    }

    /// Restore every player to the constructed position
    pub fn reset_to_anchors(&mut self) {
        self.players.iter_mut().for_each(Player::return_to_anchor);
    }

    /// Nearest outfield player to `pos` (goalkeeper only if nobody else exists).
    ///
    /// Exact ties go to the earlier roster slot.
    pub fn nearest_outfield_index(&self, pos: MeterPos) -> Option<usize> {
        let nearest = |outfield_only: bool| {
            let mut best: Option<(usize, f32)> = None;
            for (idx, player) in self.players.iter().enumerate() {
                if outfield_only && player.role.is_goalkeeper() {
                    continue;
                }
                let dist = coordinates::distance_m(player.position, pos);
                if best.map_or(true, |(_, d)| dist < d) {
                    best = Some((idx, dist));
                }
            }
            best.map(|(idx, _)| idx)
        };

        nearest(true).or_else(|| nearest(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    #[test]
    fn test_team_creation() {
        let players = vec![
            Player::new("P1", (10.0, 20.0), Position::MF),
            Player::new("P2", (30.0, 40.0), Position::MF),
        ];
        let team = Team::new("TestTeam", TeamSide::Home, players).unwrap();

        assert_eq!(team.name, "TestTeam");
        assert_eq!(team.len(), 2);
        assert_eq!(team.find("P2").map(|p| p.position), Some((30.0, 40.0)));
    }

    #[test]
    fn test_empty_roster_is_configuration_error() {
        let err = Team::new("Nobody", TeamSide::Home, vec![]).unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let players = vec![
            Player::new("Twin", (10.0, 20.0), Position::MF),
            Player::new("Twin", (30.0, 40.0), Position::MF),
        ];
        assert!(Team::new("Twins FC", TeamSide::Away, players).is_err());
    }

    #[test]
    fn test_side_geometry() {
        assert_eq!(TeamSide::Home.opponent(), TeamSide::Away);
        assert_eq!(TeamSide::Away.own_goal_line_x(), 105.0);
        assert!(TeamSide::Home.attacks_right());
        assert_eq!(serde_json::to_string(&TeamSide::Away).unwrap(), "\"AWAY\"");
    }

    #[test]
    fn test_nearest_outfield_skips_keeper() {
        let players = vec![
            Player::new("GK", (1.0, 1.0), Position::GK),
            Player::new("Far", (20.0, 20.0), Position::DF),
            Player::new("Near", (10.0, 10.0), Position::DF),
        ];
        let team = Team::new("T", TeamSide::Home, players).unwrap();
        assert_eq!(team.nearest_outfield_index((0.0, 0.0)), Some(2));

        let keeper_only =
            Team::new("K", TeamSide::Home, vec![Player::new("GK", (1.0, 1.0), Position::GK)])
                .unwrap();
        assert_eq!(keeper_only.nearest_outfield_index((0.0, 0.0)), Some(0));
    }
}
