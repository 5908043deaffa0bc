use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::coordinates::{self, MeterPos};
use crate::error::{Result, SimError};

/// Default interception skill for players built without one
pub const DEFAULT_INTERCEPTION_SKILL: f32 = 0.5;

/// Player on the pitch.
///
/// `position` is the live position; `anchor` is where the player was
/// constructed and is restored by `MatchSimulator::reset()` and by
/// goal-kick formation resets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    /// Unique within the team
    pub name: String,
    pub position: MeterPos,
    pub role: Position,
    /// Interception ability, 0.0..=1.0
    #[serde(default = "default_interception_skill")]
    pub interception_skill: f32,
    anchor: MeterPos,
}

fn default_interception_skill() -> f32 {
    DEFAULT_INTERCEPTION_SKILL
}

impl Player {
    pub fn new(name: impl Into<String>, position: MeterPos, role: Position) -> Self {
        Self {
            name: name.into(),
            position,
            role,
            interception_skill: DEFAULT_INTERCEPTION_SKILL,
            anchor: position,
        }
    }

    pub fn with_interception_skill(mut self, skill: f32) -> Self {
        self.interception_skill = skill;
        self
    }

    /// Constructed position
    pub fn anchor(&self) -> MeterPos {
        self.anchor
    }

    /// Move back to the constructed position
    pub fn return_to_anchor(&mut self) {
        self.position = self.anchor;
    }

    /// Check construction invariants
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SimError::Configuration("player name must not be empty".to_string()));
        }
        if !coordinates::is_finite(self.position) || coordinates::is_out_of_bounds_m(self.position)
        {
            return Err(SimError::Configuration(format!(
                "player {} starts off the pitch at ({}, {})",
                self.name, self.position.0, self.position.1
            )));
        }
        if !(0.0..=1.0).contains(&self.interception_skill) {
            return Err(SimError::Configuration(format!(
                "player {} has interception skill {} outside 0..=1",
                self.name, self.interception_skill
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    LB,
    CB,
    RB,
    LWB,
    RWB,
    CDM,
    CM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    CF,
    ST,
    // Generic positions
    #[serde(alias = "DEF")]
    DF,
    #[serde(alias = "MID")]
    MF,
    #[serde(alias = "FWD")]
    FW,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_defender(&self) -> bool {
        matches!(
            self,
            Position::LB
                | Position::CB
                | Position::RB
                | Position::LWB
                | Position::RWB
                | Position::DF
        )
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(
            self,
            Position::CDM
                | Position::CM
                | Position::CAM
                | Position::LM
                | Position::RM
                | Position::MF
        )
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::LW | Position::RW | Position::CF | Position::ST | Position::FW)
    }

    /// Convert specific position to generic position category
    pub fn to_generic_position(&self) -> Position {
        match self {
            Position::GK => Position::GK,
            Position::LB | Position::CB | Position::RB | Position::LWB | Position::RWB => {
                Position::DF
            }
            Position::CDM | Position::CM | Position::CAM | Position::LM | Position::RM => {
                Position::MF
            }
            Position::LW | Position::RW | Position::CF | Position::ST => Position::FW,
            // Already generic positions
            Position::DF | Position::MF | Position::FW => *self,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Position::GK => "GK",
            Position::LB => "LB",
            Position::CB => "CB",
            Position::RB => "RB",
            Position::LWB => "LWB",
            Position::RWB => "RWB",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::LM => "LM",
            Position::RM => "RM",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::CF => "CF",
            Position::ST => "ST",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GK" => Ok(Position::GK),
            "LB" => Ok(Position::LB),
            "CB" => Ok(Position::CB),
            "RB" => Ok(Position::RB),
            "LWB" => Ok(Position::LWB),
            "RWB" => Ok(Position::RWB),
            "CDM" => Ok(Position::CDM),
            "CM" => Ok(Position::CM),
            "CAM" => Ok(Position::CAM),
            "LM" => Ok(Position::LM),
            "RM" => Ok(Position::RM),
            "LW" => Ok(Position::LW),
            "RW" => Ok(Position::RW),
            "CF" => Ok(Position::CF),
            "ST" => Ok(Position::ST),
            "DF" | "DEF" => Ok(Position::DF),
            "MF" | "MID" => Ok(Position::MF),
            "FW" | "FWD" => Ok(Position::FW),
            _ => Err(format!("Invalid position: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new("TestPlayer", (10.0, 20.0), Position::MF);

        assert_eq!(player.name, "TestPlayer");
        assert_eq!(player.position, (10.0, 20.0));
        assert_eq!(player.role, Position::MF);
        assert_eq!(player.interception_skill, 0.5);
        assert_eq!(player.anchor(), (10.0, 20.0));
    }

    #[test]
    fn test_return_to_anchor() {
        let mut player = Player::new("P", (10.0, 20.0), Position::FW);
        player.position = (90.0, 30.0);
        player.return_to_anchor();
        assert_eq!(player.position, (10.0, 20.0));
    }

    #[test]
    fn test_validate_rejects_bad_players() {
        assert!(Player::new("", (10.0, 20.0), Position::MF).validate().is_err());
        assert!(Player::new("Off", (110.0, 20.0), Position::MF).validate().is_err());
        assert!(Player::new("Nan", (f32::NAN, 20.0), Position::MF).validate().is_err());
        assert!(Player::new("Skill", (10.0, 20.0), Position::MF)
            .with_interception_skill(1.5)
            .validate()
            .is_err());
        assert!(Player::new("Ok", (0.0, 68.0), Position::GK).validate().is_ok());
    }

    #[test]
    fn test_position_aliases() {
        assert_eq!("DEF".parse::<Position>(), Ok(Position::DF));
        assert_eq!("mid".parse::<Position>(), Ok(Position::MF));
        assert_eq!("FWD".parse::<Position>(), Ok(Position::FW));
        assert!("XX".parse::<Position>().is_err());

        let role: Position = serde_json::from_str("\"DEF\"").unwrap();
        assert_eq!(role, Position::DF);
        assert_eq!(serde_json::to_string(&Position::CAM).unwrap(), "\"CAM\"");
    }

    #[test]
    fn test_generic_groups() {
        assert_eq!(Position::CB.to_generic_position(), Position::DF);
        assert_eq!(Position::CAM.to_generic_position(), Position::MF);
        assert_eq!(Position::ST.to_generic_position(), Position::FW);
        assert!(Position::RWB.is_defender());
        assert!(Position::GK.is_goalkeeper());
    }
}
