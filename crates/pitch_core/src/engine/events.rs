//! Step events (training data records)
//!
//! One `Event` is produced per `MatchSimulator::simulate_step` call and is
//! never mutated afterwards.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::coordinates::MeterPos;
use super::set_pieces::GameState;
use crate::error::SimError;
use crate::models::TeamSide;

/// Action requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Pass,
    Shoot,
    Dribble,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Pass => "PASS",
            ActionKind::Shoot => "SHOOT",
            ActionKind::Dribble => "DRIBBLE",
        }
    }

    /// Checked against the full ball path for interceptions
    pub fn is_ray_cast(&self) -> bool {
        matches!(self, ActionKind::Pass | ActionKind::Shoot)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PASS" => Ok(ActionKind::Pass),
            "SHOOT" => Ok(ActionKind::Shoot),
            "DRIBBLE" => Ok(ActionKind::Dribble),
            _ => Err(SimError::InvalidAction(s.to_string())),
        }
    }
}

/// Outcome of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepResult {
    Success,
    Intercepted,
    OutOfBounds,
}

/// Identifies a player without borrowing the team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerRef {
    pub side: TeamSide,
    /// Roster index
    pub index: usize,
    pub name: String,
}

/// Restart awarded when the ball left the pitch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SetPieceAward {
    pub state: GameState,
    /// Side taking the restart
    pub awarded_to: TeamSide,
    /// Where the ball crossed the boundary
    pub exit_point: MeterPos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Event {
    /// 0-based position in the event log
    pub step: usize,
    pub action: ActionKind,
    pub result: StepResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interceptor: Option<PlayerRef>,
    /// Ball position after the step
    pub ball_position: MeterPos,
    pub ball_position_before: MeterPos,
    /// Effective target (after clamping)
    pub target: MeterPos,
    pub possession_before: TeamSide,
    pub possession_after: TeamSide,
    /// Dead-ball state this action restarted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_from: Option<GameState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_piece: Option<SetPieceAward>,
    /// Game state after the step
    pub game_state: GameState,
}

impl Event {
    pub fn is_turnover(&self) -> bool {
        self.possession_before != self.possession_after
    }
}
