//! Ball state
//!
//! The ball carries no flight model: every action resolves instantly to an
//! end position, so the ball is just a position plus the possessing side.

use serde::{Deserialize, Serialize};

use super::coordinates::MeterPos;
use super::physics_constants::kickoff;
use crate::models::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: MeterPos,
    /// Side credited with control of the ball
    pub possession: TeamSide,
}

impl Ball {
    /// Ball on the center spot with `side` kicking off
    pub fn kickoff(side: TeamSide) -> Self {
        Self { position: kickoff::BALL_POSITION, possession: side }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::kickoff(TeamSide::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_creation() {
        let ball = Ball::default();
        assert_eq!(ball.position, (52.5, 34.0));
        assert_eq!(ball.possession, TeamSide::Home);

        assert_eq!(Ball::kickoff(TeamSide::Away).possession, TeamSide::Away);
    }
}
