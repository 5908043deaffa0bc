//! Match Simulator
//!
//! Owns the full state of one match and resolves one caller-supplied action
//! per step:
//!
//! ```text
//! simulate_step(action, target)
//!     │
//!     ├─► physics::check_interception   (PASS / SHOOT: full path,
//!     │                                  DRIBBLE: arrival point only)
//!     │        └─ intercepted → possession flips, ball to interceptor
//!     │
//!     ├─► ball moves to the effective target
//!     │
//!     ├─► SetPieceManager::check_exit    (first boundary crossed)
//!     │        └─ out → resolve_set_piece, possession to awarded side
//!     │
//!     └─► Event appended to the log and returned
//! ```
//!
//! There is no global state: every simulator carries its own `SimConfig`,
//! so independent instances can run on separate threads.

mod step;

use log::debug;

use super::ball::Ball;
use super::config::SimConfig;
use super::coordinates::{self, MeterPos};
use super::events::Event;
use super::set_pieces::{GameState, SetPieceManager};
use crate::error::{Result, SimError};
use crate::models::{Team, TeamSide};

#[derive(Debug, Clone)]
pub struct MatchSimulator {
    home: Team,
    away: Team,
    ball: Ball,
    set_pieces: SetPieceManager,
    config: SimConfig,
    events: Vec<Event>,
}

impl MatchSimulator {
    /// New match with the default config; home kicks off from the center spot.
    pub fn new(home: Team, away: Team) -> Result<Self> {
        Self::with_config(home, away, SimConfig::default())
    }

    pub fn with_config(home: Team, away: Team, config: SimConfig) -> Result<Self> {
        config.validate()?;
        home.validate()?;
        away.validate()?;

        if home.side != TeamSide::Home {
            return Err(SimError::Configuration(format!(
                "home team {} is configured as {}",
                home.name, home.side
            )));
        }
        if away.side != TeamSide::Away {
            return Err(SimError::Configuration(format!(
                "away team {} is configured as {}",
                away.name, away.side
            )));
        }

        debug!(
            "New match {} ({} players) vs {} ({} players)",
            home.name,
            home.len(),
            away.name,
            away.len()
        );

        let set_pieces =
            SetPieceManager::new().with_throw_in_clearance(config.engagement.throw_in_clearance_m);

        Ok(Self {
            home,
            away,
            ball: Ball::default(),
            set_pieces,
            config,
            events: Vec::new(),
        })
    }

    // ========== Accessors ==========

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn home(&self) -> &Team {
        &self.home
    }

    pub fn away(&self) -> &Team {
        &self.away
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn possession(&self) -> TeamSide {
        self.ball.possession
    }

    pub fn game_state(&self) -> GameState {
        self.set_pieces.game_state()
    }

    pub fn last_touch(&self) -> TeamSide {
        self.set_pieces.last_touch()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Place the ball for a scenario; the position is clamped onto the pitch.
    pub fn set_ball_position(&mut self, pos: MeterPos) {
        self.ball.position = coordinates::clamp_to_pitch(pos);
    }

    /// Hand possession to `side` without recording an event.
    pub fn set_possession(&mut self, side: TeamSide) {
        self.ball.possession = side;
        self.set_pieces.record_touch(side);
    }

    /// Event log in call order. Repeated calls return identical content.
    pub fn get_training_data(&self) -> &[Event] {
        &self.events
    }

    /// Back to kickoff: ball on the center spot with home possession,
    /// players on their anchors, empty log, open play.
    pub fn reset(&mut self) {
        self.ball = Ball::default();
        self.home.reset_to_anchors();
        self.away.reset_to_anchors();
        self.set_pieces.reset();
        self.events.clear();

        debug!("Match reset to kickoff");
    }
}
