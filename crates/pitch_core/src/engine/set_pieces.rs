//! Set piece management (corners, goal kicks, throw-ins)
//!
//! This module contains:
//! - `GameState`, the open-play / dead-ball state machine
//! - Boundary detection with last-touch attribution
//! - Deterministic ball and player placement for each restart
//!
//! Attribution follows the Laws of the Game: the side that did NOT touch the
//! ball last takes the restart. Over a goal line, that is a corner when the
//! defending side of that line touched last, a goal kick otherwise.

use log::info;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::coordinates::{self, MeterPos};
use super::physics_constants::{engagement, field, restart};
use crate::models::{Position, Team, TeamSide};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    #[default]
    OpenPlay,
    Corner,
    GoalKick,
    ThrowIn,
}

impl GameState {
    pub fn is_dead_ball(&self) -> bool {
        !matches!(self, GameState::OpenPlay)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::OpenPlay => "OPEN_PLAY",
            GameState::Corner => "CORNER",
            GameState::GoalKick => "GOAL_KICK",
            GameState::ThrowIn => "THROW_IN",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pitch boundary crossed by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryLine {
    /// x = 0
    HomeGoalLine,
    /// x = 105
    AwayGoalLine,
    /// y = 0
    NearTouchline,
    /// y = 68
    FarTouchline,
}

impl BoundaryLine {
    /// Side defending this line (goal lines only)
    pub fn defended_by(self) -> Option<TeamSide> {
        match self {
            BoundaryLine::HomeGoalLine => Some(TeamSide::Home),
            BoundaryLine::AwayGoalLine => Some(TeamSide::Away),
            BoundaryLine::NearTouchline | BoundaryLine::FarTouchline => None,
        }
    }

    pub fn is_goal_line(self) -> bool {
        self.defended_by().is_some()
    }
}

/// Where and how the ball left the pitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exit {
    pub line: BoundaryLine,
    /// Crossing point on the boundary
    pub point: MeterPos,
}

/// Corner line-ups: (depth from the defended goal line, lateral spacing)
const CORNER_ATTACK_DF: (f32, f32) = (40.0, 14.0);
const CORNER_ATTACK_MF: (f32, f32) = (15.0, 10.0);
const CORNER_ATTACK_FW: (f32, f32) = (7.0, 5.0);
const CORNER_DEFEND_GK: (f32, f32) = (restart::CORNER_KEEPER_DEPTH_M, 0.0);
const CORNER_DEFEND_DF: (f32, f32) = (4.0, 5.0);
const CORNER_DEFEND_MF: (f32, f32) = (field::PENALTY_SPOT_M, 8.0);
const CORNER_DEFEND_FW: (f32, f32) = (30.0, 12.0);

#[derive(Debug, Clone, PartialEq)]
pub struct SetPieceManager {
    game_state: GameState,
    last_touch: TeamSide,
    throw_in_clearance_m: f32,
}

impl Default for SetPieceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SetPieceManager {
    pub fn new() -> Self {
        Self {
            game_state: GameState::OpenPlay,
            last_touch: TeamSide::Home,
            throw_in_clearance_m: engagement::THROW_IN_CLEARANCE_M,
        }
    }

    pub fn with_throw_in_clearance(mut self, clearance_m: f32) -> Self {
        self.throw_in_clearance_m = clearance_m;
        self
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn set_game_state(&mut self, state: GameState) {
        self.game_state = state;
    }

    /// Side that played the ball most recently
    pub fn last_touch(&self) -> TeamSide {
        self.last_touch
    }

    pub fn record_touch(&mut self, side: TeamSide) {
        self.last_touch = side;
    }

    /// Side taking the next restart
    pub fn awarded_side(&self) -> TeamSide {
        self.last_touch.opponent()
    }

    /// Back to kickoff: open play, home touched last
    pub fn reset(&mut self) {
        self.game_state = GameState::OpenPlay;
        self.last_touch = TeamSide::Home;
    }

    /// Classify a ball position.
    ///
    /// Lines belong to the pitch. Goal-line exits are checked first and
    /// attributed with the recorded last touch, so a ball beyond a corner
    /// counts as over the goal line.
    pub fn check_boundaries(&self, ball_x: f32, ball_y: f32) -> GameState {
        if ball_x < 0.0 {
            return self.classify_line(BoundaryLine::HomeGoalLine);
        }
        if ball_x > field::LENGTH_M {
            return self.classify_line(BoundaryLine::AwayGoalLine);
        }
        if ball_y < 0.0 || ball_y > field::WIDTH_M {
            return GameState::ThrowIn;
        }
        GameState::OpenPlay
    }

    /// Restart earned by the ball crossing `line`
    pub fn classify_line(&self, line: BoundaryLine) -> GameState {
        match line.defended_by() {
            None => GameState::ThrowIn,
            Some(defender) if defender == self.last_touch => GameState::Corner,
            Some(_) => GameState::GoalKick,
        }
    }

    /// Find where a ball travelling from `from` to `to` leaves the pitch.
    ///
    /// Returns `None` when `to` is in play. When the path ends beyond a
    /// corner, the boundary crossed first wins (goal line on an exact tie).
    pub fn check_exit(&self, from: MeterPos, to: MeterPos) -> Option<Exit> {
        if coordinates::is_inside_pitch(to) {
            return None;
        }

        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let candidates = [
            (to.0 < 0.0).then(|| (crossing(from.0, dx, 0.0), BoundaryLine::HomeGoalLine)),
            (to.0 > field::LENGTH_M)
                .then(|| (crossing(from.0, dx, field::LENGTH_M), BoundaryLine::AwayGoalLine)),
            (to.1 < 0.0).then(|| (crossing(from.1, dy, 0.0), BoundaryLine::NearTouchline)),
            (to.1 > field::WIDTH_M)
                .then(|| (crossing(from.1, dy, field::WIDTH_M), BoundaryLine::FarTouchline)),
        ];

        let (t, line) = candidates.into_iter().flatten().fold(None, |best, candidate| match best {
            Some((best_t, _)) if best_t <= candidate.0 => best,
            _ => Some(candidate),
        })?;

        let point = coordinates::clamp_to_pitch((from.0 + dx * t, from.1 + dy * t));
        Some(Exit { line, point })
    }

    /// Reposition ball and players for a restart.
    ///
    /// `attacking_team` is the side awarded the restart. Returns the new ball
    /// position, always inside the pitch.
    pub fn resolve_set_piece(
        &self,
        state: GameState,
        exit: MeterPos,
        attacking_team: &mut Team,
        defending_team: &mut Team,
    ) -> MeterPos {
        match state {
            GameState::OpenPlay => coordinates::clamp_to_pitch(exit),
            GameState::Corner => setup_corner(exit, attacking_team, defending_team),
            GameState::GoalKick => setup_goal_kick(attacking_team, defending_team),
            GameState::ThrowIn => {
                setup_throw_in(exit, attacking_team, defending_team, self.throw_in_clearance_m)
            }
        }
    }
}

/// Parametric position (0..=1) where a coordinate reaches `boundary`
fn crossing(start: f32, delta: f32, boundary: f32) -> f32 {
    if delta.abs() <= f32::EPSILON {
        return 0.0;
    }
    ((boundary - start) / delta).clamp(0.0, 1.0)
}

fn setup_corner(exit: MeterPos, attacking: &mut Team, defending: &mut Team) -> MeterPos {
    // The defending side conceded over its own goal line
    let flag_y = if exit.1 <= field::CENTER_Y { 0.0 } else { field::WIDTH_M };
    let ball = (defending.side.own_goal_line_x(), flag_y);
    let reference_attacks_right = defending.side.attacks_right();

    info!(">>> Corner kick to {} at ({:.1}, {:.1})", attacking.name, ball.0, ball.1);

    let taker = corner_taker(attacking);
    arrange_lines(attacking, taker, reference_attacks_right, |role| match role {
        Position::DF => Some(CORNER_ATTACK_DF),
        Position::MF => Some(CORNER_ATTACK_MF),
        Position::FW => Some(CORNER_ATTACK_FW),
        // Goalkeeper stays back
        _ => None,
    });
    if let Some(idx) = taker {
        attacking.players[idx].position = ball;
    }

    arrange_lines(defending, None, reference_attacks_right, |role| match role {
        Position::GK => Some(CORNER_DEFEND_GK),
        Position::DF => Some(CORNER_DEFEND_DF),
        Position::MF => Some(CORNER_DEFEND_MF),
        _ => Some(CORNER_DEFEND_FW),
    });

    ball
}

/// First midfielder, else forward, else defender in roster order
fn corner_taker(team: &Team) -> Option<usize> {
    let first = |pred: fn(&Position) -> bool| team.players.iter().position(|p| pred(&p.role));

    first(Position::is_midfielder)
        .or_else(|| first(Position::is_forward))
        .or_else(|| first(Position::is_defender))
}

fn setup_goal_kick(attacking: &mut Team, defending: &mut Team) -> MeterPos {
    let attacks_right = attacking.side.attacks_right();
    let ball =
        (coordinates::x_to_world_m(restart::GOAL_KICK_SPOT_M, attacks_right), field::CENTER_Y);

    info!(">>> Goal kick to {} at ({:.1}, {:.1})", attacking.name, ball.0, ball.1);

    // Both sides reset to formation
    attacking.reset_to_anchors();
    defending.reset_to_anchors();

    let keeper =
        attacking.goalkeeper_index().or_else(|| attacking.nearest_outfield_index(ball));
    if let Some(idx) = keeper {
        attacking.players[idx].position = ball;
    }

    // Opponents leave the kicking team's penalty area
    let edge = field::PENALTY_AREA_LENGTH_M + restart::GOAL_KICK_CLEARANCE_M;
    let half_width = field::PENALTY_AREA_WIDTH_M / 2.0;
    for player in defending.players.iter_mut() {
        let view_x = coordinates::x_to_team_view_m(player.position.0, attacks_right);
        if view_x < edge && (player.position.1 - field::CENTER_Y).abs() <= half_width {
            player.position.0 = coordinates::x_to_world_m(edge, attacks_right);
        }
    }

    ball
}

fn setup_throw_in(
    exit: MeterPos,
    attacking: &mut Team,
    defending: &mut Team,
    clearance_m: f32,
) -> MeterPos {
    let on_near_touchline = exit.1 <= field::CENTER_Y;
    let ball = (
        exit.0.clamp(0.0, field::LENGTH_M),
        if on_near_touchline { 0.0 } else { field::WIDTH_M },
    );

    info!(">>> Throw-in to {} at ({:.1}, {:.1})", attacking.name, ball.0, ball.1);

    if let Some(idx) = attacking.nearest_outfield_index(ball) {
        attacking.players[idx].position = ball;
    }

    let inward = if on_near_touchline { 1.0 } else { -1.0 };
    for player in defending.players.iter_mut() {
        let dist = coordinates::distance_m(player.position, ball);
        if dist >= clearance_m {
            continue;
        }
        let (ux, uy) = if dist <= f32::EPSILON {
            (0.0, inward)
        } else {
            ((player.position.0 - ball.0) / dist, (player.position.1 - ball.1) / dist)
        };
        player.position =
            coordinates::clamp_to_pitch((ball.0 + ux * clearance_m, ball.1 + uy * clearance_m));
    }

    ball
}

/// Place players on lines measured from a reference goal line.
///
/// `line_for` maps a generic role to (depth, lateral spacing); `None` leaves
/// that role untouched. Players of one role are spread around the center
/// in roster order.
fn arrange_lines<F>(
    team: &mut Team,
    skip: Option<usize>,
    reference_attacks_right: bool,
    line_for: F,
) where
    F: Fn(Position) -> Option<(f32, f32)>,
{
    for group in [Position::GK, Position::DF, Position::MF, Position::FW] {
        let Some((depth, spacing)) = line_for(group) else {
            continue;
        };

        let members: Vec<usize> = team
            .players
            .iter()
            .enumerate()
            .filter(|(idx, p)| Some(*idx) != skip && p.role.to_generic_position() == group)
            .map(|(idx, _)| idx)
            .collect();

        let n = members.len();
        let x = coordinates::x_to_world_m(depth, reference_attacks_right);
        for (k, idx) in members.into_iter().enumerate() {
            team.players[idx].position = coordinates::clamp_to_pitch((
                x,
                coordinates::spread_y(field::CENTER_Y, k, n, spacing),
            ));
        }
    }
}
