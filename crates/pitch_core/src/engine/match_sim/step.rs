//! Step resolution
//!
//! A step either fails before touching any state (non-finite target,
//! unknown token, forbidden restart) or runs to completion and appends
//! exactly one event. A step without a target is played on the spot.

use log::{debug, info, warn};

use super::MatchSimulator;
use crate::engine::config::RestartPolicy;
use crate::engine::coordinates::{self, MeterPos};
use crate::engine::events::{ActionKind, Event, PlayerRef, SetPieceAward, StepResult};
use crate::engine::physics;
use crate::engine::set_pieces::{Exit, GameState};
use crate::error::{Result, SimError};
use crate::models::TeamSide;

impl MatchSimulator {
    /// Resolve one action and record it.
    ///
    /// PASS and SHOOT are checked for interceptions along the whole path;
    /// DRIBBLE advances at most one stride and only its arrival point is
    /// contested. A missing target means the current ball position, a
    /// zero-length action. Returns a copy of the recorded event.
    pub fn simulate_step(&mut self, action: ActionKind, target: Option<MeterPos>) -> Result<Event> {
        let requested = target.unwrap_or(self.ball.position);
        if !coordinates::is_finite(requested) {
            return Err(SimError::InvalidTarget { x: requested.0, y: requested.1 });
        }

        let pending = self.set_pieces.game_state();
        if pending.is_dead_ball()
            && action == ActionKind::Dribble
            && self.config.restart_policy == RestartPolicy::HoldUntilRestart
        {
            return Err(SimError::InvalidAction(format!(
                "{} cannot take a {} restart",
                action, pending
            )));
        }

        let target = self.effective_target(action, requested);
        let from = self.ball.position;
        let attacker = self.ball.possession;

        let (arrival, path, radius) = if action.is_ray_cast() {
            (target, (from, target), self.config.engagement.interception_radius_m)
        } else {
            let arrival =
                coordinates::move_toward(from, target, self.config.engagement.dribble_stride_m);
            (arrival, (arrival, arrival), self.config.engagement.dribble_contest_radius_m)
        };

        let defending_side = attacker.opponent();
        let interception =
            physics::check_interception(path.0, path.1, &self.team(defending_side).players, radius)
                .map(|hit| {
                    let interceptor = PlayerRef {
                        side: defending_side,
                        index: hit.index,
                        name: hit.player.name.clone(),
                    };
                    (interceptor, hit.player.position, hit.distance)
                });

        let (result, interceptor, set_piece) = match interception {
            Some((interceptor, position, distance)) => {
                info!(
                    "{} by {} intercepted by {} ({:.2}m from the path)",
                    action, attacker, interceptor.name, distance
                );
                self.ball.position = position;
                self.ball.possession = defending_side;
                self.set_pieces.record_touch(defending_side);
                self.set_pieces.set_game_state(GameState::OpenPlay);
                (StepResult::Intercepted, Some(interceptor), None)
            }
            None => {
                self.set_pieces.record_touch(attacker);
                match self.set_pieces.check_exit(from, arrival) {
                    Some(exit) => {
                        let award = self.award_set_piece(exit);
                        (StepResult::OutOfBounds, None, Some(award))
                    }
                    None => {
                        self.ball.position = arrival;
                        self.set_pieces.set_game_state(GameState::OpenPlay);
                        (StepResult::Success, None, None)
                    }
                }
            }
        };

        let event = Event {
            step: self.events.len(),
            action,
            result,
            interceptor,
            ball_position: self.ball.position,
            ball_position_before: from,
            target,
            possession_before: attacker,
            possession_after: self.ball.possession,
            restart_from: pending.is_dead_ball().then_some(pending),
            set_piece,
            game_state: self.set_pieces.game_state(),
        };

        debug!(
            "Step {}: {} ({:.1}, {:.1}) -> ({:.1}, {:.1}) {:?}, state {}",
            event.step,
            action,
            from.0,
            from.1,
            event.ball_position.0,
            event.ball_position.1,
            result,
            event.game_state
        );

        self.events.push(event.clone());
        Ok(event)
    }

    /// Same as `simulate_step`, parsing the action token first.
    pub fn simulate_step_str(&mut self, action: &str, target: Option<MeterPos>) -> Result<Event> {
        let action: ActionKind = action.parse()?;
        self.simulate_step(action, target)
    }

    /// PASS and DRIBBLE targets are clamped onto the pitch unless disabled;
    /// SHOOT may always leave it.
    fn effective_target(&self, action: ActionKind, requested: MeterPos) -> MeterPos {
        if action == ActionKind::Shoot || !self.config.clamp_pass_targets {
            return requested;
        }

        let clamped = coordinates::clamp_to_pitch(requested);
        if clamped != requested {
            warn!(
                "{} target ({:.1}, {:.1}) clamped to ({:.1}, {:.1})",
                action, requested.0, requested.1, clamped.0, clamped.1
            );
        }
        clamped
    }

    /// Award the restart for `exit` to the opponent of the last toucher and
    /// reposition ball and players.
    fn award_set_piece(&mut self, exit: Exit) -> SetPieceAward {
        let state = self.set_pieces.classify_line(exit.line);
        let awarded_to = self.set_pieces.awarded_side();

        let (attacking, defending) = match awarded_to {
            TeamSide::Home => (&mut self.home, &mut self.away),
            TeamSide::Away => (&mut self.away, &mut self.home),
        };
        let ball = self.set_pieces.resolve_set_piece(state, exit.point, attacking, defending);

        self.ball.position = ball;
        self.ball.possession = awarded_to;
        self.set_pieces.set_game_state(state);

        info!(
            "Ball out over {:?} at ({:.1}, {:.1}): {} to {}",
            exit.line, exit.point.0, exit.point.1, state, awarded_to
        );

        SetPieceAward { state, awarded_to, exit_point: exit.point }
    }
}
