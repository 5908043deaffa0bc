//! Physical constants for the pitch model
//!
//! All distances are in meters. The pitch is a 105 x 68 rectangle with the
//! home goal line at x = 0 and the away goal line at x = 105.

/// Field dimensions
pub mod field {
    /// Field length in meters
    pub const LENGTH_M: f32 = 105.0;
    /// Field width in meters
    pub const WIDTH_M: f32 = 68.0;
    /// Center X coordinate (meters)
    pub const CENTER_X: f32 = LENGTH_M * 0.5;
    /// Center Y coordinate (meters)
    pub const CENTER_Y: f32 = WIDTH_M * 0.5;
    /// Penalty area length from goal line
    pub const PENALTY_AREA_LENGTH_M: f32 = 16.5;
    /// Penalty area width (touchline direction)
    pub const PENALTY_AREA_WIDTH_M: f32 = 40.32;
    /// Goal area (six-yard box) length from goal line
    pub const GOAL_AREA_LENGTH_M: f32 = 5.5;
    /// Penalty spot distance from goal line (meters)
    pub const PENALTY_SPOT_M: f32 = 11.0;
}

/// Engagement radii used when resolving contested balls
pub mod engagement {
    /// Max distance from a pass trajectory at which a defender can intercept
    pub const INTERCEPTION_RADIUS_M: f32 = 2.0;
    /// Max distance the ball travels in one dribble action
    pub const DRIBBLE_STRIDE_M: f32 = 10.0;
    /// A defender this close to the dribble arrival point wins the ball
    pub const DRIBBLE_CONTEST_RADIUS_M: f32 = 1.0;
    /// Opponents must stand at least this far from the thrower (Law 15)
    pub const THROW_IN_CLEARANCE_M: f32 = 2.0;
}

/// Dead-ball restart placement
pub mod restart {
    /// Goal kick spot, measured from the kicking team's own goal line
    pub const GOAL_KICK_SPOT_M: f32 = 5.0;
    /// Defending goalkeeper distance from the goal line at a corner
    pub const CORNER_KEEPER_DEPTH_M: f32 = 1.0;
    /// Opponents are pushed this far past the penalty area edge at a goal kick
    pub const GOAL_KICK_CLEARANCE_M: f32 = 0.5;
}

/// Kickoff
pub mod kickoff {
    use super::field;

    /// Ball position at kickoff / reset
    pub const BALL_POSITION: (f32, f32) = (field::CENTER_X, field::CENTER_Y);
}
