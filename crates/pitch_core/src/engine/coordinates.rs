//! Coordinate system and distance calculations
//!
//! ## Coordinate System
//!
//! **Meter/Field Coordinates** (used everywhere in the engine):
//! - X: 0 = home goal line, 105 = away goal line (LENGTH direction)
//! - Y: 0 = near touchline, 68 = far touchline (WIDTH direction)
//!
//! **TeamView meters** measure X from a team's own goal line, so that the
//! opponent goal is always at x = 105. Home already plays in TeamView;
//! Away is mirrored on the X axis.

use super::physics_constants::field;

/// Position in meters
/// - .0 = length (x-axis, 0-105m, home goal to away goal)
/// - .1 = width (y-axis, 0-68m, touchline to touchline)
pub type MeterPos = (f32, f32);

/// Convert TeamView meters X to world meters X.
///
/// TeamView: 0 = own goal, 105 = opponent goal (always attacking toward higher X)
#[inline]
pub fn x_to_world_m(team_view_x: f32, attacks_right: bool) -> f32 {
    if attacks_right {
        team_view_x
    } else {
        field::LENGTH_M - team_view_x
    }
}

/// Convert world meters X to TeamView meters X (the mapping is its own inverse).
#[inline]
pub fn x_to_team_view_m(world_x: f32, attacks_right: bool) -> f32 {
    x_to_world_m(world_x, attacks_right)
}

/// Euclidean distance between two meter positions
pub fn distance_m(a: MeterPos, b: MeterPos) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;

    (dx * dx + dy * dy).sqrt()
}

/// Check if meter position is inside the pitch (lines belong to the pitch)
pub fn is_inside_pitch(pos: MeterPos) -> bool {
    (0.0..=field::LENGTH_M).contains(&pos.0) && (0.0..=field::WIDTH_M).contains(&pos.1)
}

/// Check if meter position is out of field bounds
pub fn is_out_of_bounds_m(pos: MeterPos) -> bool {
    !is_inside_pitch(pos)
}

/// Clamp a meter position onto the pitch
pub fn clamp_to_pitch(pos: MeterPos) -> MeterPos {
    (pos.0.clamp(0.0, field::LENGTH_M), pos.1.clamp(0.0, field::WIDTH_M))
}

/// Both components are finite numbers
pub fn is_finite(pos: MeterPos) -> bool {
    pos.0.is_finite() && pos.1.is_finite()
}

/// Move from `from` toward `to` by at most `max_step` meters.
pub fn move_toward(from: MeterPos, to: MeterPos, max_step: f32) -> MeterPos {
    let dist = distance_m(from, to);
    if dist <= max_step || dist <= f32::EPSILON {
        return to;
    }

    let t = max_step / dist;
    (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

/// Lateral slot for the `k`-th of `n` players spread around `center_y`.
///
/// Slots are `spacing` meters apart and centered on `center_y`.
pub fn spread_y(center_y: f32, k: usize, n: usize, spacing: f32) -> f32 {
    if n <= 1 {
        return center_y;
    }
    let offset = k as f32 - (n - 1) as f32 / 2.0;
    (center_y + offset * spacing).clamp(0.0, field::WIDTH_M)
}
