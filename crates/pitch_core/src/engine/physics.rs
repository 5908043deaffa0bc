//! Interception physics
//!
//! Ray-cast style interception: a pass travels along the straight segment
//! from its start to its end, and any defender within the interception
//! radius of that segment can cut it out.
//!
//! Everything here is a pure function over meter positions.

use super::coordinates::MeterPos;
use super::physics_constants::engagement;
use crate::models::Player;

/// Default interception radius (meters)
pub const DEFAULT_INTERCEPTION_RADIUS_M: f32 = engagement::INTERCEPTION_RADIUS_M;

/// A defender able to reach the ball path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interception<'a> {
    /// Roster index of the defender
    pub index: usize,
    pub player: &'a Player,
    /// Distance from the defender to the ball path
    pub distance: f32,
}

/// Closest point to `p` on segment `[a, b]`
pub fn closest_point_on_segment(p: MeterPos, a: MeterPos, b: MeterPos) -> MeterPos {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);

    // Segment length squared
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        // Segment is a point
        return a;
    }

    // Projection ratio onto segment (0.0 ~ 1.0)
    let t = (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0);

    (a.0 + t * abx, a.1 + t * aby)
}

/// Shortest distance from point `p` to segment `[a, b]`.
///
/// Symmetric in `a`/`b`; a degenerate segment (`a == b`) yields `|p - a|`.
pub fn distance_point_to_segment(p: MeterPos, a: MeterPos, b: MeterPos) -> f32 {
    let closest = closest_point_on_segment(p, a, b);

    ((p.0 - closest.0).powi(2) + (p.1 - closest.1).powi(2)).sqrt()
}

/// Find the defender who intercepts a pass from `pass_start` to `pass_end`.
///
/// A defender qualifies when its distance to the pass path is within
/// `interception_radius`. The closest qualifying defender wins; exact ties
/// go to the earlier roster slot. Returns `None` when nobody qualifies
/// (including an empty defender list).
pub fn check_interception(
    pass_start: MeterPos,
    pass_end: MeterPos,
    defenders: &[Player],
    interception_radius: f32,
) -> Option<Interception<'_>> {
    let mut best: Option<Interception<'_>> = None;

    for (index, defender) in defenders.iter().enumerate() {
        let distance = distance_point_to_segment(defender.position, pass_start, pass_end);
        if distance > interception_radius {
            continue;
        }

        // Strict comparison keeps the first roster slot on ties
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Interception { index, player: defender, distance });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn defender(name: &str, pos: MeterPos) -> Player {
        Player::new(name, pos, Position::DF)
    }

    #[test]
    fn test_distance_point_on_line() {
        let dist = distance_point_to_segment((5.0, 5.0), (0.0, 0.0), (10.0, 10.0));
        assert!(dist.abs() < 1e-5);
    }

    #[test]
    fn test_distance_point_perpendicular() {
        let dist = distance_point_to_segment((5.0, 0.0), (0.0, 5.0), (10.0, 5.0));
        assert!((dist - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_point_beyond_segment() {
        let dist = distance_point_to_segment((15.0, 5.0), (0.0, 5.0), (10.0, 5.0));
        assert!((dist - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_degenerate_segment() {
        let dist = distance_point_to_segment((5.0, 5.0), (0.0, 0.0), (0.0, 0.0));
        assert!((dist - 50.0f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_distance_very_short_segment() {
        let d = distance_point_to_segment((1e-4, 0.0), (0.0, 0.0), (2e-4, 0.0));
        assert!(d < 1e-6);
    }

    #[test]
    fn test_interception_within_radius() {
        let defenders = vec![defender("Defender", (5.0, 1.0))];
        let hit = check_interception((0.0, 0.0), (10.0, 0.0), &defenders, 2.0)
            .expect("defender 1m from the lane should intercept");

        assert_eq!(hit.player.name, "Defender");
        assert_eq!(hit.index, 0);
        assert!((hit.distance - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_no_interception_outside_radius() {
        let defenders = vec![defender("Defender", (5.0, 10.0))];
        assert!(check_interception((0.0, 0.0), (10.0, 0.0), &defenders, 2.0).is_none());
    }

    #[test]
    fn test_no_defenders_means_no_interception() {
        assert!(check_interception((0.0, 0.0), (10.0, 0.0), &[], 2.0).is_none());
    }

    #[test]
    fn test_radius_is_inclusive() {
        let defenders = vec![defender("Edge", (5.0, 2.0))];
        assert!(check_interception((0.0, 0.0), (10.0, 0.0), &defenders, 2.0).is_some());
    }

    #[test]
    fn test_closest_defender_wins() {
        let defenders = vec![
            defender("Far_Defender", (5.0, 1.5)),
            defender("Close_Defender", (5.0, 0.5)),
        ];
        let hit = check_interception((0.0, 0.0), (10.0, 0.0), &defenders, 2.0).unwrap();

        assert_eq!(hit.player.name, "Close_Defender");
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn test_exact_tie_goes_to_roster_order() {
        let defenders = vec![
            defender("Outside", (5.0, 9.0)),
            defender("Above", (5.0, 1.0)),
            defender("Below", (5.0, -1.0)),
        ];
        let hit = check_interception((0.0, 0.0), (10.0, 0.0), &defenders, 2.0).unwrap();

        assert_eq!(hit.player.name, "Above");
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn test_defender_in_lane_scenario() {
        // Attacker at [40,34], defender standing in the lane at [52,34]
        let defenders = vec![defender("Defender", (52.0, 34.0))];
        let hit = check_interception((40.0, 34.0), (70.0, 34.0), &defenders, 2.0).unwrap();

        assert_eq!(hit.player.name, "Defender");
        assert!(hit.distance.abs() < 1e-5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn pos() -> impl Strategy<Value = MeterPos> {
            (-20.0f32..125.0, -20.0f32..88.0)
        }

        proptest! {
            /// Property: distance is symmetric in the segment endpoints and never negative
            #[test]
            fn prop_distance_symmetric_and_non_negative(p in pos(), a in pos(), b in pos()) {
                let ab = distance_point_to_segment(p, a, b);
                let ba = distance_point_to_segment(p, b, a);
                prop_assert!(ab >= 0.0);
                prop_assert!((ab - ba).abs() <= 1e-3 * (1.0 + ab));
            }

            /// Property: distance to the segment never exceeds distance to either endpoint
            #[test]
            fn prop_distance_bounded_by_endpoints(p in pos(), a in pos(), b in pos()) {
                let d = distance_point_to_segment(p, a, b);
                let to_a = ((p.0 - a.0).powi(2) + (p.1 - a.1).powi(2)).sqrt();
                let to_b = ((p.0 - b.0).powi(2) + (p.1 - b.1).powi(2)).sqrt();
                prop_assert!(d <= to_a.min(to_b) + 1e-3);
            }

            /// Property: defenders all beyond the radius never intercept
            #[test]
            fn prop_no_interception_when_all_outside_radius(
                start in pos(),
                end in pos(),
                spots in proptest::collection::vec(pos(), 0..11),
                radius in 0.5f32..4.0,
            ) {
                let defenders: Vec<Player> = spots
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| defender(&format!("D{i}"), p))
                    .filter(|d| distance_point_to_segment(d.position, start, end) > radius)
                    .collect();
                prop_assert!(check_interception(start, end, &defenders, radius).is_none());
            }

            /// Property: the chosen interceptor is the closest qualifying defender
            #[test]
            fn prop_interceptor_is_closest(
                start in pos(),
                end in pos(),
                spots in proptest::collection::vec(pos(), 1..11),
            ) {
                let defenders: Vec<Player> = spots
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| defender(&format!("D{i}"), p))
                    .collect();
                if let Some(hit) = check_interception(start, end, &defenders, 2.0) {
                    prop_assert!(hit.distance <= 2.0);
                    for d in &defenders {
                        let other = distance_point_to_segment(d.position, start, end);
                        prop_assert!(hit.distance <= other);
                    }
                }
            }
        }
    }
}
