//! Engagement radii for contested balls

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::engagement;
use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    /// Defender reach from a PASS/SHOOT trajectory (meters)
    pub interception_radius_m: f32,
    /// Max ball travel per DRIBBLE (meters)
    pub dribble_stride_m: f32,
    /// Defender reach around the dribble arrival point (meters)
    pub dribble_contest_radius_m: f32,
    /// Opponent distance from the thrower at a throw-in (meters)
    pub throw_in_clearance_m: f32,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            interception_radius_m: engagement::INTERCEPTION_RADIUS_M,
            dribble_stride_m: engagement::DRIBBLE_STRIDE_M,
            dribble_contest_radius_m: engagement::DRIBBLE_CONTEST_RADIUS_M,
            throw_in_clearance_m: engagement::THROW_IN_CLEARANCE_M,
        }
    }
}

impl EngagementConfig {
    pub fn validate(&self) -> Result<()> {
        let radii = [
            ("interception_radius_m", self.interception_radius_m),
            ("dribble_contest_radius_m", self.dribble_contest_radius_m),
            ("throw_in_clearance_m", self.throw_in_clearance_m),
        ];
        for (name, value) in radii {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !self.dribble_stride_m.is_finite() || self.dribble_stride_m <= 0.0 {
            return Err(SimError::Configuration(format!(
                "dribble_stride_m must be positive, got {}",
                self.dribble_stride_m
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = EngagementConfig { interception_radius_m: -1.0, ..Default::default() };
        assert!(negative.validate().is_err());

        let nan = EngagementConfig { dribble_contest_radius_m: f32::NAN, ..Default::default() };
        assert!(nan.validate().is_err());

        let stalled = EngagementConfig { dribble_stride_m: 0.0, ..Default::default() };
        assert!(stalled.validate().is_err());

        // Zero radius: only defenders standing on the path intercept
        let zero = EngagementConfig { interception_radius_m: 0.0, ..Default::default() };
        assert!(zero.validate().is_ok());
    }
}
