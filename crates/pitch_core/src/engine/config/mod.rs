//! # Simulation Configuration
//!
//! Every tuning value the simulator uses lives here, so that a match is a
//! pure function of (teams, config, actions).
//!
//! ## Usage
//! ```rust
//! use pitch_core::engine::config::{RestartPolicy, SimConfig};
//!
//! let config = SimConfig::default();
//! assert_eq!(config.restart_policy, RestartPolicy::AutoResume);
//!
//! let strict = SimConfig::strict_restarts();
//! assert_eq!(strict.restart_policy, RestartPolicy::HoldUntilRestart);
//! ```
//!
//! ## Environment Variables
//!
//! - `PITCH_SIM_PROFILE`: Select preset (default, strict, permissive)

mod engagement_config;

pub use engagement_config::EngagementConfig;

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::Result;

/// How a dead-ball state ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Any action restarts play; the next step recomputes the game state.
    #[default]
    AutoResume,
    /// The dead-ball state holds until a PASS or SHOOT takes the restart.
    /// DRIBBLE is rejected while a set piece is pending.
    HoldUntilRestart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Interception / contest radii and dribble stride
    pub engagement: EngagementConfig,
    /// Clamp PASS and DRIBBLE targets onto the pitch (SHOOT is never clamped)
    pub clamp_pass_targets: bool,
    pub restart_policy: RestartPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            engagement: EngagementConfig::default(),
            clamp_pass_targets: true,
            restart_policy: RestartPolicy::AutoResume,
        }
    }
}

impl SimConfig {
    /// Set pieces must be taken with a PASS or SHOOT
    pub fn strict_restarts() -> Self {
        Self { restart_policy: RestartPolicy::HoldUntilRestart, ..Self::default() }
    }

    /// Passes may leave the pitch (throw-ins and corners from misplaced passes)
    pub fn permissive() -> Self {
        Self { clamp_pass_targets: false, ..Self::default() }
    }

    /// Select a preset by name
    pub fn from_profile(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict_restarts()),
            "permissive" => Some(Self::permissive()),
            _ => None,
        }
    }

    /// Load preset from `PITCH_SIM_PROFILE`, falling back to default
    pub fn from_env_or_default() -> Self {
        match env::var("PITCH_SIM_PROFILE") {
            Ok(profile) => Self::from_profile(&profile).unwrap_or_else(|| {
                log::warn!("Unknown PITCH_SIM_PROFILE '{}', using default", profile);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.engagement.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.engagement.interception_radius_m, 2.0);
        assert!(config.clamp_pass_targets);
        assert_eq!(config.restart_policy, RestartPolicy::AutoResume);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(SimConfig::from_profile("STRICT"), Some(SimConfig::strict_restarts()));
        assert!(!SimConfig::from_profile("permissive").unwrap().clamp_pass_targets);
        assert!(SimConfig::from_profile("arcade").is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{"restart_policy": "hold_until_restart"}"#).unwrap();
        assert_eq!(config.restart_policy, RestartPolicy::HoldUntilRestart);
        assert!(config.clamp_pass_targets);
        assert_eq!(config.engagement, EngagementConfig::default());
    }
}
