use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Unrecognized action token, or an action the current dead-ball state forbids
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Malformed player, team or config (fatal at construction time)
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid target position: ({x}, {y})")]
    InvalidTarget { x: f32, y: f32 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimError {
    /// Whether the match can continue after this error.
    ///
    /// Step errors never mutate the simulator, so the caller may simply
    /// submit another action.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimError::InvalidAction(_) => true,
            SimError::InvalidTarget { .. } => true,
            SimError::Configuration(_) => false,
            SimError::Serialization(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimError::InvalidAction("HEADER".to_string());
        assert_eq!(err.to_string(), "Invalid action: HEADER");

        let err = SimError::InvalidTarget { x: 1.5, y: -2.0 };
        assert_eq!(err.to_string(), "Invalid target position: (1.5, -2)");
    }

    #[test]
    fn test_recoverability() {
        assert!(SimError::InvalidAction("X".into()).is_recoverable());
        assert!(SimError::InvalidTarget { x: f32::NAN, y: 0.0 }.is_recoverable());
        assert!(!SimError::Configuration("empty roster".into()).is_recoverable());
    }
}
