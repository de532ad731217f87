//! Error types for actor configuration.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while building actors from configuration.
///
/// These are all construction-time failures. Once an actor exists, nothing in
/// the simulation returns an error: gameplay problems degrade to explicit
/// state fallbacks instead.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Maximum health must be at least 1.
    #[error("'{actor}': max health must be positive")]
    ZeroMaxHealth { actor: String },

    /// A timed state with no length would never end.
    #[error("'{actor}': {field} must be greater than zero, got {value}")]
    NonPositiveDuration {
        actor: String,
        field: &'static str,
        value: f32,
    },

    /// Cooldowns, grace delays and invincibility may be zero but not negative.
    #[error("'{actor}': {field} must not be negative, got {value}")]
    NegativeDuration {
        actor: String,
        field: &'static str,
        value: f32,
    },

    /// Longer than a `Duration` can hold.
    #[error("'{actor}': {field} of {value}s is too long")]
    DurationOutOfRange {
        actor: String,
        field: &'static str,
        value: f32,
    },

    /// Ranges and radii must be positive and finite.
    #[error("'{actor}': {field} must be a positive distance, got {value}")]
    InvalidDistance {
        actor: String,
        field: &'static str,
        value: f32,
    },

    /// Hit frame is a fraction of the attack duration.
    #[error("'{actor}': attack hit frame must lie in [0, 1], got {value}")]
    HitFrameOutOfRange { actor: String, value: f32 },

    /// An enemy that can attack further than it can see never chases.
    #[error("'{actor}': attack range {attack_range} exceeds detection range {detection_range}")]
    AttackRangeExceedsDetection {
        actor: String,
        attack_range: f32,
        detection_range: f32,
    },

    /// Enemies need at least one attack to choose from.
    #[error("'{actor}': no attack variants configured")]
    NoAttackVariants { actor: String },

    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Reject durations that must be strictly positive.
pub(crate) fn require_positive(actor: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NonPositiveDuration {
            actor: actor.to_string(),
            field,
            value,
        });
    }
    require_representable(actor, field, value)
}

/// Reject durations that may be zero but not negative.
pub(crate) fn require_non_negative(actor: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::NegativeDuration {
            actor: actor.to_string(),
            field,
            value,
        });
    }
    require_representable(actor, field, value)
}

fn require_representable(actor: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    Duration::try_from_secs_f32(value)
        .map(|_| ())
        .map_err(|_| ConfigError::DurationOutOfRange {
            actor: actor.to_string(),
            field,
            value,
        })
}

/// Reject ranges and radii that are not positive.
pub(crate) fn require_distance(actor: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDistance {
            actor: actor.to_string(),
            field,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_durations() {
        assert!(require_positive("a", "attack duration", 0.5).is_ok());
        assert!(matches!(
            require_positive("a", "attack duration", 0.0),
            Err(ConfigError::NonPositiveDuration { .. })
        ));
        assert!(require_positive("a", "attack duration", f32::NAN).is_err());
    }

    #[test]
    fn test_non_negative_durations() {
        assert!(require_non_negative("a", "cooldown", 0.0).is_ok());
        assert!(require_non_negative("a", "cooldown", -0.1).is_err());
    }

    #[test]
    fn test_overlong_durations_rejected() {
        assert!(matches!(
            require_positive("a", "hit duration", 1e30),
            Err(ConfigError::DurationOutOfRange { field: "hit duration", .. })
        ));
        assert!(matches!(
            require_non_negative("a", "despawn delay", 1e30),
            Err(ConfigError::DurationOutOfRange { .. })
        ));
        assert!(require_positive("a", "hit duration", 3600.0).is_ok());
    }

    #[test]
    fn test_error_messages_name_the_actor() {
        let err = ConfigError::ZeroMaxHealth {
            actor: "skeleton".to_string(),
        };
        assert_eq!(err.to_string(), "'skeleton': max health must be positive");
    }
}
