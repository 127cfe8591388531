//! Race-specific error types.
//!
//! Only construction paths fail: loading a [`crate::config::RaceConfig`] and
//! building a [`crate::race::Race`] from it.  The per-tick update never
//! returns an error; degenerate numbers are absorbed where they occur.

use std::fmt;

/// Top-level error enum for race setup.
#[derive(Debug, Clone, PartialEq)]
pub enum RaceError {
    /// `assets/race.toml` (or another TOML source) could not be parsed.
    ConfigParse {
        /// Parser message, including line/column when available.
        message: String,
    },

    /// A tuning value is outside the range the simulation can handle.
    InvalidParameter {
        /// Name of the config key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// The track has no checkpoints, so a lap can never be completed.
    EmptyCheckpoints,

    /// A race needs exactly one player-driven vehicle.
    PlayerCount {
        /// Number of `PlayerInput` vehicles that were supplied.
        found: usize,
    },

    /// A vehicle expects a checkpoint index the track does not have.
    UnknownCheckpoint { index: usize, count: usize },
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceError::ConfigParse { message } => {
                write!(f, "failed to parse race config: {}", message)
            }
            RaceError::InvalidParameter {
                name,
                value,
                expected,
            } => write!(
                f,
                "parameter '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
            RaceError::EmptyCheckpoints => write!(f, "track has no checkpoints"),
            RaceError::PlayerCount { found } => write!(
                f,
                "race needs exactly one player-controlled vehicle, found {}",
                found
            ),
            RaceError::UnknownCheckpoint { index, count } => write!(
                f,
                "checkpoint index {} is out of range for a track with {} checkpoints",
                index, count
            ),
        }
    }
}

impl std::error::Error for RaceError {}

impl From<toml::de::Error> for RaceError {
    fn from(err: toml::de::Error) -> Self {
        RaceError::ConfigParse {
            message: err.to_string(),
        }
    }
}

/// Convenience alias: a `Result` using `RaceError` as the error type.
pub type RaceResult<T> = Result<T, RaceError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> RaceResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(RaceError::InvalidParameter {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error if `value` is negative or NaN.
pub fn validate_non_negative(name: &'static str, value: f32) -> RaceResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(RaceError::InvalidParameter {
            name,
            value,
            expected: "[0.0, ∞)",
        })
    }
}

/// Returns an error if `value` is infinite or NaN.
///
/// TOML accepts `inf` and `nan`, which would otherwise reach the simulation.
pub fn validate_finite(name: &'static str, value: f32) -> RaceResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RaceError::InvalidParameter {
            name,
            value,
            expected: "a finite number",
        })
    }
}

/// Returns an error unless `value` lies in `[0, 1]`.
///
/// Used for decay multipliers: anything above 1 would make an idle car speed up.
pub fn validate_unit_interval(name: &'static str, value: f32) -> RaceResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RaceError::InvalidParameter {
            name,
            value,
            expected: "[0.0, 1.0]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive("max_dt", 0.0).is_err());
        assert!(validate_positive("max_dt", f32::NAN).is_err());
        assert!(validate_positive("max_dt", 0.1).is_ok());
    }

    #[test]
    fn finite_rejects_inf_and_nan() {
        assert!(validate_finite("track_origin.x", f32::INFINITY).is_err());
        assert!(validate_finite("track_origin.x", f32::NEG_INFINITY).is_err());
        assert!(validate_finite("track_origin.x", f32::NAN).is_err());
        assert!(validate_finite("track_origin.x", -900.0).is_ok());
    }

    #[test]
    fn unit_interval_bounds_are_inclusive() {
        assert!(validate_unit_interval("deceleration_rate", 0.0).is_ok());
        assert!(validate_unit_interval("deceleration_rate", 1.0).is_ok());
        assert!(validate_unit_interval("deceleration_rate", 1.01).is_err());
    }

    #[test]
    fn display_names_the_parameter() {
        let err = validate_non_negative("boost_drain", -1.0).unwrap_err();
        assert!(err.to_string().contains("boost_drain"));
    }
}
