//! Errors.

use thiserror::Error;

/// A simulation configuration was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// At least one checkout is needed to serve anybody.
    #[error("The number of checkouts must be at least 1")]
    NoCheckouts,

    /// A duration or mean was zero, negative, NaN or infinite.
    #[error("{field} must be a positive, finite number, got {value}")]
    NotPositive {
        /// The name of the offending setting.
        field: &'static str,
        /// The value that was given.
        value: f64,
    },

    /// A per-item time was negative, NaN or infinite.
    #[error("{field} must be zero or a positive, finite number, got {value}")]
    Negative {
        /// The name of the offending setting.
        field: &'static str,
        /// The value that was given.
        value: f64,
    },
}

/// Something went wrong while running a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SimulationError {
    /// The engine has already been run. Build a new one to run again.
    #[error("The simulation has already been run")]
    AlreadyRun,
}

/// Check that `value` is usable as a duration or distribution mean.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_values() {
        assert_eq!(ensure_positive("horizon", 1.5), Ok(1.5));
    }

    #[test]
    fn rejects_zero_negative_and_non_finite() {
        for value in [0.0, -3.0, f64::INFINITY] {
            assert!(matches!(
                ensure_positive("horizon", value),
                Err(ConfigError::NotPositive { field: "horizon", .. })
            ));
        }
        assert!(ensure_positive("horizon", f64::NAN).is_err());
    }

    #[test]
    fn zero_is_fine_when_non_negative_is_enough() {
        assert_eq!(ensure_non_negative("secs_per_item", 0.0), Ok(0.0));
        assert!(matches!(
            ensure_non_negative("secs_per_item", -0.5),
            Err(ConfigError::Negative { .. })
        ));
    }

    #[test]
    fn messages_name_the_field() {
        let err = ensure_positive("mean_items_per_cart", -1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mean_items_per_cart must be a positive, finite number, got -1"
        );
    }
}
