//! Error type shared by all search runners.

/// Errors raised while configuring or running a search.
///
/// Normal early termination (iteration cap, convergence, temperature
/// floor) is never an error; it is reported through
/// [`StopReason`](crate::problem::StopReason).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Returned when a search box has no dimensions.
    #[error("bounds must contain at least one dimension")]
    EmptyBounds,

    /// Returned when a bound is NaN or infinite.
    #[error("bounds for dimension {dimension} must be finite, got [{lower}, {upper}]")]
    NonFiniteBounds {
        /// Offending dimension.
        dimension: usize,
        /// Lower end as given.
        lower: f64,
        /// Upper end as given.
        upper: f64,
    },

    /// Returned when the lower bound exceeds the upper bound.
    #[error("inverted bounds for dimension {dimension}: lower {lower} exceeds upper {upper}")]
    InvertedBounds {
        /// Offending dimension.
        dimension: usize,
        /// Lower end as given.
        lower: f64,
        /// Upper end as given.
        upper: f64,
    },

    /// Returned when finite ends are so far apart that the width
    /// overflows to infinity.
    #[error("width of dimension {dimension} overflows: [{lower}, {upper}]")]
    UnboundedWidth {
        /// Offending dimension.
        dimension: usize,
        /// Lower end as given.
        lower: f64,
        /// Upper end as given.
        upper: f64,
    },

    /// Returned when a hyperparameter is out of range.
    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What the field must satisfy.
        reason: String,
    },

    /// Returned when the objective or a start point disagrees with the
    /// dimensionality of the bounds.
    #[error("dimension mismatch: bounds have {expected} dimensions but got {got}")]
    DimensionMismatch {
        /// Dimensions of the bounds.
        expected: usize,
        /// Dimensions of the objective or point.
        got: usize,
    },

    /// Returned when an injected start point lies outside the bounds.
    #[error("start point outside bounds in dimension {dimension}: {value}")]
    StartOutOfBounds {
        /// Offending dimension.
        dimension: usize,
        /// Coordinate as given.
        value: f64,
    },

    /// Returned when the objective evaluates to NaN or infinity.
    #[error("objective returned non-finite value {value} at {point:?}")]
    NonFiniteValue {
        /// The value produced.
        value: f64,
        /// Where it was evaluated.
        point: Vec<f64>,
    },
}

impl Error {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Rejects zero, negative, NaN and infinite values.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::config(
            field,
            format!("must be positive and finite, got {value}"),
        ))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
