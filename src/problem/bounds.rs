//! The feasible search box.

use crate::error::{Error, Result};
use rand::Rng;

use super::sample::Point;

/// Per-dimension inclusive `[lower, upper]` intervals defining the
/// feasible hyper-rectangle.
///
/// Validated on construction: at least one dimension, finite ends,
/// `lower <= upper` and a finite width everywhere. A degenerate interval (`lower == upper`)
/// is allowed and pins that coordinate.
///
/// # Examples
///
/// ```
/// use u_localsearch::problem::Bounds;
///
/// let bounds = Bounds::new(vec![(-5.0, 5.0), (0.0, 1.0)]).unwrap();
/// assert_eq!(bounds.dimensions(), 2);
/// assert_eq!(bounds.width(0), 10.0);
/// assert_eq!(bounds.clamp(1, 3.0), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")
)]
pub struct Bounds {
    intervals: Vec<(f64, f64)>,
}

impl Bounds {
    /// Builds bounds from `(lower, upper)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBounds`], [`Error::NonFiniteBounds`],
    /// [`Error::InvertedBounds`] or [`Error::UnboundedWidth`] for an
    /// unusable box.
    pub fn new(intervals: Vec<(f64, f64)>) -> Result<Self> {
        if intervals.is_empty() {
            return Err(Error::EmptyBounds);
        }
        for (dimension, &(lower, upper)) in intervals.iter().enumerate() {
            if !lower.is_finite() || !upper.is_finite() {
                return Err(Error::NonFiniteBounds {
                    dimension,
                    lower,
                    upper,
                });
            }
            if lower > upper {
                return Err(Error::InvertedBounds {
                    dimension,
                    lower,
                    upper,
                });
            }
            if !(upper - lower).is_finite() {
                return Err(Error::UnboundedWidth {
                    dimension,
                    lower,
                    upper,
                });
            }
        }
        Ok(Self { intervals })
    }

    /// Same interval repeated over `dimensions` dimensions.
    pub fn uniform(dimensions: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(vec![(lower, upper); dimensions])
    }

    /// Number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.intervals.len()
    }

    /// Lower end of `dimension`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension >= self.dimensions()`, as do the other
    /// per-dimension accessors.
    pub fn lower(&self, dimension: usize) -> f64 {
        self.intervals[dimension].0
    }

    /// Upper end of `dimension`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension >= self.dimensions()`.
    pub fn upper(&self, dimension: usize) -> f64 {
        self.intervals[dimension].1
    }

    /// Length of the interval in `dimension`.
    pub fn width(&self, dimension: usize) -> f64 {
        let (lower, upper) = self.intervals[dimension];
        upper - lower
    }

    /// Clamps `value` into the interval of `dimension`.
    pub fn clamp(&self, dimension: usize, value: f64) -> f64 {
        let (lower, upper) = self.intervals[dimension];
        value.clamp(lower, upper)
    }

    /// Whether every coordinate of `point` lies inside its interval.
    ///
    /// A point of the wrong length is never contained.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.intervals.len()
            && point
                .iter()
                .zip(&self.intervals)
                .all(|(&x, &(lower, upper))| lower <= x && x <= upper)
    }

    /// Draws a point uniformly from the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Point {
        self.intervals
            .iter()
            .map(|&(lower, upper)| rng.random_range(lower..=upper))
            .collect::<Vec<_>>()
            .into()
    }

    /// Iterates over the `(lower, upper)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.intervals.iter()
    }
}

impl TryFrom<Vec<(f64, f64)>> for Bounds {
    type Error = Error;

    fn try_from(intervals: Vec<(f64, f64)>) -> Result<Self> {
        Self::new(intervals)
    }
}

impl From<Bounds> for Vec<(f64, f64)> {
    fn from(bounds: Bounds) -> Self {
        bounds.intervals
    }
}
