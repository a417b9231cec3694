//! The function being minimized.

use crate::error::{Error, Result};

use super::bounds::Bounds;
use super::sample::{Point, Sample};

/// A real-valued function of a point. Lower is better.
///
/// Any `Fn(&[f64]) -> f64` closure is an objective. Implement the trait
/// directly to declare a fixed dimensionality, which the runners check
/// against the bounds before searching.
///
/// The objective must be finite everywhere inside the bounds; a NaN or
/// infinite value aborts the run with [`Error::NonFiniteValue`].
///
/// # Examples
///
/// ```
/// use u_localsearch::problem::Objective;
///
/// struct Sphere;
///
/// impl Objective for Sphere {
///     fn evaluate(&self, x: &[f64]) -> f64 {
///         x.iter().map(|v| v * v).sum()
///     }
/// }
///
/// let rosenbrock = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
/// assert_eq!(Sphere.evaluate(&[3.0, 4.0]), 25.0);
/// assert_eq!(rosenbrock.evaluate(&[1.0, 1.0]), 0.0);
/// ```
pub trait Objective {
    /// Evaluates the function at `point`.
    fn evaluate(&self, point: &[f64]) -> f64;

    /// Expected input length, if fixed.
    fn dimensions(&self) -> Option<usize> {
        None
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, point: &[f64]) -> f64 {
        self(point)
    }
}

/// Wraps an objective for one run: checks values and counts calls.
pub(crate) struct Evaluator<'a, F: ?Sized> {
    objective: &'a F,
    evaluations: usize,
}

impl<'a, F: Objective + ?Sized> Evaluator<'a, F> {
    pub(crate) fn new(objective: &'a F, bounds: &Bounds) -> Result<Self> {
        if let Some(got) = objective.dimensions() {
            if got != bounds.dimensions() {
                return Err(Error::DimensionMismatch {
                    expected: bounds.dimensions(),
                    got,
                });
            }
        }
        Ok(Self {
            objective,
            evaluations: 0,
        })
    }

    pub(crate) fn sample(&mut self, point: Point) -> Result<Sample> {
        let value = self.objective.evaluate(&point);
        self.evaluations += 1;
        if !value.is_finite() {
            return Err(Error::NonFiniteValue {
                value,
                point: point.to_vec(),
            });
        }
        Ok(Sample { point, value })
    }

    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations
    }
}

/// Checks an injected start point against the bounds.
pub(crate) fn check_start(bounds: &Bounds, start: &[f64]) -> Result<()> {
    if start.len() != bounds.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: bounds.dimensions(),
            got: start.len(),
        });
    }
    for (dimension, &value) in start.iter().enumerate() {
        if !(bounds.lower(dimension) <= value && value <= bounds.upper(dimension)) {
            return Err(Error::StartOutOfBounds { dimension, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);

    impl Objective for Fixed {
        fn evaluate(&self, point: &[f64]) -> f64 {
            point.iter().sum()
        }

        fn dimensions(&self) -> Option<usize> {
            Some(self.0)
        }
    }

    #[test]
    fn test_closure_is_objective() {
        let f = |x: &[f64]| x[0] * 2.0;
        assert_eq!(f.evaluate(&[1.5]), 3.0);
        assert_eq!(f.dimensions(), None);
    }

    #[test]
    fn test_dimension_mismatch() {
        let bounds = Bounds::uniform(2, 0.0, 1.0).unwrap();
        assert!(Evaluator::new(&Fixed(2), &bounds).is_ok());
        let err = Evaluator::new(&Fixed(3), &bounds).err().unwrap();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn test_non_finite_value() {
        let bounds = Bounds::uniform(1, -1.0, 1.0).unwrap();
        let f = |x: &[f64]| 1.0 / x[0];
        let mut eval = Evaluator::new(&f, &bounds).unwrap();

        assert_eq!(eval.sample(vec![0.5].into()).unwrap().value, 2.0);
        let err = eval.sample(vec![0.0].into()).unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { .. }));
        assert_eq!(eval.evaluations(), 2);
    }

    #[test]
    fn test_nan_value() {
        let bounds = Bounds::uniform(1, -1.0, 1.0).unwrap();
        let f = |_: &[f64]| f64::NAN;
        let mut eval = Evaluator::new(&f, &bounds).unwrap();
        assert!(eval.sample(vec![0.0].into()).is_err());
    }

    #[test]
    fn test_check_start() {
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        assert!(check_start(&bounds, &[1.0, -1.0]).is_ok());
        assert!(matches!(
            check_start(&bounds, &[0.0]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert_eq!(
            check_start(&bounds, &[0.0, 2.0]),
            Err(Error::StartOutOfBounds {
                dimension: 1,
                value: 2.0
            })
        );
    }
}
