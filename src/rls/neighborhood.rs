//! Adaptive neighborhood radius.

use super::config::RlsConfig;
use crate::problem::{Bounds, Point};
use rand::Rng;

/// Perturbation radius that tightens on success and widens on failure.
///
/// Growth is capped at `max_radius`. There is no lower floor: a long
/// streak of accepted moves shrinks the radius geometrically toward zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood {
    radius: f64,
    shrink_factor: f64,
    growth_factor: f64,
    max_radius: f64,
}

impl Neighborhood {
    pub fn new(config: &RlsConfig) -> Self {
        Self {
            radius: config.initial_radius,
            shrink_factor: config.shrink_factor,
            growth_factor: config.growth_factor,
            max_radius: config.max_radius,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Applies the post-acceptance contraction.
    pub fn shrink(&mut self) {
        self.radius *= self.shrink_factor;
    }

    /// Applies the post-rejection expansion, capped at `max_radius`.
    pub fn grow(&mut self) {
        self.radius = (self.radius * self.growth_factor).min(self.max_radius);
    }

    /// Offsets every coordinate of `point` by an independent uniform draw
    /// from `[-radius, radius]` and clamps the result into `bounds`.
    pub fn perturb<R: Rng>(&self, bounds: &Bounds, point: &[f64], rng: &mut R) -> Point {
        let r = self.radius;
        point
            .iter()
            .enumerate()
            .map(|(dim, &x)| bounds.clamp(dim, x + r * rng.random_range(-1.0..=1.0)))
            .collect::<Vec<_>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_shrink_and_grow() {
        let mut n = Neighborhood::new(&RlsConfig::default());
        n.shrink();
        assert!((n.radius() - 0.99).abs() < 1e-12);
        n.grow();
        assert!((n.radius() - 0.99 * 1.01).abs() < 1e-12);
    }

    #[test]
    fn test_growth_capped() {
        let mut n = Neighborhood::new(&RlsConfig::default());
        for _ in 0..10_000 {
            n.grow();
            assert!(n.radius() <= 2.0);
        }
        assert_eq!(n.radius(), 2.0);
    }

    #[test]
    fn test_shrink_has_no_floor() {
        let mut n = Neighborhood::new(&RlsConfig::default());
        for _ in 0..5_000 {
            n.shrink();
        }
        assert!(n.radius() > 0.0);
        assert!(n.radius() < 1e-20);
    }

    #[test]
    fn test_perturb_huge_radius() {
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        let config = RlsConfig::default()
            .with_initial_radius(1e308)
            .with_max_radius(1e308);
        let n = Neighborhood::new(&config);
        let mut rng = create_rng(9);
        for _ in 0..100 {
            assert!(bounds.contains(&n.perturb(&bounds, &[0.0, 0.0], &mut rng)));
        }
    }

    #[test]
    fn test_perturb_within_radius_and_bounds() {
        let bounds = Bounds::uniform(3, -1.0, 1.0).unwrap();
        let n = Neighborhood::new(&RlsConfig::default().with_initial_radius(0.25));
        let mut rng = create_rng(5);
        let origin = [0.9, 0.0, -0.9];
        for _ in 0..500 {
            let p = n.perturb(&bounds, &origin, &mut rng);
            assert!(bounds.contains(&p));
            for (x, o) in p.iter().zip(origin) {
                assert!((x - o).abs() <= 0.25 + 1e-12);
            }
        }
    }
}
