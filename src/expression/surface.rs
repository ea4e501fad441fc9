//! Height-field sampling for surface visualization.
//!
//! The 3D and AR views plot `y = f(x, z)` over a square grid. Sampling uses
//! the same sandboxed evaluator as validation.

use super::evaluation::{Bindings, evaluate};
use serde::Serialize;

/// Default number of samples along each axis.
pub const DEFAULT_RESOLUTION: usize = 50;

/// Upper bound on samples per axis.
pub const MAX_RESOLUTION: usize = 1000;

/// The square region a surface is sampled over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceDomain {
    /// The in-page 3D view, x and z in [-2, 2].
    #[default]
    Scene,
    /// The augmented-reality view, x and z in [-1, 1].
    Augmented,
}

impl SurfaceDomain {
    /// Half the side length of the domain.
    pub fn extent(self) -> f64 {
        match self {
            Self::Scene => 2.0,
            Self::Augmented => 1.0,
        }
    }

    /// Map a unit coordinate in [0, 1] onto the domain.
    fn map(self, unit: f64) -> f64 {
        (unit * 2.0 - 1.0) * self.extent()
    }
}

/// One sampled point; `y` is the height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Samples in row-major order: `points[i * resolution + j]` has x from `i`
/// and z from `j`.
#[derive(Clone, Debug, Serialize)]
pub struct SurfaceGrid {
    pub expression: String,
    pub domain: SurfaceDomain,
    pub resolution: usize,
    pub points: Vec<SurfacePoint>,
    /// Samples that failed to evaluate and were flattened to zero.
    pub failed_samples: usize,
}

impl SurfaceGrid {
    /// Point at grid coordinates, if in range.
    pub fn point(&self, i: usize, j: usize) -> Option<&SurfacePoint> {
        if i >= self.resolution || j >= self.resolution {
            return None;
        }
        self.points.get(i * self.resolution + j)
    }

    /// Lowest and highest sampled height.
    pub fn height_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            })
    }
}

/// Sample `expression` over `domain` at `resolution × resolution` points.
///
/// Points that fail to evaluate, or evaluate to a non-finite value, get
/// height zero. The resolution is clamped to `2..=MAX_RESOLUTION`.
pub fn sample_surface(
    expression: &str,
    domain: SurfaceDomain,
    resolution: usize,
) -> SurfaceGrid {
    let resolution = resolution.clamp(2, MAX_RESOLUTION);
    let steps = (resolution - 1) as f64;
    let mut points = Vec::with_capacity(resolution * resolution);
    let mut failed_samples = 0;

    for i in 0..resolution {
        let x = domain.map(i as f64 / steps);
        for j in 0..resolution {
            let z = domain.map(j as f64 / steps);
            let y = match evaluate(expression, &Bindings::with_xz(x, z)) {
                Ok(y) if y.is_finite() => y,
                _ => {
                    failed_samples += 1;
                    0.0
                }
            };
            points.push(SurfacePoint { x, y, z });
        }
    }

    if failed_samples > 0 {
        tracing::debug!(
            expression,
            failed_samples,
            "surface samples flattened to zero"
        );
    }

    SurfaceGrid {
        expression: expression.to_string(),
        domain,
        resolution,
        points,
        failed_samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_and_corners() {
        let grid = sample_surface("x + z", SurfaceDomain::Scene, DEFAULT_RESOLUTION);
        assert_eq!(grid.points.len(), 2500);

        let first = grid.point(0, 0).unwrap();
        assert_eq!((first.x, first.z), (-2.0, -2.0));
        assert_eq!(first.y, -4.0);

        let last = grid.point(49, 49).unwrap();
        assert_eq!((last.x, last.z), (2.0, 2.0));
        assert_eq!(last.y, 4.0);
        assert!(grid.point(50, 0).is_none());
    }

    #[test]
    fn test_augmented_domain() {
        let grid = sample_surface("x*z", SurfaceDomain::Augmented, 3);
        assert_eq!(grid.points.len(), 9);
        assert_eq!(grid.point(0, 0).unwrap().y, 1.0);
        assert_eq!(grid.point(1, 1).unwrap().y, 0.0);
        assert_eq!(grid.point(2, 0).unwrap().y, -1.0);
        assert_eq!(grid.height_range(), (-1.0, 1.0));
    }

    #[test]
    fn test_unevaluable_expression_is_flat() {
        let grid = sample_surface("x +", SurfaceDomain::Scene, 4);
        assert!(grid.points.iter().all(|p| p.y == 0.0));
        assert_eq!(grid.failed_samples, 16);
    }

    #[test]
    fn test_singular_points_flattened() {
        // Odd resolution puts a sample exactly at x = 0.
        let grid = sample_surface("1/x", SurfaceDomain::Augmented, 3);
        assert_eq!(grid.failed_samples, 3);
        assert_eq!(grid.point(1, 0).unwrap().y, 0.0);
        assert_eq!(grid.point(2, 0).unwrap().y, 1.0);
    }

    #[test]
    fn test_minimum_resolution() {
        let grid = sample_surface("1", SurfaceDomain::Scene, 0);
        assert_eq!(grid.resolution, 2);
        assert_eq!(grid.points.len(), 4);
    }

    #[test]
    fn test_maximum_resolution() {
        let grid = sample_surface("1", SurfaceDomain::Augmented, usize::MAX);
        assert_eq!(grid.resolution, MAX_RESOLUTION);
        assert_eq!(grid.points.len(), MAX_RESOLUTION * MAX_RESOLUTION);
    }
}
