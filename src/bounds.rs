//! Per-coordinate inclusive bounds on a design vector. See [`Bounds`] for full documentation.

use nalgebra::DVector;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use std::ops::RangeInclusive;

use crate::error::InvalidOptionsError;

/// Component-wise inclusive bounds `lower[i] <= x[i] <= upper[i]`.
///
/// Bounds are informational: they are read by optimizers (to choose starting points and to map
/// the unit cube onto the search space) but the harness never rejects or clamps a vector that
/// lies outside of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    lower: DVector<f64>,
    upper: DVector<f64>,
}

impl Bounds {
    /// Creates a new `Bounds`. Returns `Err` if the lengths differ, if any bound is not finite, or
    /// if any lower bound is greater than its upper bound.
    pub fn new<V: Into<DVector<f64>>>(lower: V, upper: V) -> Result<Self, InvalidOptionsError> {
        let lower = lower.into();
        let upper = upper.into();

        if lower.len() != upper.len() {
            return Err(InvalidOptionsError::BoundsDimensionMismatch);
        }

        if lower.iter().chain(upper.iter()).any(|b| !b.is_finite()) {
            return Err(InvalidOptionsError::NonFiniteBounds);
        }

        if lower.iter().zip(upper.iter()).any(|(l, u)| l > u) {
            return Err(InvalidOptionsError::InvertedBounds);
        }

        Ok(Self { lower, upper })
    }

    /// Creates a new `Bounds` using the same range in every coordinate (i.e., `[A, B]^N`). Flipped
    /// ranges are corrected.
    pub fn uniform(
        dimensions: usize,
        mut range: RangeInclusive<f64>,
    ) -> Result<Self, InvalidOptionsError> {
        if range.is_empty() {
            range = *range.end()..=*range.start();
        }

        Self::new(
            DVector::from_element(dimensions, *range.start()),
            DVector::from_element(dimensions, *range.end()),
        )
    }

    pub fn lower(&self) -> &DVector<f64> {
        &self.lower
    }

    pub fn upper(&self) -> &DVector<f64> {
        &self.upper
    }

    pub fn dimensions(&self) -> usize {
        self.lower.len()
    }

    /// Returns `upper - lower` in each coordinate.
    pub fn width(&self) -> DVector<f64> {
        &self.upper - &self.lower
    }

    /// Returns whether `x` lies inside the bounds. Vectors of the wrong length are never inside.
    pub fn contains(&self, x: &DVector<f64>) -> bool {
        x.len() == self.dimensions()
            && x.iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(xi, (l, u))| *l <= *xi && *xi <= *u)
    }

    /// Returns the point of the bounds closest to `x`, clamping each coordinate separately.
    pub fn clamp(&self, x: &DVector<f64>) -> DVector<f64> {
        DVector::from_iterator(
            self.dimensions(),
            x.iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .map(|(xi, (l, u))| xi.clamp(*l, *u)),
        )
    }

    /// Maps a point of the unit cube `[0, 1]^N` onto the bounds.
    pub fn from_unit(&self, t: &DVector<f64>) -> DVector<f64> {
        &self.lower + self.width().component_mul(t)
    }

    /// Maps a point inside the bounds onto the unit cube. Coordinates with zero width map to
    /// `0.5`.
    pub fn to_unit(&self, x: &DVector<f64>) -> DVector<f64> {
        DVector::from_iterator(
            self.dimensions(),
            x.iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .map(|(xi, (l, u))| if u > l { (xi - l) / (u - l) } else { 0.5 }),
        )
    }

    /// Samples a point uniformly from inside the bounds. The same seed always produces the same
    /// point.
    pub fn sample(&self, seed: u64) -> DVector<f64> {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let unit = Uniform::new_inclusive(0.0, 1.0);
        let t = DVector::from_iterator(
            self.dimensions(),
            (0..self.dimensions()).map(|_| unit.sample(&mut rng)),
        );
        self.from_unit(&t)
    }
}
