//! Angular basis and population-code primitives.
//!
//! Every population in the central complex model is a ring of columns with
//! evenly spaced preferred directions. A value is encoded as one activity per
//! column and read back with the population-vector decode:
//!
//! ```text
//! x = Σ aᵢ cos θᵢ,   y = Σ aᵢ sin θᵢ
//! ```

use std::f64::consts::{PI, TAU};
use std::ops::Sub;

/// Wraps an angle to the canonical range (-π, π].
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Shortest signed rotation from `from` to `to`, in (-π, π].
#[must_use]
pub fn angle_diff(to: f64, from: f64) -> f64 {
    wrap_angle(to - from)
}

/// Ordered, immutable set of `N` preferred directions `2πk/N`.
#[derive(Clone, Debug, PartialEq)]
pub struct AngularBasis {
    angles: Vec<f64>,
}

impl AngularBasis {
    /// Creates a basis of `n` evenly spaced angles in [0, 2π).
    ///
    /// Callers validate `n > 0`; a zero-sized basis simply decodes to (0, 0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Column counts are small
    pub fn new(n: usize) -> Self {
        let angles = (0..n).map(|k| TAU * k as f64 / n as f64).collect();
        Self { angles }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    #[must_use]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Noise-free cosine tuning: `amplitude · cos(θᵢ − direction)` per column.
    #[must_use]
    pub fn encode(&self, direction: f64, amplitude: f64) -> PopulationActivity {
        PopulationActivity(
            self.angles
                .iter()
                .map(|theta| amplitude * (theta - direction).cos())
                .collect(),
        )
    }

    /// Population-vector readout of `activity` against this basis.
    ///
    /// An all-zero population decodes to exactly (0, 0).
    #[must_use]
    pub fn decode(&self, activity: &PopulationActivity) -> (f64, f64) {
        self.angles
            .iter()
            .zip(activity.as_slice())
            .fold((0.0, 0.0), |(x, y), (theta, a)| {
                (x + a * theta.cos(), y + a * theta.sin())
            })
    }
}

/// One activity value per basis column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopulationActivity(Vec<f64>);

impl PopulationActivity {
    /// A silent population of `n` columns.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self(vec![0.0; n])
    }

    #[must_use]
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }

    /// Sets every column to zero, keeping the dimensionality.
    pub fn clear(&mut self) {
        self.0.iter_mut().for_each(|a| *a = 0.0);
    }

    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.0.iter().all(|a| *a == 0.0)
    }
}

impl Sub for &PopulationActivity {
    type Output = PopulationActivity;

    /// Column-wise difference; mismatched lengths truncate to the shorter.
    fn sub(self, rhs: Self) -> PopulationActivity {
        PopulationActivity(
            self.0
                .iter()
                .zip(&rhs.0)
                .map(|(a, b)| a - b)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_basis_is_evenly_spaced() {
        let basis = AngularBasis::new(8);
        assert_eq!(basis.len(), 8);
        assert!(basis.angles()[0].abs() < EPSILON);
        for pair in basis.angles().windows(2) {
            assert!((pair[1] - pair[0] - TAU / 8.0).abs() < EPSILON);
        }
        assert!(*basis.angles().last().unwrap() < TAU);
    }

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(PI) - PI).abs() < EPSILON);
        assert!((wrap_angle(-PI) - PI).abs() < EPSILON);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < EPSILON);
        assert!((wrap_angle(-7.0 * TAU + 0.25) - 0.25).abs() < 1e-9);
        assert_eq!(wrap_angle(f64::NAN), 0.0);
    }

    #[test]
    fn test_angle_diff_takes_short_way() {
        let d = angle_diff(-PI + 0.1, PI - 0.1);
        assert!((d - 0.2).abs() < 1e-9);
        let d = angle_diff(PI - 0.1, -PI + 0.1);
        assert!((d + 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_encode_decode_recovers_direction() {
        let basis = AngularBasis::new(16);
        for k in 0..32 {
            let direction = wrap_angle(f64::from(k) * 0.37);
            let (x, y) = basis.decode(&basis.encode(direction, 2.0));
            assert!(angle_diff(y.atan2(x), direction).abs() < 1e-9);
            // N/2 scaling of the population vector
            assert!((x.hypot(y) - 16.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_decode_zero_population() {
        let basis = AngularBasis::new(16);
        let (x, y) = basis.decode(&PopulationActivity::zeros(16));
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn test_activity_difference() {
        let a = PopulationActivity::from_vec(vec![1.0, 2.0, 3.0]);
        let b = PopulationActivity::from_vec(vec![0.5, 2.0, 4.0]);
        assert_eq!((&a - &b).as_slice(), &[0.5, 0.0, -1.0]);
    }
}
