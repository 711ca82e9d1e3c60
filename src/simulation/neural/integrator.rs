//! CPU4 path integrator.
//!
//! Accumulates a leaky population code of the displacement from home:
//!
//! ```text
//! aᵢ ← (1 − decay)·aᵢ + gain·|Δ|·cos(θᵢ − ∠Δ) + noise
//! ```
//!
//! The population vector of `a` points from home to the agent, scaled by
//! `gain · N / 2` relative to arena units.

use super::basis::{AngularBasis, PopulationActivity};
use super::gaussian;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct PathIntegrator {
    basis: AngularBasis,
    activity: PopulationActivity,
    gain: f64,
    decay: f64,
    noise_std: f64,
}

impl PathIntegrator {
    #[must_use]
    pub fn new(neurons: usize, gain: f64, decay: f64, noise_std: f64) -> Self {
        Self {
            basis: AngularBasis::new(neurons),
            activity: PopulationActivity::zeros(neurons),
            gain,
            decay,
            noise_std,
        }
    }

    /// Folds one movement increment into the accumulated population.
    pub fn integrate<R: Rng + ?Sized>(&mut self, dx: f64, dy: f64, rng: &mut R) {
        let magnitude = dx.hypot(dy);
        let direction = dy.atan2(dx);
        let retain = 1.0 - self.decay;

        for (a, theta) in self
            .activity
            .as_mut_slice()
            .iter_mut()
            .zip(self.basis.angles())
        {
            *a *= retain;
            *a += self.gain * magnitude * (theta - direction).cos();
            *a += gaussian(rng, self.noise_std);
        }
    }

    /// Population-vector readout of the accumulated displacement.
    #[must_use]
    pub fn decode(&self) -> (f64, f64) {
        self.basis.decode(&self.activity)
    }

    /// Decoded displacement rescaled to arena units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Column counts are small
    pub fn displacement(&self) -> (f64, f64) {
        let scale = self.gain * self.basis.len() as f64 / 2.0;
        if scale <= 0.0 {
            return (0.0, 0.0);
        }
        let (x, y) = self.decode();
        (x / scale, y / scale)
    }

    /// Zeroes the accumulator (recalibration at the nest).
    pub fn reset(&mut self) {
        self.activity.clear();
    }

    #[must_use]
    pub fn activity(&self) -> &PopulationActivity {
        &self.activity
    }

    #[must_use]
    pub fn basis(&self) -> &AngularBasis {
        &self.basis
    }
}
