//! Central complex neural populations.
//!
//! This module provides:
//! - TB1 heading compass (ring attractor encoding of heading)
//! - CPU4 path integrator (leaky population-coded home vector)
//! - CPU1 vector memory (bounded store of integrator snapshots)

mod basis;
mod compass;
mod integrator;
mod memory_bank;

pub use basis::{angle_diff, wrap_angle, AngularBasis, PopulationActivity};
pub use compass::HeadingEncoder;
pub use integrator::PathIntegrator;
pub use memory_bank::{MemoryRecord, VectorMemoryBank};

use rand::Rng;
use rand_distr::StandardNormal;

/// Zero-mean Gaussian sample with the given standard deviation.
///
/// A non-positive deviation returns 0.0 without consuming randomness.
pub(crate) fn gaussian<R: Rng + ?Sized>(rng: &mut R, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }
    let z: f64 = rng.sample(StandardNormal);
    z * std_dev
}
