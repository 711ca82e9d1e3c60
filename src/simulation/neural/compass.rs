//! TB1 heading compass.

use super::basis::{AngularBasis, PopulationActivity};
use super::gaussian;
use rand::Rng;

/// Encodes the current heading as a cosine-tuned population with noise.
///
/// Activity is clipped to [-1, 1] after the noise is added, so the
/// population behaves like a saturating ring attractor.
#[derive(Clone, Debug)]
pub struct HeadingEncoder {
    basis: AngularBasis,
    activity: PopulationActivity,
    noise_std: f64,
}

impl HeadingEncoder {
    #[must_use]
    pub fn new(neurons: usize, noise_std: f64) -> Self {
        Self {
            basis: AngularBasis::new(neurons),
            activity: PopulationActivity::zeros(neurons),
            noise_std,
        }
    }

    /// Re-encodes `heading`, overwriting the cached activity.
    pub fn update<R: Rng + ?Sized>(&mut self, heading: f64, rng: &mut R) -> &PopulationActivity {
        self.activity = self.basis.encode(heading, 1.0);
        for a in self.activity.as_mut_slice() {
            *a = (*a + gaussian(rng, self.noise_std)).clamp(-1.0, 1.0);
        }
        &self.activity
    }

    /// Heading recovered from the population vector of the cached activity.
    #[must_use]
    pub fn decoded_heading(&self) -> f64 {
        let (x, y) = self.basis.decode(&self.activity);
        y.atan2(x)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::neural::angle_diff;
    use rand::{rngs::SmallRng, SeedableRng};
    use std::f64::consts::PI;

    #[test]
    fn test_noise_free_round_trip() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut compass = HeadingEncoder::new(8, 0.0);
        for k in -20..=20 {
            let heading = f64::from(k) * PI / 20.0;
            compass.update(heading, &mut rng);
            assert!(angle_diff(compass.decoded_heading(), heading).abs() < 1e-9);
        }
    }

    #[test]
    fn test_activity_is_clipped() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut compass = HeadingEncoder::new(8, 5.0);
        let activity = compass.update(0.3, &mut rng);
        assert_eq!(activity.len(), 8);
        assert!(activity.as_slice().iter().all(|a| (-1.0..=1.0).contains(a)));
    }

    #[test]
    fn test_peak_column_matches_heading() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut compass = HeadingEncoder::new(8, 0.0);
        compass.update(PI / 2.0, &mut rng);
        // Column 2 of 8 prefers π/2
        assert!((compass.activity().as_slice()[2] - 1.0).abs() < 1e-12);
    }
}
