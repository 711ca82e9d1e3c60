//! Exploration strategies.
//!
//! While exploring, the controller delegates its turn choice to a pluggable
//! [`ExplorationStrategy`]. Strategies may keep their own bookkeeping (the
//! coverage explorer owns a visit-count map) and are told about every
//! committed position through [`ExplorationStrategy::observe`].

use crate::simulation::config::{ExplorationKind, NavigatorConfig};
use crate::simulation::memory::CoverageMap;
use crate::simulation::neural::gaussian;
use crate::simulation::params::{COVERAGE_LOOK_DIRECTIONS, OUT_OF_BOUNDS_PENALTY};
use rand::RngCore;
use std::f64::consts::FRAC_PI_2;
use std::fmt;

/// Position, heading and stride handed to an explorer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    /// Distance moved per tick
    pub stride: f64,
}

/// Chooses an (unclipped) turn while the agent is exploring.
pub trait ExplorationStrategy: fmt::Debug + Send {
    /// Proposed heading change in radians.
    fn turn(&self, pose: Pose, rng: &mut dyn RngCore) -> f64;

    /// Called once per tick with the committed position.
    fn observe(&mut self, _x: f64, _y: f64) {}

    /// Visit-count map, for strategies that keep one.
    fn coverage(&self) -> Option<&CoverageMap> {
        None
    }
}

/// Builds the explorer named by the configuration.
#[must_use]
pub fn from_config(config: &NavigatorConfig) -> Box<dyn ExplorationStrategy> {
    match config.exploration {
        ExplorationKind::RandomWalk => Box::new(RandomWalk::new(config.explore_turn_std)),
        ExplorationKind::CoverageBias => Box::new(CoverageBias::new(
            CoverageMap::new(config.arena_size, config.coverage_resolution),
            config.coverage_lookahead,
            config.coverage_jitter,
        )),
    }
}

/// Unbiased Gaussian random walk.
#[derive(Clone, Debug)]
pub struct RandomWalk {
    turn_std: f64,
}

impl RandomWalk {
    #[must_use]
    pub const fn new(turn_std: f64) -> Self {
        Self { turn_std }
    }
}

impl ExplorationStrategy for RandomWalk {
    fn turn(&self, _pose: Pose, rng: &mut dyn RngCore) -> f64 {
        gaussian(rng, self.turn_std)
    }
}

/// Steers toward the least-visited cell among a fan of look directions.
///
/// Each candidate in [-π/2, π/2] relative to the heading is probed
/// `lookahead` strides ahead; probes off the map score a large penalty. The
/// best candidate (first one on ties) is returned with Gaussian jitter.
#[derive(Clone, Debug)]
pub struct CoverageBias {
    map: CoverageMap,
    lookahead: f64,
    jitter: f64,
}

impl CoverageBias {
    #[must_use]
    pub const fn new(map: CoverageMap, lookahead: f64, jitter: f64) -> Self {
        Self {
            map,
            lookahead,
            jitter,
        }
    }

    #[allow(clippy::cast_precision_loss)] // Direction count is tiny
    fn look_angles() -> impl Iterator<Item = f64> {
        let span = 2.0 * FRAC_PI_2;
        let last = (COVERAGE_LOOK_DIRECTIONS - 1) as f64;
        (0..COVERAGE_LOOK_DIRECTIONS).map(move |i| -FRAC_PI_2 + span * i as f64 / last)
    }

    fn score(&self, pose: Pose, offset: f64) -> f64 {
        let heading = pose.heading + offset;
        let reach = pose.stride * self.lookahead;
        let probe_x = pose.x + heading.cos() * reach;
        let probe_y = pose.y + heading.sin() * reach;
        self.map
            .visits(probe_x, probe_y)
            .map_or(OUT_OF_BOUNDS_PENALTY, |v| -f64::from(v))
    }

    /// Look direction with the best score, before jitter.
    #[must_use]
    pub fn preferred_offset(&self, pose: Pose) -> f64 {
        let mut best = (0.0, f64::NEG_INFINITY);
        for offset in Self::look_angles() {
            let score = self.score(pose, offset);
            if score > best.1 {
                best = (offset, score);
            }
        }
        best.0
    }
}

impl ExplorationStrategy for CoverageBias {
    fn turn(&self, pose: Pose, rng: &mut dyn RngCore) -> f64 {
        self.preferred_offset(pose) + gaussian(rng, self.jitter)
    }

    fn observe(&mut self, x: f64, y: f64) {
        self.map.record_visit(x, y);
    }

    fn coverage(&self) -> Option<&CoverageMap> {
        Some(&self.map)
    }
}
