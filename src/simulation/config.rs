//! Construction-time configuration for a navigator.

use crate::simulation::params::{
    ARENA_SIZE, ARRIVAL_RADIUS, CONSOLIDATION_INCREMENT, COVERAGE_JITTER, COVERAGE_LOOKAHEAD,
    COVERAGE_RESOLUTION, DISCOVERY_TIMES, EXPLORE_TURN_STD, HEADING_NEURONS, HEADING_NOISE,
    INTEGRATOR_DECAY, INTEGRATOR_GAIN, INTEGRATOR_NEURONS, INTEGRATOR_NOISE, MAX_STRENGTH,
    MAX_TURN, MEMORY_CAPACITY, MEMORY_INTERFERENCE, RECALL_TIMEOUT, REWARD_STRENGTH, SPEED,
    STEERING_GAIN, TIMESTEP,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while building a navigator from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Steering rule used while exploring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationKind {
    /// Gaussian random walk.
    RandomWalk,
    /// Prefer directions leading into less-visited coverage cells.
    #[default]
    CoverageBias,
}

/// Static configuration for a [`Navigator`](super::agent::Navigator).
///
/// Every field has a default; JSON files may specify any subset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Edge length of the square arena.
    pub arena_size: f64,
    /// Simulated seconds per tick.
    pub dt: f64,
    /// Forward speed in arena units per second.
    pub speed: f64,
    /// Nest position; `None` places it at the arena centre.
    pub nest: Option<[f64; 2]>,
    pub heading_neurons: usize,
    pub integrator_neurons: usize,
    pub heading_noise: f64,
    pub integrator_noise: f64,
    pub integrator_gain: f64,
    /// Fractional leak per tick, in [0, 1).
    pub integrator_decay: f64,
    pub memory_capacity: usize,
    /// Std-dev of noise added to snapshots on store.
    pub memory_interference: f64,
    pub reward_strength: f64,
    pub consolidation_increment: f64,
    pub max_strength: f64,
    pub arrival_radius: f64,
    /// Ascending elapsed times at which the next site is found while exploring.
    pub discovery_times: Vec<f64>,
    /// Fixed food locations discovered by proximity while exploring.
    pub food_sites: Vec<[f64; 2]>,
    pub max_turn: f64,
    pub steering_gain: f64,
    pub explore_turn_std: f64,
    pub exploration: ExplorationKind,
    pub coverage_resolution: f64,
    /// How many ticks ahead the coverage explorer probes.
    pub coverage_lookahead: f64,
    pub coverage_jitter: f64,
    /// Seconds allowed in memory recall before homing instead.
    pub recall_timeout: f64,
    /// Optional RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            arena_size: ARENA_SIZE,
            dt: TIMESTEP,
            speed: SPEED,
            nest: None,
            heading_neurons: HEADING_NEURONS,
            integrator_neurons: INTEGRATOR_NEURONS,
            heading_noise: HEADING_NOISE,
            integrator_noise: INTEGRATOR_NOISE,
            integrator_gain: INTEGRATOR_GAIN,
            integrator_decay: INTEGRATOR_DECAY,
            memory_capacity: MEMORY_CAPACITY,
            memory_interference: MEMORY_INTERFERENCE,
            reward_strength: REWARD_STRENGTH,
            consolidation_increment: CONSOLIDATION_INCREMENT,
            max_strength: MAX_STRENGTH,
            arrival_radius: ARRIVAL_RADIUS,
            discovery_times: DISCOVERY_TIMES.to_vec(),
            food_sites: Vec::new(),
            max_turn: MAX_TURN,
            steering_gain: STEERING_GAIN,
            explore_turn_std: EXPLORE_TURN_STD,
            exploration: ExplorationKind::default(),
            coverage_resolution: COVERAGE_RESOLUTION,
            coverage_lookahead: COVERAGE_LOOKAHEAD,
            coverage_jitter: COVERAGE_JITTER,
            recall_timeout: RECALL_TIMEOUT,
            seed: None,
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl NavigatorConfig {
    /// Loads a JSON configuration file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses a JSON configuration and validates it.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configured nest, defaulting to the arena centre.
    #[must_use]
    pub fn nest_position(&self) -> (f64, f64) {
        self.nest
            .map_or((self.arena_size / 2.0, self.arena_size / 2.0), |[x, y]| (x, y))
    }

    /// Distance covered in one tick.
    #[must_use]
    pub fn step_length(&self) -> f64 {
        self.speed * self.dt
    }

    fn in_arena(&self, x: f64, y: f64) -> bool {
        (0.0..=self.arena_size).contains(&x) && (0.0..=self.arena_size).contains(&y)
    }

    /// Checks every parameter, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.arena_size) {
            return Err(ConfigError::Invalid("arena_size must be positive"));
        }
        if !positive(self.dt) {
            return Err(ConfigError::Invalid("dt must be positive"));
        }
        if !positive(self.speed) {
            return Err(ConfigError::Invalid("speed must be positive"));
        }
        if self.arena_size < 2.0 * self.step_length() {
            return Err(ConfigError::Invalid(
                "arena_size must be at least two steps (speed * dt) across",
            ));
        }
        let (nest_x, nest_y) = self.nest_position();
        if !self.in_arena(nest_x, nest_y) {
            return Err(ConfigError::Invalid("nest must lie inside the arena"));
        }
        if self.heading_neurons == 0 || self.integrator_neurons == 0 {
            return Err(ConfigError::Invalid("population sizes must be non-zero"));
        }
        if !non_negative(self.heading_noise)
            || !non_negative(self.integrator_noise)
            || !non_negative(self.memory_interference)
            || !non_negative(self.explore_turn_std)
            || !non_negative(self.coverage_jitter)
        {
            return Err(ConfigError::Invalid(
                "noise standard deviations must be non-negative",
            ));
        }
        if !positive(self.integrator_gain) {
            return Err(ConfigError::Invalid("integrator_gain must be positive"));
        }
        if !(self.integrator_decay.is_finite() && (0.0..1.0).contains(&self.integrator_decay)) {
            return Err(ConfigError::Invalid("integrator_decay must be in [0, 1)"));
        }
        if self.memory_capacity == 0 {
            return Err(ConfigError::Invalid("memory_capacity must be non-zero"));
        }
        if !non_negative(self.reward_strength)
            || !non_negative(self.consolidation_increment)
            || !non_negative(self.max_strength)
        {
            return Err(ConfigError::Invalid(
                "memory strengths and increments must be non-negative",
            ));
        }
        if self.max_strength < self.reward_strength {
            return Err(ConfigError::Invalid(
                "max_strength cannot be below reward_strength",
            ));
        }
        if !positive(self.arrival_radius) {
            return Err(ConfigError::Invalid("arrival_radius must be positive"));
        }
        if self.discovery_times.iter().any(|t| !non_negative(*t))
            || self.discovery_times.windows(2).any(|w| w[1] < w[0])
        {
            return Err(ConfigError::Invalid(
                "discovery_times must be non-negative and ascending",
            ));
        }
        if self.food_sites.iter().any(|[x, y]| !self.in_arena(*x, *y)) {
            return Err(ConfigError::Invalid("food_sites must lie inside the arena"));
        }
        if !positive(self.max_turn) || !non_negative(self.steering_gain) {
            return Err(ConfigError::Invalid(
                "max_turn must be positive and steering_gain non-negative",
            ));
        }
        if !positive(self.coverage_resolution) || !positive(self.coverage_lookahead) {
            return Err(ConfigError::Invalid(
                "coverage resolution and lookahead must be positive",
            ));
        }
        if !positive(self.recall_timeout) {
            return Err(ConfigError::Invalid("recall_timeout must be positive"));
        }
        Ok(())
    }

    /// Returns the configured RNG seed, generating one from entropy if absent.
    #[must_use]
    pub fn seeded_rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                SmallRng::seed_from_u64(seed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(NavigatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_timestep() {
        let config = NavigatorConfig {
            dt: 0.0,
            ..NavigatorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_capacity_and_population() {
        let config = NavigatorConfig {
            memory_capacity: 0,
            ..NavigatorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = NavigatorConfig {
            integrator_neurons: 0,
            ..NavigatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unsorted_discovery_times() {
        let config = NavigatorConfig {
            discovery_times: vec![60.0, 30.0],
            ..NavigatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = NavigatorConfig::from_json_str(r#"{ "seed": 7, "exploration": "random_walk" }"#)
            .expect("valid config");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.exploration, ExplorationKind::RandomWalk);
        assert_eq!(config.memory_capacity, MEMORY_CAPACITY);
        assert_eq!(config.nest_position(), (50.0, 50.0));
    }

    #[test]
    fn test_invalid_json_values_rejected() {
        let err = NavigatorConfig::from_json_str(r#"{ "speed": -1.0 }"#).unwrap_err();
        assert!(err.to_string().contains("speed"));
    }
}
