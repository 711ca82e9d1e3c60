//! Simulation hyperparameters.
//!
//! These are the defaults behind [`NavigatorConfig`](super::config::NavigatorConfig);
//! every value can be overridden at construction.

// === Arena & Timing ===
/// Edge length of the square arena
pub const ARENA_SIZE: f64 = 100.0;
/// Simulated seconds per tick
pub const TIMESTEP: f64 = 0.2;
/// Forward speed in arena units per second
pub const SPEED: f64 = 1.0;

// === Neural Populations ===
/// TB1 compass columns
pub const HEADING_NEURONS: usize = 8;
/// CPU4 / CPU1 columns
pub const INTEGRATOR_NEURONS: usize = 16;
pub const HEADING_NOISE: f64 = 0.05;
pub const INTEGRATOR_NOISE: f64 = 0.05;
pub const INTEGRATOR_GAIN: f64 = 1.0;
/// Fractional leak per tick (0 = perfect integrator)
pub const INTEGRATOR_DECAY: f64 = 0.0;

// === Vector Memory ===
pub const MEMORY_CAPACITY: usize = 4;
/// Std-dev of noise added to a snapshot on store
pub const MEMORY_INTERFERENCE: f64 = 0.0;
pub const REWARD_STRENGTH: f64 = 1.0;
pub const CONSOLIDATION_INCREMENT: f64 = 0.1;
pub const MAX_STRENGTH: f64 = 2.0;

// === Behavior ===
/// Distance below which the agent is "at" the nest or a site
pub const ARRIVAL_RADIUS: f64 = 3.0;
/// Elapsed times after which the next food site is found while exploring
pub const DISCOVERY_TIMES: [f64; 2] = [30.0, 60.0];
/// Minimum distance, in arrival radii, between a new site and the nest or any known site
pub const SITE_SEPARATION: f64 = 3.0;
/// Maximum heading change per tick in radians
pub const MAX_TURN: f64 = 0.5;
/// Proportional gain applied to heading error when steering toward a vector
pub const STEERING_GAIN: f64 = 0.5;
/// Std-dev of the random-walk turn while exploring
pub const EXPLORE_TURN_STD: f64 = 0.3;
/// Seconds spent recalling a memory before giving up and homing
pub const RECALL_TIMEOUT: f64 = 60.0;

// === Exploration Coverage ===
/// Arena units per coverage cell
pub const COVERAGE_RESOLUTION: f64 = 2.0;
/// Ticks ahead each candidate direction is probed
pub const COVERAGE_LOOKAHEAD: f64 = 5.0;
/// Number of candidate directions spread over [-π/2, π/2]
pub const COVERAGE_LOOK_DIRECTIONS: usize = 9;
/// Std-dev of the jitter added to the chosen coverage direction
pub const COVERAGE_JITTER: f64 = 0.2;
/// Score given to probes that fall outside the arena
pub const OUT_OF_BOUNDS_PENALTY: f64 = -1000.0;
