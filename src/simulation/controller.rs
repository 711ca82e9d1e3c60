//! Behavioral state machine and steering rules.
//!
//! The controller is stateless: each tick the agent hands it an
//! [`Observation`] (for transitions) or a [`SteeringInput`] (for the turn).
//! Transitions are an explicit table of guarded rules, evaluated in order;
//! the first rule whose source mode matches and whose guard holds fires.
//!
//! ```text
//! Explore ──discovery──▶ Home ──nest──▶ RecallMemory ──site──▶ Shortcut ──site──▶ Forage
//!    ▲                    ▲  │                │  (one site known)            │
//!    └────────────────────┼──┴────────────────┘                              │
//!                         └──────────────── all sites depleted ◀─────────────┘
//! ```

use crate::simulation::config::NavigatorConfig;
use crate::simulation::exploration::{ExplorationStrategy, Pose};
use crate::simulation::neural::angle_diff;
use rand::RngCore;

/// Vectors shorter than this carry no directional preference.
const MIN_STEERING_NORM: f64 = 1e-9;

/// Behavioral mode of the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BehaviorMode {
    /// Searching for food
    #[default]
    Explore,
    /// Following the negated path-integration vector back to the nest
    Home,
    /// Following a recalled vector memory to a known site
    RecallMemory,
    /// Travelling the straight line between two known sites
    Shortcut,
    /// Visiting the nearest undepleted known site
    Forage,
}

impl BehaviorMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Explore => "explore",
            Self::Home => "home",
            Self::RecallMemory => "recall-memory",
            Self::Shortcut => "shortcut",
            Self::Forage => "forage",
        }
    }
}

/// What caused a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A new food site was found while exploring
    SiteDiscovered,
    /// The agent came within the arrival radius of the nest
    NestReached,
    /// The agent came within the arrival radius of its target site
    TargetReached,
    /// Recall took longer than the configured timeout
    RecallTimedOut,
    /// The shortcut ran past its expected length without arriving
    ShortcutOvershot,
    /// No undepleted site is left to forage
    ForageExhausted,
}

/// Conditions sampled by the agent after it moves.
#[derive(Clone, Debug, Default)]
pub struct Observation {
    pub mode: BehaviorMode,
    /// Seconds since the current mode was entered
    pub time_in_mode: f64,
    /// Path length travelled since the current mode was entered
    pub travelled_in_mode: f64,
    pub distance_to_nest: f64,
    /// Distance to the target site, if there is one
    pub distance_to_target: Option<f64>,
    /// True when a food site is found at this tick
    pub discovery: bool,
    pub known_sites: usize,
    pub undepleted_sites: usize,
    pub stored_memories: usize,
    /// Straight-line length of the active shortcut
    pub shortcut_length: Option<f64>,
}

type Guard = fn(&Observation, &BehaviorController) -> bool;
type Successor = fn(&Observation) -> BehaviorMode;

/// One row of the transition table.
struct Rule {
    from: BehaviorMode,
    event: Event,
    guard: Guard,
    next: Successor,
}

fn at_target(obs: &Observation, ctl: &BehaviorController) -> bool {
    obs.distance_to_target
        .is_some_and(|d| d < ctl.arrival_radius)
}

fn discovered(obs: &Observation, _ctl: &BehaviorController) -> bool {
    obs.discovery
}

fn at_nest(obs: &Observation, ctl: &BehaviorController) -> bool {
    obs.distance_to_nest < ctl.arrival_radius
}

fn recall_expired(obs: &Observation, ctl: &BehaviorController) -> bool {
    obs.time_in_mode > ctl.recall_timeout
}

fn overshot(obs: &Observation, ctl: &BehaviorController) -> bool {
    obs.travelled_in_mode > obs.shortcut_length.unwrap_or(0.0) + ctl.arrival_radius
}

fn no_target(obs: &Observation, _ctl: &BehaviorController) -> bool {
    obs.distance_to_target.is_none()
}

fn home(_obs: &Observation) -> BehaviorMode {
    BehaviorMode::Home
}

fn forage(_obs: &Observation) -> BehaviorMode {
    BehaviorMode::Forage
}

fn after_nest(obs: &Observation) -> BehaviorMode {
    if obs.stored_memories > 0 {
        BehaviorMode::RecallMemory
    } else {
        BehaviorMode::Explore
    }
}

fn after_recall(obs: &Observation) -> BehaviorMode {
    if obs.known_sites >= 2 {
        BehaviorMode::Shortcut
    } else {
        BehaviorMode::Explore
    }
}

fn after_forage(obs: &Observation) -> BehaviorMode {
    // The site just reached is about to be depleted
    if obs.undepleted_sites > 1 {
        BehaviorMode::Forage
    } else {
        BehaviorMode::Home
    }
}

const TRANSITIONS: &[Rule] = &[
    Rule {
        from: BehaviorMode::Explore,
        event: Event::SiteDiscovered,
        guard: discovered,
        next: home,
    },
    Rule {
        from: BehaviorMode::Home,
        event: Event::NestReached,
        guard: at_nest,
        next: after_nest,
    },
    Rule {
        from: BehaviorMode::RecallMemory,
        event: Event::TargetReached,
        guard: at_target,
        next: after_recall,
    },
    Rule {
        from: BehaviorMode::RecallMemory,
        event: Event::RecallTimedOut,
        guard: recall_expired,
        next: home,
    },
    Rule {
        from: BehaviorMode::Shortcut,
        event: Event::TargetReached,
        guard: at_target,
        next: forage,
    },
    Rule {
        from: BehaviorMode::Shortcut,
        event: Event::ShortcutOvershot,
        guard: overshot,
        next: forage,
    },
    Rule {
        from: BehaviorMode::Forage,
        event: Event::TargetReached,
        guard: at_target,
        next: after_forage,
    },
    Rule {
        from: BehaviorMode::Forage,
        event: Event::ForageExhausted,
        guard: no_target,
        next: home,
    },
];

/// Everything the steering rules read in one tick.
#[derive(Clone, Copy, Debug)]
pub struct SteeringInput {
    pub mode: BehaviorMode,
    pub pose: Pose,
    /// Decoded path-integration vector (home → agent)
    pub integrator_vector: (f64, f64),
    /// Decoded memory-comparison signal (agent → recalled site)
    pub comparison_vector: (f64, f64),
    /// Straight line between the shortcut's origin and target sites
    pub shortcut_vector: Option<(f64, f64)>,
    /// Straight line from the agent to its forage target
    pub forage_vector: Option<(f64, f64)>,
}

/// Stateless transition and steering logic.
#[derive(Clone, Copy, Debug)]
pub struct BehaviorController {
    max_turn: f64,
    steering_gain: f64,
    arrival_radius: f64,
    recall_timeout: f64,
}

impl BehaviorController {
    #[must_use]
    pub fn new(config: &NavigatorConfig) -> Self {
        Self {
            max_turn: config.max_turn,
            steering_gain: config.steering_gain,
            arrival_radius: config.arrival_radius,
            recall_timeout: config.recall_timeout,
        }
    }

    #[must_use]
    pub const fn arrival_radius(&self) -> f64 {
        self.arrival_radius
    }

    /// Returns the first transition whose guard holds, if any.
    #[must_use]
    pub fn evaluate(&self, obs: &Observation) -> Option<(Event, BehaviorMode)> {
        TRANSITIONS
            .iter()
            .filter(|rule| rule.from == obs.mode)
            .find(|rule| (rule.guard)(obs, self))
            .map(|rule| (rule.event, (rule.next)(obs)))
    }

    /// Heading change for this tick, clipped to ±`max_turn`.
    pub fn steer(
        &self,
        input: &SteeringInput,
        explorer: &dyn ExplorationStrategy,
        rng: &mut dyn RngCore,
    ) -> f64 {
        let heading = input.pose.heading;
        let turn = match input.mode {
            BehaviorMode::Explore => explorer.turn(input.pose, rng),
            BehaviorMode::Home => {
                let (x, y) = input.integrator_vector;
                self.turn_toward((-x, -y), heading)
            }
            BehaviorMode::RecallMemory => self.turn_toward(input.comparison_vector, heading),
            BehaviorMode::Shortcut => input
                .shortcut_vector
                .map_or(0.0, |v| self.turn_toward(v, heading)),
            BehaviorMode::Forage => input
                .forage_vector
                .map_or(0.0, |v| self.turn_toward(v, heading)),
        };
        if turn.is_finite() {
            turn.clamp(-self.max_turn, self.max_turn)
        } else {
            0.0
        }
    }

    /// Proportional turn toward `vector`; a zero vector means "keep going".
    #[must_use]
    pub fn turn_toward(&self, vector: (f64, f64), heading: f64) -> f64 {
        let (x, y) = vector;
        if x.hypot(y) < MIN_STEERING_NORM {
            return 0.0;
        }
        self.steering_gain * angle_diff(y.atan2(x), heading)
    }
}
