use crate::simulation::config::{ConfigError, NavigatorConfig};
use crate::simulation::controller::{
    BehaviorController, BehaviorMode, Event, Observation, SteeringInput,
};
use crate::simulation::exploration::{self, ExplorationStrategy, Pose};
use crate::simulation::memory::CoverageMap;
use crate::simulation::neural::{
    wrap_angle, HeadingEncoder, PathIntegrator, PopulationActivity, VectorMemoryBank,
};
use crate::simulation::params::SITE_SEPARATION;
use rand::{rngs::SmallRng, Rng};
use std::f64::consts::PI;
use tracing::{debug, info, trace};

/// Validates that a value is finite (not NaN or infinite).
/// Returns a safe fallback (0.0) in release mode if the value is non-finite.
#[inline]
fn assert_finite(value: f64, context: &str) -> f64 {
    debug_assert!(value.is_finite(), "Non-finite value in {context}: {value}");
    if value.is_finite() { value } else { 0.0 }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// A food site the agent has found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodSite {
    pub x: f64,
    pub y: f64,
    /// Elapsed time at discovery
    pub discovered_at: f64,
    /// Arrivals after discovery
    pub visits: u32,
    /// Eaten since the last nest visit
    pub depleted: bool,
}

impl FoodSite {
    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Distances sampled once per tick after a site is known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceSample {
    pub time: f64,
    pub distance_to_nest: f64,
    pub distance_to_latest_site: f64,
}

/// An insect-like navigator driven by central complex circuits.
///
/// # Cognitive Architecture
/// - **TB1 compass**: population code of the current heading
/// - **CPU4 integrator**: leaky population code of the displacement from the nest
/// - **CPU1 memory**: bounded bank of integrator snapshots taken at food sites
/// - **Controller**: explicit state machine choosing a turn every tick
#[derive(Debug)]
pub struct Navigator {
    // === Pose ===
    x: f64,
    y: f64,
    heading: f64,
    nest: (f64, f64),

    // === Behavior ===
    mode: BehaviorMode,
    mode_entered_at: f64,
    target_memory: Option<usize>,
    target_site: Option<usize>,
    /// Site a shortcut departs from
    origin_site: Option<usize>,
    elapsed: f64,
    tick_count: u64,
    timed_discoveries: usize,

    // === Neural Circuits ===
    compass: HeadingEncoder,
    integrator: PathIntegrator,
    memory: VectorMemoryBank,
    /// CPU1 comparison: recalled target minus current integrator state
    comparison: PopulationActivity,

    // === Observation ===
    trajectory: Vec<(f64, f64)>,
    sites: Vec<FoodSite>,
    metrics: Vec<PerformanceSample>,

    explorer: Box<dyn ExplorationStrategy>,
    controller: BehaviorController,
    rng: SmallRng,
    config: NavigatorConfig,
}

impl Navigator {
    /// Creates a navigator at the nest using the configured explorer.
    pub fn new(config: NavigatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let explorer = exploration::from_config(&config);
        Self::with_explorer(config, explorer)
    }

    /// Creates a navigator with a caller-supplied exploration strategy.
    pub fn with_explorer(
        config: NavigatorConfig,
        explorer: Box<dyn ExplorationStrategy>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = config.seeded_rng();
        let nest = config.nest_position();
        let heading = wrap_angle(rng.random_range(-PI..PI));

        let mut compass = HeadingEncoder::new(config.heading_neurons, config.heading_noise);
        compass.update(heading, &mut rng);

        let mut explorer = explorer;
        explorer.observe(nest.0, nest.1);

        Ok(Self {
            x: nest.0,
            y: nest.1,
            heading,
            nest,
            mode: BehaviorMode::Explore,
            mode_entered_at: 0.0,
            target_memory: None,
            target_site: None,
            origin_site: None,
            elapsed: 0.0,
            tick_count: 0,
            timed_discoveries: 0,
            compass,
            integrator: PathIntegrator::new(
                config.integrator_neurons,
                config.integrator_gain,
                config.integrator_decay,
                config.integrator_noise,
            ),
            memory: VectorMemoryBank::new(
                config.memory_capacity,
                config.integrator_neurons,
                config.memory_interference,
                config.consolidation_increment,
                config.max_strength,
            ),
            comparison: PopulationActivity::zeros(config.integrator_neurons),
            trajectory: vec![nest],
            sites: Vec::new(),
            metrics: Vec::new(),
            explorer,
            controller: BehaviorController::new(&config),
            rng,
            config,
        })
    }

    /// Advances the simulation by one tick.
    ///
    /// 1. Asks the controller for a turn and applies it.
    /// 2. Moves forward, reflecting off the arena boundary.
    /// 3. Integrates the realized displacement and re-encodes heading.
    /// 4. Advances time and evaluates behavioral transitions.
    /// 5. Refreshes the memory comparison signal and coverage bookkeeping.
    pub fn step(&mut self) {
        // 1. Steering
        let input = self.steering_input();
        let turn = self
            .controller
            .steer(&input, self.explorer.as_ref(), &mut self.rng);
        self.heading = wrap_angle(self.heading + assert_finite(turn, "turn"));

        // 2. Movement
        let stride = self.config.step_length();
        let mut dx = stride * self.heading.cos();
        let mut dy = stride * self.heading.sin();
        if !self.inside_arena(self.x + dx, self.y + dy) {
            trace!(x = self.x, y = self.y, "boundary reflection");
            self.heading = wrap_angle(self.heading + PI);
            dx = -dx;
            dy = -dy;
        }
        let size = self.config.arena_size;
        let (old_x, old_y) = (self.x, self.y);
        self.x = assert_finite(self.x + dx, "x").clamp(0.0, size);
        self.y = assert_finite(self.y + dy, "y").clamp(0.0, size);
        self.trajectory.push((self.x, self.y));

        // 3. Neural updates with the realized displacement
        self.integrator
            .integrate(self.x - old_x, self.y - old_y, &mut self.rng);
        self.compass.update(self.heading, &mut self.rng);

        // 4. Time and behavior
        self.elapsed += self.config.dt;
        self.tick_count += 1;
        let observation = self.observe();
        if let Some((event, next)) = self.controller.evaluate(&observation) {
            self.apply_transition(event, next);
        }

        // 5. Bookkeeping
        self.refresh_comparison();
        self.explorer.observe(self.x, self.y);
        if let Some(latest) = self.sites.last() {
            self.metrics.push(PerformanceSample {
                time: self.elapsed,
                distance_to_nest: distance(self.position(), self.nest),
                distance_to_latest_site: distance(self.position(), latest.position()),
            });
        }
    }

    /// Runs `ticks` consecutive steps.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    fn inside_arena(&self, x: f64, y: f64) -> bool {
        let size = self.config.arena_size;
        (0.0..=size).contains(&x) && (0.0..=size).contains(&y)
    }

    fn pose(&self) -> Pose {
        Pose {
            x: self.x,
            y: self.y,
            heading: self.heading,
            stride: self.config.step_length(),
        }
    }

    fn site_position(&self, index: Option<usize>) -> Option<(f64, f64)> {
        index
            .and_then(|i| self.sites.get(i))
            .map(FoodSite::position)
    }

    fn steering_input(&self) -> SteeringInput {
        let basis = self.integrator.basis();
        let target = self.site_position(self.target_site);

        let shortcut_vector = target.map(|(tx, ty)| {
            let (ox, oy) = self.site_position(self.origin_site).unwrap_or((self.x, self.y));
            (tx - ox, ty - oy)
        });
        let forage_vector = target.map(|(tx, ty)| (tx - self.x, ty - self.y));

        SteeringInput {
            mode: self.mode,
            pose: self.pose(),
            integrator_vector: self.integrator.decode(),
            comparison_vector: basis.decode(&self.comparison),
            shortcut_vector,
            forage_vector,
        }
    }

    /// Samples the guard inputs for this tick.
    fn observe(&self) -> Observation {
        let position = self.position();
        let time_in_mode = self.elapsed - self.mode_entered_at;
        let shortcut_length = self
            .site_position(self.origin_site)
            .zip(self.site_position(self.target_site))
            .map(|(from, to)| distance(from, to));

        Observation {
            mode: self.mode,
            time_in_mode,
            travelled_in_mode: time_in_mode * self.config.speed,
            distance_to_nest: distance(position, self.nest),
            distance_to_target: self
                .site_position(self.target_site)
                .map(|site| distance(position, site)),
            discovery: self.mode == BehaviorMode::Explore && self.pending_discovery().is_some(),
            known_sites: self.sites.len(),
            undepleted_sites: self.sites.iter().filter(|s| !s.depleted).count(),
            stored_memories: self.memory.len(),
            shortcut_length,
        }
    }

    /// Food found at this tick: an undiscovered fixed site within reach, or
    /// the current position once the next discovery time has passed.
    ///
    /// Sites closer than `SITE_SEPARATION` arrival radii to the nest or to a
    /// known site are ignored, and a timed discovery waits until the agent is
    /// clear of them. Getting from one arrival region to another then takes
    /// at least one arrival radius of travel.
    fn pending_discovery(&self) -> Option<(f64, f64)> {
        let radius = self.controller.arrival_radius();
        let position = self.position();

        let fixed = self
            .config
            .food_sites
            .iter()
            .map(|[x, y]| (*x, *y))
            .find(|site| distance(position, *site) < radius && self.is_clear(*site));
        if fixed.is_some() {
            return fixed;
        }

        self.config
            .discovery_times
            .get(self.timed_discoveries)
            .filter(|threshold| self.elapsed > **threshold && self.is_clear(position))
            .map(|_| position)
    }

    /// True when `point` is far enough from the nest and every known site.
    fn is_clear(&self, point: (f64, f64)) -> bool {
        let separation = self.controller.arrival_radius() * SITE_SEPARATION;
        distance(point, self.nest) >= separation
            && self
                .sites
                .iter()
                .all(|known| distance(known.position(), point) >= separation)
    }

    fn apply_transition(&mut self, event: Event, next: BehaviorMode) {
        debug!(
            from = self.mode.label(),
            to = next.label(),
            ?event,
            time = self.elapsed,
            "behavior transition"
        );

        match event {
            Event::SiteDiscovered => self.discover_site(),
            Event::NestReached => self.recalibrate_at_nest(next),
            Event::TargetReached => self.arrive_at_target(),
            Event::RecallTimedOut | Event::ShortcutOvershot | Event::ForageExhausted => {}
        }

        self.mode = next;
        self.mode_entered_at = self.elapsed;

        match next {
            BehaviorMode::Shortcut => self.select_shortcut(),
            BehaviorMode::Forage => self.select_forage_target(),
            BehaviorMode::RecallMemory => {}
            BehaviorMode::Explore | BehaviorMode::Home => self.clear_targets(),
        }
    }

    fn discover_site(&mut self) {
        let Some((x, y)) = self.pending_discovery() else {
            return;
        };
        let from_timer = !self
            .config
            .food_sites
            .iter()
            .any(|[fx, fy]| *fx == x && *fy == y);
        if from_timer {
            self.timed_discoveries += 1;
        }

        self.sites.push(FoodSite {
            x,
            y,
            discovered_at: self.elapsed,
            visits: 0,
            depleted: false,
        });
        self.memory.store(
            self.integrator.activity(),
            self.config.reward_strength,
            &mut self.rng,
        );
        info!(
            site = self.sites.len() - 1,
            x,
            y,
            time = self.elapsed,
            memories = self.memory.len(),
            "food site discovered"
        );
    }

    fn recalibrate_at_nest(&mut self, next: BehaviorMode) {
        self.integrator.reset();
        for site in &mut self.sites {
            site.depleted = false;
        }
        if next == BehaviorMode::RecallMemory {
            self.target_memory = self.memory.newest();
            self.target_site = self.sites.len().checked_sub(1);
            self.origin_site = None;
        }
        info!(
            time = self.elapsed,
            target = ?self.target_site,
            "recalibrated at nest"
        );
    }

    fn arrive_at_target(&mut self) {
        let Some(index) = self.target_site else {
            return;
        };
        if let Some(site) = self.sites.get_mut(index) {
            site.visits = site.visits.saturating_add(1);
            site.depleted = true;
        }
        if let Some(memory_id) = self.memory_for_site(index) {
            self.memory.consolidate(memory_id);
        }
    }

    /// Departs from the site just reached toward the most recent other site.
    fn select_shortcut(&mut self) {
        let origin = self.target_site;
        let destination = (0..self.sites.len())
            .rev()
            .filter(|i| Some(*i) != origin)
            .find(|i| !self.sites[*i].depleted)
            .or_else(|| (0..self.sites.len()).rev().find(|i| Some(*i) != origin));

        self.origin_site = origin;
        self.target_site = destination;
        self.target_memory = destination.and_then(|i| self.memory_for_site(i));
    }

    /// Picks the nearest undepleted site by straight-line distance.
    fn select_forage_target(&mut self) {
        let position = self.position();
        let nearest = self
            .sites
            .iter()
            .enumerate()
            .filter(|(_, site)| !site.depleted)
            .min_by(|(_, a), (_, b)| {
                distance(position, a.position()).total_cmp(&distance(position, b.position()))
            })
            .map(|(i, _)| i);

        self.origin_site = None;
        self.target_site = nearest;
        self.target_memory = nearest.and_then(|i| self.memory_for_site(i));
    }

    fn clear_targets(&mut self) {
        self.target_memory = None;
        self.target_site = None;
        self.origin_site = None;
    }

    /// Memory index holding the snapshot taken at `site`.
    ///
    /// One snapshot is stored per discovered site and the bank evicts the
    /// oldest first, so the newest `memory.len()` sites map onto the bank in
    /// order. Older sites have been forgotten.
    fn memory_for_site(&self, site: usize) -> Option<usize> {
        (site + self.memory.len())
            .checked_sub(self.sites.len())
            .filter(|id| *id < self.memory.len())
    }

    fn refresh_comparison(&mut self) {
        self.comparison = match self.target_memory {
            Some(id) => &self.memory.recall(id) - self.integrator.activity(),
            None => PopulationActivity::zeros(self.memory.neurons()),
        };
    }

    // === Read accessors ===

    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Heading in (-π, π].
    #[must_use]
    pub const fn heading(&self) -> f64 {
        self.heading
    }

    #[must_use]
    pub const fn mode(&self) -> BehaviorMode {
        self.mode
    }

    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub const fn nest(&self) -> (f64, f64) {
        self.nest
    }

    #[must_use]
    pub const fn target_memory(&self) -> Option<usize> {
        self.target_memory
    }

    #[must_use]
    pub const fn target_site(&self) -> Option<usize> {
        self.target_site
    }

    /// Every committed position, starting at the nest.
    #[must_use]
    pub fn trajectory(&self) -> &[(f64, f64)] {
        &self.trajectory
    }

    /// Discovered sites in discovery order.
    #[must_use]
    pub fn sites(&self) -> &[FoodSite] {
        &self.sites
    }

    #[must_use]
    pub fn metrics(&self) -> &[PerformanceSample] {
        &self.metrics
    }

    #[must_use]
    pub fn heading_activity(&self) -> &PopulationActivity {
        self.compass.activity()
    }

    #[must_use]
    pub fn integrator_activity(&self) -> &PopulationActivity {
        self.integrator.activity()
    }

    #[must_use]
    pub fn memory_comparison(&self) -> &PopulationActivity {
        &self.comparison
    }

    #[must_use]
    pub fn memory_strengths(&self) -> Vec<f64> {
        self.memory.strengths()
    }

    /// Estimated vector from the agent back to the nest, in arena units.
    #[must_use]
    pub fn home_vector(&self) -> (f64, f64) {
        let (x, y) = self.integrator.displacement();
        (-x, -y)
    }

    #[must_use]
    pub const fn compass(&self) -> &HeadingEncoder {
        &self.compass
    }

    #[must_use]
    pub const fn integrator(&self) -> &PathIntegrator {
        &self.integrator
    }

    #[must_use]
    pub const fn memory(&self) -> &VectorMemoryBank {
        &self.memory
    }

    #[must_use]
    pub fn coverage(&self) -> Option<&CoverageMap> {
        self.explorer.coverage()
    }

    #[must_use]
    pub const fn config(&self) -> &NavigatorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config(seed: u64) -> NavigatorConfig {
        NavigatorConfig {
            heading_noise: 0.0,
            integrator_noise: 0.0,
            seed: Some(seed),
            ..NavigatorConfig::default()
        }
    }

    #[test]
    fn test_starts_at_nest() {
        let nav = Navigator::new(quiet_config(1)).unwrap();
        assert_eq!(nav.position(), (50.0, 50.0));
        assert_eq!(nav.trajectory().len(), 1);
        assert_eq!(nav.mode(), BehaviorMode::Explore);
    }

    #[test]
    fn test_memory_for_site_after_eviction() {
        let mut nav = Navigator::new(NavigatorConfig {
            memory_capacity: 2,
            ..quiet_config(2)
        })
        .unwrap();
        for i in 0..3 {
            nav.sites.push(FoodSite {
                x: f64::from(i),
                y: 0.0,
                discovered_at: 0.0,
                visits: 0,
                depleted: false,
            });
            nav.memory
                .store(&PopulationActivity::zeros(16), 1.0, &mut nav.rng);
        }
        assert_eq!(nav.memory_for_site(0), None);
        assert_eq!(nav.memory_for_site(1), Some(0));
        assert_eq!(nav.memory_for_site(2), Some(1));
    }

    #[test]
    fn test_integrator_tracks_true_displacement_without_noise() {
        let mut nav = Navigator::new(quiet_config(3)).unwrap();
        nav.run(100);
        let (hx, hy) = nav.home_vector();
        let (x, y) = nav.position();
        assert!((x + hx - 50.0).abs() < 1e-6);
        assert!((y + hy - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_sites_keep_clear_of_nest_and_each_other() {
        let mut nav = Navigator::new(quiet_config(5)).unwrap();
        assert!(!nav.is_clear((52.0, 50.0)));
        assert!(!nav.is_clear((58.9, 50.0)));
        assert!(nav.is_clear((59.0, 50.0)));

        nav.sites.push(FoodSite {
            x: 70.0,
            y: 50.0,
            discovered_at: 0.0,
            visits: 0,
            depleted: false,
        });
        assert!(!nav.is_clear((75.0, 50.0)));
        assert!(nav.is_clear((79.5, 50.0)));
    }

    #[test]
    fn test_timed_discovery_waits_until_clear() {
        let mut nav = Navigator::new(NavigatorConfig {
            discovery_times: vec![0.0],
            ..quiet_config(6)
        })
        .unwrap();
        nav.elapsed = 1.0;
        assert_eq!(nav.pending_discovery(), None);

        nav.x = 80.0;
        assert_eq!(nav.pending_discovery(), Some((80.0, 50.0)));
    }

    #[test]
    fn test_forage_picks_nearest_undepleted() {
        let mut nav = Navigator::new(quiet_config(4)).unwrap();
        for (x, depleted) in [(52.0, true), (60.0, false), (90.0, false)] {
            nav.sites.push(FoodSite {
                x,
                y: 50.0,
                discovered_at: 0.0,
                visits: 0,
                depleted,
            });
        }
        nav.select_forage_target();
        assert_eq!(nav.target_site(), Some(1));
    }
}
