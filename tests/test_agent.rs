//! Tests for navigator construction, accessors and custom explorers.

use cx_navigator::simulation::exploration::{ExplorationStrategy, Pose};
use cx_navigator::simulation::{BehaviorMode, Navigator, NavigatorConfig};
use rand::RngCore;

/// Always turns by a fixed amount.
#[derive(Debug)]
struct Circler(f64);

impl ExplorationStrategy for Circler {
    fn turn(&self, _pose: Pose, _rng: &mut dyn RngCore) -> f64 {
        self.0
    }
}

fn config(seed: u64) -> NavigatorConfig {
    NavigatorConfig {
        heading_noise: 0.0,
        integrator_noise: 0.0,
        seed: Some(seed),
        ..NavigatorConfig::default()
    }
}

#[test]
fn test_initial_state() {
    let nav = Navigator::new(config(1)).unwrap();
    assert_eq!(nav.position(), (50.0, 50.0));
    assert_eq!(nav.nest(), (50.0, 50.0));
    assert_eq!(nav.mode(), BehaviorMode::Explore);
    assert_eq!(nav.elapsed(), 0.0);
    assert_eq!(nav.tick_count(), 0);
    assert_eq!(nav.target_memory(), None);
    assert!(nav.sites().is_empty());
    assert!(nav.memory().is_empty());
    assert!(nav.integrator_activity().is_silent());
    assert!(nav.memory_comparison().is_silent());
    assert_eq!(nav.heading_activity().len(), 8);
    assert_eq!(nav.integrator_activity().len(), 16);
    assert!(nav.coverage().is_some());
}

#[test]
fn test_custom_nest() {
    let nav = Navigator::new(NavigatorConfig {
        nest: Some([20.0, 70.0]),
        ..config(2)
    })
    .unwrap();
    assert_eq!(nav.position(), (20.0, 70.0));
    assert_eq!(nav.trajectory(), &[(20.0, 70.0)]);
}

#[test]
fn test_compass_tracks_heading() {
    let mut nav = Navigator::new(config(3)).unwrap();
    for _ in 0..50 {
        nav.step();
        let decoded = nav.compass().decoded_heading();
        let error = (decoded - nav.heading()).sin().abs();
        assert!(error < 1e-9, "compass {decoded} vs heading {}", nav.heading());
    }
}

#[test]
fn test_custom_explorer_drives_exploration() {
    let mut nav = Navigator::with_explorer(config(4), Box::new(Circler(0.1))).unwrap();
    assert!(nav.coverage().is_none());
    let start = nav.heading();
    nav.run(10);
    let turned = (nav.heading() - start).rem_euclid(std::f64::consts::TAU);
    assert!((turned - 1.0).abs() < 1e-9, "turned {turned}");
}

#[test]
fn test_explore_turns_are_clipped() {
    let mut nav = Navigator::with_explorer(config(5), Box::new(Circler(3.0))).unwrap();
    let start = nav.heading();
    nav.step();
    let turned = (nav.heading() - start).rem_euclid(std::f64::consts::TAU);
    assert!((turned - 0.5).abs() < 1e-9);
}

#[test]
fn test_home_vector_points_back_to_nest() {
    let mut nav = Navigator::new(config(6)).unwrap();
    nav.run(120);
    let (x, y) = nav.position();
    let (hx, hy) = nav.home_vector();
    assert!((x + hx - 50.0).abs() < 1e-6);
    assert!((y + hy - 50.0).abs() < 1e-6);
}

#[test]
fn test_coverage_counts_every_tick() {
    let mut nav = Navigator::new(config(7)).unwrap();
    nav.run(200);
    let coverage = nav.coverage().unwrap();
    // The starting position is counted too
    assert_eq!(coverage.total_visits(), 201);
}
