//! Tests for the terminal arena raster and neural bar levels.

use cx_navigator::simulation::neural::PopulationActivity;
use cx_navigator::simulation::{Navigator, NavigatorConfig};
use cx_navigator::ui::field::{
    activity_levels, compute_arena_grid, strength_levels, world_to_grid_coords,
};
use cx_navigator::ui::render::hud_line;
use cx_navigator::ui::NeuralPanels;

fn navigator(seed: u64) -> Navigator {
    Navigator::new(NavigatorConfig {
        seed: Some(seed),
        ..NavigatorConfig::default()
    })
    .unwrap()
}

#[test]
fn test_grid_dimensions() {
    let mut nav = navigator(1);
    nav.run(200);
    let grid = compute_arena_grid(&nav, 24, 60);
    assert_eq!(grid.len(), 24);
    assert!(grid.iter().all(|row| row.chars().count() == 60));
}

#[test]
fn test_grid_uses_known_glyphs() {
    let mut nav = navigator(2);
    nav.run(400);
    let grid = compute_arena_grid(&nav, 30, 30);
    let allowed = [' ', '.', ':', '-', '=', '~', '*', 'N', '@'];
    for row in &grid {
        assert!(row.chars().all(|c| allowed.contains(&c)), "row: {row:?}");
    }
    assert_eq!(grid.iter().flat_map(|r| r.chars()).filter(|c| *c == '@').count(), 1);
}

#[test]
fn test_empty_viewport() {
    let nav = navigator(3);
    assert!(compute_arena_grid(&nav, 0, 40).is_empty());
    assert!(compute_arena_grid(&nav, 10, 0).is_empty());
}

#[test]
fn test_world_y_points_up() {
    // Top-left of the world is row 0
    assert_eq!(world_to_grid_coords(0.0, 100.0, 100.0, 100.0, 10, 10), (0, 0));
    assert_eq!(world_to_grid_coords(0.0, 0.0, 100.0, 100.0, 10, 10), (9, 0));
    assert_eq!(world_to_grid_coords(100.0, 0.0, 100.0, 100.0, 10, 10), (9, 9));
}

#[test]
fn test_activity_levels_center_zero() {
    let activity = PopulationActivity::from_vec(vec![-1.0, 0.0, 0.5, 1.0, 3.0]);
    assert_eq!(activity_levels(&activity, 1.0), vec![0, 50, 75, 100, 100]);

    // Auto scale uses the population peak
    assert_eq!(activity_levels(&activity, 0.0), vec![33, 50, 58, 67, 100]);
    assert_eq!(
        activity_levels(&PopulationActivity::zeros(3), 0.0),
        vec![50, 50, 50]
    );
}

#[test]
fn test_strength_levels() {
    assert_eq!(strength_levels(&[1.0, 1.1, 2.0], 2.0), vec![50, 55, 100]);
}

#[test]
fn test_panels_and_hud() {
    let mut nav = navigator(4);
    nav.run(10);
    let panels = NeuralPanels::from_navigator(&nav);
    assert_eq!(panels.heading.len(), 8);
    assert_eq!(panels.integrator.len(), 16);
    assert_eq!(panels.comparison.len(), 16);
    assert!(panels.strengths.is_empty());

    let hud = hud_line(&nav);
    assert!(hud.contains("Mode: explore"));
    assert!(hud.contains("Sites: 0"));
}
