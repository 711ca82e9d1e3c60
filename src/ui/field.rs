use crate::simulation::neural::PopulationActivity;
use crate::simulation::Navigator;
use rayon::prelude::*;

/// Coverage shading from unvisited to most visited.
const SHADES: [char; 5] = [' ', '.', ':', '-', '='];
const TRAIL: char = '~';
const SITE: char = '*';
const NEST: char = 'N';
const AGENT: char = '@';

/// Maps world coordinates to `(row, col)`, with world y pointing up.
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn world_to_grid_coords(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rows: usize,
    cols: usize,
) -> (usize, usize) {
    let col = ((x / width) * cols as f64)
        .floor()
        .clamp(0.0, cols.saturating_sub(1) as f64) as usize;
    let row = ((1.0 - y / height) * rows as f64)
        .floor()
        .clamp(0.0, rows.saturating_sub(1) as f64) as usize;
    (row, col)
}

/// Rasterizes the arena: coverage shading, trail, sites, nest and agent.
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn compute_arena_grid(nav: &Navigator, rows: usize, cols: usize) -> Vec<String> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let size = nav.config().arena_size;
    let scale_y = size / rows as f64;
    let scale_x = size / cols as f64;
    let coverage = nav.coverage();
    let peak = coverage.map_or(0, |map| map.max_visits()).max(1);

    // Background rows in parallel
    let mut grid: Vec<Vec<char>> = (0..rows)
        .into_par_iter()
        .map(|r| {
            let world_y = size - (r as f64 + 0.5) * scale_y;
            (0..cols)
                .map(|c| {
                    let world_x = (c as f64 + 0.5) * scale_x;
                    let visits = coverage
                        .and_then(|map| map.visits(world_x, world_y))
                        .unwrap_or(0);
                    if visits == 0 {
                        return SHADES[0];
                    }
                    let level = (f64::from(visits) / f64::from(peak) * (SHADES.len() - 1) as f64)
                        .ceil() as usize;
                    SHADES[level.clamp(1, SHADES.len() - 1)]
                })
                .collect()
        })
        .collect();

    let mut plot = |x: f64, y: f64, mark: char| {
        let (r, c) = world_to_grid_coords(x, y, size, size, rows, cols);
        grid[r][c] = mark;
    };

    for &(x, y) in nav.trajectory() {
        plot(x, y, TRAIL);
    }
    for site in nav.sites() {
        plot(site.x, site.y, SITE);
    }
    let (nest_x, nest_y) = nav.nest();
    plot(nest_x, nest_y, NEST);
    let (x, y) = nav.position();
    plot(x, y, AGENT);

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// Maps a population to bar heights in 0..=100, with zero at 50.
///
/// `scale` is the magnitude drawn at full height; non-positive scales use the
/// population's own peak magnitude.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn activity_levels(activity: &PopulationActivity, scale: f64) -> Vec<u64> {
    let scale = if scale > 0.0 {
        scale
    } else {
        activity
            .as_slice()
            .iter()
            .fold(0.0_f64, |m, a| m.max(a.abs()))
            .max(f64::EPSILON)
    };
    activity
        .as_slice()
        .iter()
        .map(|a| ((a / scale + 1.0) * 50.0).round().clamp(0.0, 100.0) as u64)
        .collect()
}

/// Maps memory strengths to bar heights in 0..=100.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn strength_levels(strengths: &[f64], max_strength: f64) -> Vec<u64> {
    let max_strength = max_strength.max(f64::EPSILON);
    strengths
        .iter()
        .map(|s| (s / max_strength * 100.0).round().clamp(0.0, 100.0) as u64)
        .collect()
}
