//! Coverage map of where the agent has been.
//!
//! A discretized grid of visit counts over the arena. It carries no neural
//! meaning; the coverage-bias explorer reads it to prefer fresh ground.

/// Visit counts over a square arena, one cell per `resolution` units.
#[derive(Clone, Debug)]
pub struct CoverageMap {
    /// Row-major counts, `rows * cols` long
    cells: Vec<u32>,
    cols: usize,
    rows: usize,
    resolution: f64,
}

impl CoverageMap {
    /// Creates an empty map covering `[0, arena_size]²`.
    ///
    /// The grid has `floor(arena_size / resolution)` cells per side; positions
    /// on the far edge fall outside it and are not counted.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation, // Arena sizes are small
        clippy::cast_sign_loss  // Both operands are validated positive
    )]
    pub fn new(arena_size: f64, resolution: f64) -> Self {
        let side = (arena_size / resolution).floor().max(1.0) as usize;
        Self {
            cells: vec![0; side * side],
            cols: side,
            rows: side,
            resolution,
        }
    }

    /// Converts world coordinates to `(col, row)`, or `None` off the grid.
    #[allow(
        clippy::cast_possible_truncation, // Checked against grid bounds
        clippy::cast_sign_loss  // Negative values rejected first
    )]
    #[must_use]
    pub fn cell_index(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.resolution).floor() as usize;
        let row = (y / self.resolution).floor() as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    /// Counts one visit at the given world position.
    pub fn record_visit(&mut self, x: f64, y: f64) {
        if let Some((col, row)) = self.cell_index(x, y) {
            let cell = &mut self.cells[row * self.cols + col];
            *cell = cell.saturating_add(1);
        }
    }

    /// Visit count at a world position, `None` off the grid.
    #[must_use]
    pub fn visits(&self, x: f64, y: f64) -> Option<u32> {
        self.cell_index(x, y)
            .map(|(col, row)| self.cells[row * self.cols + col])
    }

    /// Returns grid dimensions as `(cols, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[must_use]
    pub fn max_visits(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn total_visits(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(*c)).sum()
    }

    /// Number of cells visited at least once.
    #[must_use]
    pub fn covered_cells(&self) -> usize {
        self.cells.iter().filter(|c| **c > 0).count()
    }

    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = 0);
    }
}
