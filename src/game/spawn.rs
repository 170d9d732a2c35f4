//! Spawn sampling
//!
//! Items and enemies respawn on a uniformly random free cell. The RNG is
//! passed in so seeded tests can pin down every placement.

use std::collections::HashSet;

use rand::Rng;

use super::geometry::Cell;

/// Rectangular block of cells that spawns may land in (max is exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnArea {
    pub min: Cell,
    pub max: Cell,
}

impl SpawnArea {
    pub fn new(min: Cell, max: Cell) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= self.min.col && cell.col < self.max.col && cell.row >= self.min.row && cell.row < self.max.row
    }

    /// Number of cells in the area
    pub fn len(&self) -> usize {
        let cols = (self.max.col - self.min.col).max(0) as usize;
        let rows = (self.max.row - self.min.row).max(0) as usize;
        cols * rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pick a uniformly random cell of `area` that is not in `occupied`.
///
/// Rejects and resamples until a free cell turns up. Returns `None` only
/// when the area has no free cell at all, so the loop always terminates.
pub fn sample_free_cell<R: Rng + ?Sized>(occupied: &HashSet<Cell>, area: SpawnArea, rng: &mut R) -> Option<Cell> {
    let taken = occupied.iter().filter(|c| area.contains(**c)).count();
    if taken >= area.len() {
        return None;
    }

    loop {
        let cell = Cell::new(
            rng.gen_range(area.min.col..area.max.col),
            rng.gen_range(area.min.row..area.max.row),
        );
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }
}
