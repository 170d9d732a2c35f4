//! Grid and rectangle primitives
//!
//! The world is a fixed grid of square cells. Static things (platforms,
//! spikes, items) live on cell boundaries; the runner's vertical position
//! is a free float so gravity can act on it, which is why collision is
//! done with pixel rectangles rather than cell equality.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding-box overlap on raw scalars.
///
/// Strict: rectangles that only share an edge do not overlap.
#[allow(clippy::too_many_arguments)]
pub fn aabb_overlap(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
}

/// A rectangle defined by position and size, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// The square covering a grid cell
    pub fn from_cell(cell: Cell, cell_size: f32) -> Self {
        Self::new(cell.col as f32 * cell_size, cell.row as f32 * cell_size, cell_size, cell_size)
    }

    /// A horizontal run of `cols` cells starting at `cell`
    pub fn from_cells(cell: Cell, cols: i32, rows: i32, cell_size: f32) -> Self {
        Self::new(
            cell.col as f32 * cell_size,
            cell.row as f32 * cell_size,
            cols as f32 * cell_size,
            rows as f32 * cell_size,
        )
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Check if point is inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Strict AABB overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        aabb_overlap(self.x, self.y, self.w, self.h, other.x, other.y, other.w, other.h)
    }

    /// Same size, moved by (dx, dy)
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Every grid cell this rectangle touches (edges excluded)
    pub fn cells(&self, cell_size: f32) -> impl Iterator<Item = Cell> {
        let c0 = (self.x / cell_size).floor() as i32;
        let r0 = (self.y / cell_size).floor() as i32;
        let c1 = (self.right() / cell_size).ceil() as i32;
        let r1 = (self.bottom() / cell_size).ceil() as i32;
        (r0..r1).flat_map(move |row| (c0..c1).map(move |col| Cell::new(col, row)))
    }
}

/// A position on the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Nearest cell to a pixel position (top-left corner of an entity)
    pub fn from_pixels(x: f32, y: f32, cell_size: f32) -> Self {
        Self::new((x / cell_size).round() as i32, (y / cell_size).round() as i32)
    }
}

/// Horizontal travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Unit step along x
    pub fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Grid dimensions of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    pub cell_size: i32,
}

impl Grid {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        Self {
            cols: (width / cell_size) as i32,
            rows: (height / cell_size) as i32,
            cell_size: cell_size as i32,
        }
    }

    pub fn cell(&self) -> f32 {
        self.cell_size as f32
    }

    /// World width in pixels
    pub fn width(&self) -> f32 {
        (self.cols * self.cell_size) as f32
    }

    /// World height in pixels
    pub fn height(&self) -> f32 {
        (self.rows * self.cell_size) as f32
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0 && cell.col < self.cols && cell.row >= 0 && cell.row < self.rows
    }

    /// Wrap a pixel x coordinate into `[0, width)`
    pub fn wrap_x(&self, x: f32) -> f32 {
        x.rem_euclid(self.width())
    }
}
