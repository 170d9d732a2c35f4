//! Entities
//!
//! The runner is the player: a platformer body for the head, dragging a
//! snake tail of the cells it has passed through. Enemies patrol the
//! platforms; items sit on cells waiting to be eaten.

use std::collections::VecDeque;

use super::geometry::{Cell, Direction, Rect};

/// The player-controlled entity.
///
/// `x` is always on the grid (the runner moves a whole cell per step);
/// `y` is free so gravity can act on it.
#[derive(Debug, Clone)]
pub struct Runner {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub on_ground: bool,
    pub direction: Direction,
    /// Previously occupied cells, most recent first
    trail: VecDeque<Cell>,
    /// Target trail length
    grow: usize,
    /// Last cell the head left; where new segments unfold from when the trail is empty
    vacated: Cell,
}

impl Runner {
    pub fn new(start: Cell, cell_size: f32) -> Self {
        let direction = Direction::Right;
        Self {
            x: start.col as f32 * cell_size,
            y: start.row as f32 * cell_size,
            velocity_y: 0.0,
            on_ground: false,
            direction,
            trail: VecDeque::new(),
            grow: 0,
            vacated: Cell::new(start.col - direction.dx(), start.row),
        }
    }

    /// Bounding box (one cell)
    pub fn rect(&self, cell_size: f32) -> Rect {
        Rect::new(self.x, self.y, cell_size, cell_size)
    }

    /// The cell the head is in
    pub fn head_cell(&self, cell_size: f32) -> Cell {
        Cell::from_pixels(self.x, self.y, cell_size)
    }

    pub fn trail(&self) -> &VecDeque<Cell> {
        &self.trail
    }

    pub fn grow(&self) -> usize {
        self.grow
    }

    /// Head plus trail
    pub fn length(&self) -> usize {
        1 + self.trail.len()
    }

    /// Change direction. Reversing is refused while there is a body behind
    /// the head. Returns whether the direction was applied.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() && !self.trail.is_empty() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Record the head's current cell before it moves on.
    pub fn push_head(&mut self, cell_size: f32) {
        let head = self.head_cell(cell_size);
        self.vacated = head;
        self.trail.push_front(head);
        self.trail.truncate(self.grow);
    }

    /// Lengthen the body by `amount` segments right now.
    ///
    /// New segments stack on the tail end and unfold as the runner moves.
    pub fn grow_by(&mut self, amount: usize) {
        let tail = self.trail.back().copied().unwrap_or(self.vacated);
        self.grow += amount;
        while self.trail.len() < self.grow {
            self.trail.push_back(tail);
        }
    }

    /// Whether the head sits on one of its own body cells
    pub fn bites_self(&self, cell_size: f32) -> bool {
        let head = self.head_cell(cell_size);
        self.trail.iter().any(|&c| c == head)
    }

    /// Whether any body segment occupies `cell`
    pub fn occupies(&self, cell: Cell, cell_size: f32) -> bool {
        self.head_cell(cell_size) == cell || self.trail.contains(&cell)
    }
}

/// A walking enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    /// Cells per tick
    pub speed: i32,
}

impl Enemy {
    pub fn new(cell: Cell, cell_size: f32, direction: Direction, speed: i32) -> Self {
        Self {
            x: cell.col as f32 * cell_size,
            y: cell.row as f32 * cell_size,
            direction,
            speed,
        }
    }

    pub fn rect(&self, cell_size: f32) -> Rect {
        Rect::new(self.x, self.y, cell_size, cell_size)
    }

    pub fn cell(&self, cell_size: f32) -> Cell {
        Cell::from_pixels(self.x, self.y, cell_size)
    }
}

/// Types of collectible items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Score and one more segment
    Coin,
    /// Score, several segments and a speed boost
    Mushroom,
}

/// A collectible on a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub cell: Cell,
    pub kind: ItemKind,
    pub active: bool,
}

impl Item {
    pub fn new(cell: Cell, kind: ItemKind) -> Self {
        Self { cell, kind, active: true }
    }
}
