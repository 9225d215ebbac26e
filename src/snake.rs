use crate::{Coords, TermInt};
use Direction::*;

use rand::Rng;

pub const TRAIL_LENGTH: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down
}

impl Direction {
    pub const ALL: [Direction; 4] = [Left, Up, Right, Down];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Left => (-1, 0),
            Up => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
        }
    }
}

/// Board dimensions. Valid cells are `[0, columns) x [0, rows)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: TermInt,
    rows: TermInt,
}

impl Grid {
    pub fn new(columns: TermInt, rows: TermInt) -> Self {
        Grid { columns, rows }
    }

    pub fn columns(&self) -> TermInt {
        self.columns
    }

    pub fn rows(&self) -> TermInt {
        self.rows
    }

    pub fn contains(&self, (x, y): Coords) -> bool {
        x >= 0 && y >= 0 && x < self.columns as i32 && y < self.rows as i32
    }

    pub fn center(&self) -> Coords {
        (self.columns as i32 / 2, self.rows as i32 / 2)
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coords {
        (rng.gen_range(0..self.columns as i32), rng.gen_range(0..self.rows as i32))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    head: Coords,
    // Most recently vacated cell first
    trail: [Coords; TRAIL_LENGTH],
    heading: Direction,
}

impl Snake {
    pub fn new(pos: Coords, heading: Direction) -> Self {
        Snake { head: pos, trail: [pos; TRAIL_LENGTH], heading }
    }

    pub fn spawn<R: Rng + ?Sized>(pos: Coords, rng: &mut R) -> Self {
        Self::new(pos, Direction::random(rng))
    }

    pub fn head(&self) -> Coords {
        self.head
    }

    pub fn trail(&self) -> &[Coords] {
        &self.trail
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Turns the snake, unless asked to reverse on the spot.
    pub fn set_heading(&mut self, requested: Direction) {
        if !self.heading.is_opposite(requested) {
            self.heading = requested;
        }
    }

    pub fn advance(&mut self) {
        self.trail.rotate_right(1);
        self.trail[0] = self.head;

        let (dx, dy) = self.heading.delta();
        self.head = (self.head.0 + dx, self.head.1 + dy);
    }

    /// Whether this snake's head sits on one of `other`'s trail cells.
    pub fn bites(&self, other: &Snake) -> bool {
        other.trail.contains(&self.head)
    }
}
