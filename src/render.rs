use crossterm::style::Color;
use rand::Rng;

use crate::Coords;
use crate::engine::Engine;
use crate::snake::{Grid, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    Empty,
    PlayerHead,
    PlayerTrail,
    AdversaryHead,
    AdversaryTrail,
}

impl Paint {
    pub fn color(self) -> Color {
        match self {
            Paint::Empty => Color::Black,
            Paint::PlayerHead => Color::Red,
            Paint::PlayerTrail => Color::Blue,
            Paint::AdversaryHead => Color::Rgb { r: 255, g: 165, b: 0 },
            Paint::AdversaryTrail => Color::Green,
        }
    }
}

/// One paint per grid cell, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    grid: Grid,
    cells: Vec<Paint>,
}

impl Frame {
    pub fn blank(grid: Grid) -> Self {
        let cells = vec![Paint::Empty; grid.columns() as usize * grid.rows() as usize];
        Frame { grid, cells }
    }

    /// Paints the player, then every adversary on top; each head before its trail.
    pub fn capture<R: Rng>(engine: &Engine<R>) -> Self {
        let mut frame = Frame::blank(engine.grid());

        frame.paint_snake(engine.player(), Paint::PlayerHead, Paint::PlayerTrail);
        for snake in engine.adversaries() {
            frame.paint_snake(snake, Paint::AdversaryHead, Paint::AdversaryTrail);
        }

        frame
    }

    pub fn get(&self, pos: Coords) -> Option<Paint> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Cells whose paint differs from `previous`, or every cell when the
    /// grids don't match.
    pub fn changes<'a>(&'a self, previous: Option<&'a Frame>) -> impl Iterator<Item = (Coords, Paint)> + 'a {
        let previous = previous.filter(|p| p.grid == self.grid);
        let columns = self.grid.columns() as usize;

        self.cells.iter().enumerate()
            .filter(move |(i, paint)| previous.map_or(true, |p| p.cells[*i] != **paint))
            .map(move |(i, paint)| (((i % columns) as i32, (i / columns) as i32), *paint))
    }

    fn paint_snake(&mut self, snake: &Snake, head: Paint, trail: Paint) {
        self.set(snake.head(), head);
        for &pos in snake.trail() {
            self.set(pos, trail);
        }
    }

    fn set(&mut self, pos: Coords, paint: Paint) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = paint;
        }
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if self.grid.contains(pos) {
            Some(pos.1 as usize * self.grid.columns() as usize + pos.0 as usize)
        } else {
            None
        }
    }
}
