use crate::TermInt;
use crate::render::Frame;
use crate::snake::Grid;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{ensure, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

// Each grid cell is drawn as two terminal columns so it looks square
const CELL_WIDTH: TermInt = 2;
const EMPTY_CELL: &str = "  ";

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    origin: (TermInt, TermInt),
    board: (TermInt, TermInt),
    last_frame: Option<Frame>,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        Ok(TermManager { width, height, stdout: stdout(), origin: (0, 0), board: (0, 0), last_frame: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking)
            .context("Error showing cursor")?;
        execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("Error reading terminal event")? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).context("Error polling terminal events")? {
            if let Event::Key(ev) = read().context("Error reading terminal event")? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Centres the board on screen and draws its border.
    pub fn prepare_board(&mut self, grid: Grid) -> Result<()> {
        // Border on every side plus the score line
        let (board_w, board_h) = board_size(grid);
        ensure!(
            board_w <= self.width && board_h < self.height,
            "Terminal is {}x{} but the board needs {}x{}",
            self.width, self.height, board_w, board_h + 1
        );

        self.origin = ((self.width - board_w) / 2, (self.height - board_h - 1) / 2);
        self.board = (board_w, board_h);
        self.last_frame = None;

        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.draw_borders(board_w, board_h)?;
        self.flush()
    }

    /// Writes only the cells that changed since the previous frame.
    pub fn paint(&mut self, frame: Frame) -> Result<()> {
        let (ox, oy) = self.origin;

        for ((x, y), paint) in frame.changes(self.last_frame.as_ref()) {
            let col = ox + 1 + x as TermInt * CELL_WIDTH;
            let row = oy + 1 + y as TermInt;
            queue!(
                self.stdout,
                cursor::MoveTo(col, row),
                style::SetBackgroundColor(paint.color()),
                style::Print(EMPTY_CELL)
            )?;
        }

        queue!(self.stdout, style::ResetColor)?;
        self.last_frame = Some(frame);
        self.flush()
    }

    pub fn print_score(&mut self, score: u64) -> Result<()> {
        let (ox, oy) = self.origin;
        let row = oy + self.board.1;
        queue!(self.stdout, cursor::MoveTo(ox, row), style::Print(format!("Score: {}", score)))?;
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        let blank = " ".repeat(msg_width as usize);
        queue!(self.stdout, style::ResetColor)?;
        queue!(self.stdout, cursor::MoveTo(top_left.0, top_left.1), style::Print(&blank))?;
        queue!(self.stdout, cursor::MoveTo(top_left.0, top_left.1 + msg_height - 1), style::Print(&blank))?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self, width: TermInt, height: TermInt) -> Result<()> {
        let (ox, oy) = self.origin;
        let end_x = ox + width - 1;
        let end_y = oy + height - 1;

        for x in ox..=end_x {
            let ch = if x == ox || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, oy), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in oy + 1..end_y {
            queue!(self.stdout, cursor::MoveTo(ox, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }

        Ok(())
    }
}

fn board_size(grid: Grid) -> (TermInt, TermInt) {
    (grid.columns().saturating_mul(CELL_WIDTH).saturating_add(2), grid.rows().saturating_add(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_size_includes_border() {
        assert_eq!(board_size(Grid::new(40, 30)), (82, 32));
        assert_eq!(board_size(Grid::new(1, 1)), (4, 3));
    }
}
