use std::{thread::sleep, time::{Duration, Instant}};

use crate::clock::Clock;
use crate::config::Config;
use crate::engine::{Death, Engine, TickOutcome::*};
use crate::input::{map_key, KeyAction};
use crate::render::Frame;
use crate::term::TermManager;

use anyhow::Result;
use log::info;

pub struct SnakeGame {
    config: Config,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: Config) -> Result<Self> {
        Ok(SnakeGame { config, term: TermManager::new()? })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()
    }

    /// Runs one game until the player dies or quits.
    pub fn play(&mut self) -> Result<()> {
        let grid = self.config.board.grid();
        self.term.prepare_board(grid)?;

        let mut engine = Engine::new(grid, self.config.adversaries.turn_probability, rand::thread_rng());
        let mut clock = Clock::new(&self.config.timing);
        let poll_interval = Duration::from_millis(self.config.timing.poll_interval_ms);

        self.term.paint(Frame::capture(&engine))?;
        self.term.print_score(engine.score())?;

        let mut last_poll = Instant::now();

        loop {
            sleep(poll_interval);

            for key_ev in self.term.read_key_events_queue()? {
                match map_key(&key_ev) {
                    KeyAction::Turn(dir) => engine.request_player_heading(dir),
                    KeyAction::Quit => {
                        info!("Quit with score {}", engine.score());
                        return Ok(());
                    },
                    KeyAction::None => {}
                }
            }

            let now = Instant::now();
            let due = clock.advance(now.duration_since(last_poll));
            last_poll = now;

            if due.tick {
                match engine.tick() {
                    Running { eaten, escaped: _ } => {
                        self.term.paint(Frame::capture(&engine))?;
                        if eaten > 0 {
                            self.term.print_score(engine.score())?;
                        }
                    },
                    GameOver(death) => {
                        self.game_over(death, engine.score())?;
                        break;
                    },
                }
            }

            if due.spawn {
                engine.spawn_adversary();
            }
        } // Game loop

        self.term.read_key_blocking()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, death: Death, score: u64) -> Result<()> {
        let cause = match death {
            Death::OutOfBounds => "You left the board",
            Death::Bitten => "You were bitten",
        };

        self.term.show_message(&[
            "Game over!",
            cause,
            &*format!("Score: {}", score),
            "",
            "Press any key to quit."
        ])
    }
}
