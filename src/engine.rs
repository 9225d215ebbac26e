use log::{debug, info};
use rand::Rng;

use crate::Coords;
use crate::snake::{Direction, Grid, Snake};

/// Why the player's game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Death {
    OutOfBounds,
    Bitten,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The step completed; the board should be redrawn.
    Running { escaped: usize, eaten: usize },
    GameOver(Death),
}

/// Owns every snake on the board along with the score.
pub struct Engine<R: Rng> {
    grid: Grid,
    player: Snake,
    adversaries: Vec<Snake>,
    score: u64,
    game_over: Option<Death>,
    turn_probability: f64,
    rng: R,
}

impl<R: Rng> Engine<R> {
    /// Places the player at the centre of `grid` with a random heading.
    /// `turn_probability` must be within `[0, 1]`.
    pub fn new(grid: Grid, turn_probability: f64, mut rng: R) -> Self {
        let player = Snake::spawn(grid.center(), &mut rng);
        Self::with_player(grid, player, turn_probability, rng)
    }

    pub fn with_player(grid: Grid, player: Snake, turn_probability: f64, rng: R) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&turn_probability),
            "turn probability {} is outside [0, 1]",
            turn_probability
        );

        Engine {
            grid,
            player,
            adversaries: vec![],
            score: 0,
            game_over: None,
            turn_probability,
            rng,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn player(&self) -> &Snake {
        &self.player
    }

    pub fn adversaries(&self) -> &[Snake] {
        &self.adversaries
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn game_over(&self) -> Option<Death> {
        self.game_over
    }

    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn request_player_heading(&mut self, direction: Direction) {
        if !self.is_over() {
            self.player.set_heading(direction);
        }
    }

    /// Drops a new adversary on a random cell. Returns where it landed,
    /// or `None` once the game is over.
    pub fn spawn_adversary(&mut self) -> Option<Coords> {
        if self.is_over() {
            return None;
        }

        let pos = self.grid.random_cell(&mut self.rng);
        let snake = Snake::spawn(pos, &mut self.rng);
        debug!("Adversary spawned at {:?} heading {:?}", pos, snake.heading());
        self.adversaries.push(snake);
        Some(pos)
    }

    /// Adds an already built adversary. Ignored once the game is over.
    pub fn add_adversary(&mut self, snake: Snake) {
        if !self.is_over() {
            self.adversaries.push(snake);
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if let Some(death) = self.game_over {
            return TickOutcome::GameOver(death);
        }

        self.player.advance();

        for snake in self.adversaries.iter_mut() {
            if self.rng.gen_bool(self.turn_probability) {
                snake.set_heading(Direction::random(&mut self.rng));
            }
            snake.advance();
        }

        if let Some(death) = self.check_death() {
            info!("Game over ({:?}) with score {}", death, self.score);
            self.game_over = Some(death);
            return TickOutcome::GameOver(death);
        }

        // Escapes are settled before bites, so an adversary that left the
        // board can never be scored.
        let grid = self.grid;
        let before = self.adversaries.len();
        self.adversaries.retain(|snake| grid.contains(snake.head()));
        let escaped = before - self.adversaries.len();

        let player = &self.player;
        let remaining = self.adversaries.len();
        self.adversaries.retain(|snake| !player.bites(snake));
        let eaten = remaining - self.adversaries.len();

        if escaped > 0 {
            debug!("{} adversaries escaped", escaped);
        }
        if eaten > 0 {
            self.score += eaten as u64;
            info!("Player bit {} adversaries, score is now {}", eaten, self.score);
        }

        TickOutcome::Running { escaped, eaten }
    }

    fn check_death(&self) -> Option<Death> {
        if !self.grid.contains(self.player.head()) {
            Some(Death::OutOfBounds)
        } else if self.adversaries.iter().any(|snake| snake.bites(&self.player)) {
            Some(Death::Bitten)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn engine_with(player: Snake) -> Engine<StdRng> {
        Engine::with_player(Grid::new(40, 30), player, 0.0, StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_new_engine() {
        let engine = Engine::new(Grid::new(40, 30), 0.1, StdRng::seed_from_u64(1));
        assert_eq!(engine.player().head(), (20, 15));
        assert!(engine.adversaries().is_empty());
        assert_eq!(engine.score(), 0);
        assert!(!engine.is_over());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside [0, 1]")]
    fn test_rejects_turn_probability_above_one() {
        Engine::with_player(Grid::new(40, 30), Snake::new((20, 15), Up), 1.5, StdRng::seed_from_u64(0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside [0, 1]")]
    fn test_rejects_nan_turn_probability() {
        Engine::with_player(Grid::new(40, 30), Snake::new((20, 15), Up), f64::NAN, StdRng::seed_from_u64(0));
    }

    #[test]
    fn test_tick_moves_player() {
        let mut engine = engine_with(Snake::new((20, 15), Up));
        let outcome = engine.tick();

        assert_eq!(outcome, TickOutcome::Running { escaped: 0, eaten: 0 });
        assert_eq!(engine.player().head(), (20, 14));
        assert_eq!(engine.player().trail()[0], (20, 15));
    }

    #[test]
    fn test_player_leaving_grid_ends_game() {
        let mut engine = engine_with(Snake::new((0, 3), Left));
        assert_eq!(engine.tick(), TickOutcome::GameOver(Death::OutOfBounds));
        assert_eq!(engine.game_over(), Some(Death::OutOfBounds));
    }

    #[test]
    fn test_heading_requests() {
        let mut engine = engine_with(Snake::new((20, 15), Right));
        engine.request_player_heading(Left);
        assert_eq!(engine.player().heading(), Right);

        engine.request_player_heading(Down);
        assert_eq!(engine.player().heading(), Down);
    }

    #[test]
    fn test_heading_request_ignored_after_game_over() {
        let mut engine = engine_with(Snake::new((39, 3), Right));
        engine.tick();
        assert!(engine.is_over());

        engine.request_player_heading(Up);
        assert_eq!(engine.player().heading(), Right);
    }

    #[test]
    fn test_spawn_adversary() {
        let mut engine = engine_with(Snake::new((20, 15), Right));
        for _ in 0..10 {
            let pos = engine.spawn_adversary().unwrap();
            assert!(engine.grid().contains(pos));
        }

        assert_eq!(engine.adversaries().len(), 10);
        for snake in engine.adversaries() {
            assert!(snake.trail().iter().all(|&cell| cell == snake.head()));
        }
    }

    #[test]
    fn test_spawn_disabled_after_game_over() {
        let mut engine = engine_with(Snake::new((0, 0), Up));
        engine.tick();

        assert_eq!(engine.spawn_adversary(), None);
        engine.add_adversary(Snake::new((5, 5), Up));
        assert!(engine.adversaries().is_empty());
    }

    #[test]
    fn test_adversary_bites_player() {
        let mut engine = engine_with(Snake::new((20, 15), Right));
        // Reaches (20, 15) after one step, where the player's trail starts
        engine.add_adversary(Snake::new((20, 16), Up));

        assert_eq!(engine.tick(), TickOutcome::GameOver(Death::Bitten));
    }

    #[test]
    fn test_player_bites_adversary() {
        let mut engine = engine_with(Snake::new((21, 15), Up));
        // Moves on to (22, 14), leaving its trail on (21, 14)
        engine.add_adversary(Snake::new((21, 14), Right));
        engine.add_adversary(Snake::new((5, 5), Down));

        assert_eq!(engine.tick(), TickOutcome::Running { escaped: 0, eaten: 1 });
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.adversaries().len(), 1);
        assert_eq!(engine.adversaries()[0].head(), (5, 6));

        engine.tick();
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn test_escaped_adversary_is_removed_without_score() {
        let mut engine = engine_with(Snake::new((20, 15), Right));
        engine.add_adversary(Snake::new((0, 5), Left));
        engine.add_adversary(Snake::new((10, 5), Left));

        assert_eq!(engine.tick(), TickOutcome::Running { escaped: 1, eaten: 0 });
        assert_eq!(engine.adversaries().len(), 1);
        assert_eq!(engine.adversaries()[0].head(), (9, 5));
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_turn_probability_one_always_turns_validly() {
        let mut engine = Engine::with_player(
            Grid::new(40, 30),
            Snake::new((20, 15), Right),
            1.0,
            StdRng::seed_from_u64(3),
        );
        engine.add_adversary(Snake::new((5, 5), Down));

        let mut previous = engine.adversaries()[0].heading();
        for _ in 0..5 {
            if let TickOutcome::GameOver(_) = engine.tick() {
                break;
            }
            match engine.adversaries().first() {
                Some(snake) => {
                    assert!(!snake.heading().is_opposite(previous));
                    previous = snake.heading();
                }
                None => break,
            }
        }
    }
}
