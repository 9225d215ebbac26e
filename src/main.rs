use anyhow::Result;
use log::info;

use snake_killer::{config::Config, game::SnakeGame, logger};

fn main() -> Result<()> {
    let config = Config::load()?;
    logger::init(&config.logging)?;
    info!("Starting with {:?}", config);

    let mut game = SnakeGame::new(config)?;
    let result = game.initialize().and_then(|()| game.play());

    // The terminal is restored even if the game failed
    game.shutdown()?;
    info!("Shut down");
    result
}
