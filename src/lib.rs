pub mod clock;
pub mod config;
pub mod engine;
pub mod game;
pub mod input;
pub mod logger;
pub mod render;
pub mod snake;
pub mod term;

pub type TermInt = u16;
pub type Coords = (i32, i32);
