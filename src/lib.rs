pub mod core;
pub mod display;
pub mod env;
pub mod game;
pub mod player;
pub mod selfplay;
