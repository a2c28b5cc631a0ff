pub mod core {
	pub mod engine;
	pub mod game;
	pub mod renderer;
}

pub mod cli;
pub mod config;
pub mod games;
pub mod logging;

// Re-export for convenience
pub use crate::core::game::Game;
