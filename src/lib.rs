//! Grid Snake: a deterministic simulation core plus the host pieces
//! (clock, input routing, score store, terminal renderer) that drive it.

pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
