// Library exports for testing
pub use entities::Entity;
pub use game::{Game, TICK_INTERVAL};

pub mod app;
pub mod audio;
pub mod entities;
pub mod game;
pub mod input;
pub mod renderer;
