pub mod boot;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod log;
pub mod markup;
pub mod matrix;
pub mod meltdown;
pub mod opener;
pub mod portfolio;
pub mod registry;
pub mod resume;
pub mod scheduler;
pub mod store;
pub mod terminal;
pub mod theme;

// Decoupled game loop architecture
pub mod app;
pub mod render;
pub mod tea;
pub mod ui;

pub use error::{Error, Result};
