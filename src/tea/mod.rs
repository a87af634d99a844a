//! The Elm Architecture (TEA) implementation for the folio session.
//!
//! This module provides a clean separation of concerns:
//! - `Model`: Pure session state
//! - `Message`: Inputs to the update function
//! - `Command`: Outputs (side effects) from the update function
//! - `update`: Transforms state; timers and I/O happen via returned Commands

pub mod command;
pub mod message;
pub mod model;
pub mod update;

pub use command::Command;
pub use message::Message;
pub use model::{
    CommandHistory, Completion, InputMode, Model, ModelOptions, Overlay, Route, Screen,
};
pub use update::{start, update};
