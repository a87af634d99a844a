//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function - they come from the keyboard,
//! fired timers, or background task completion callbacks.

use crossterm::event::KeyEvent;

use crate::scheduler::Timer;
use crate::terminal::{LineId, ResumeState};

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    Resize(u16, u16),

    /// A scheduled timer elapsed.
    Timer(Timer),

    // Command completion callbacks
    /// Résumé export for the line `id` finished.
    ResumeLoaded(LineId, ResumeState),
}
