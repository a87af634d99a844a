//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - they represent side effects
//! to be executed by the runtime.

use std::time::Duration;

use crate::scheduler::{Timer, TimerGroup};
use crate::terminal::LineId;

/// Output commands from the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Timer chains
    Schedule { timer: Timer, after: Duration },
    Cancel(TimerGroup),
    CancelAll,

    /// Remember that this shell session has seen a full boot.
    MarkBooted,

    /// Export the résumé and report back for line `id`.
    LoadResume { id: LineId },

    // App lifecycle
    Quit,
}

impl Command {
    pub fn schedule(timer: Timer, after: Duration) -> Self {
        Command::Schedule { timer, after }
    }
}
