use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::meltdown::Glitch;
use crate::portfolio::Portfolio;
use crate::tea::{InputMode, Screen};
use crate::terminal::TerminalLine;

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Strictly increasing, never 0 (0 is reserved for the default state).
pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed) + 1
}

/// Immutable frame input handed from the logic thread to the renderer.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub screen: Screen,
    pub history: Vec<TerminalLine>,
    pub input: String,
    pub mode: InputMode,
    /// Hidden while booting and during a meltdown.
    pub prompt_visible: bool,
    pub focused: bool,
    /// Active Tab-completion cycle (empty when none).
    pub suggestions: Vec<String>,
    pub suggestion_index: usize,
    pub theme: String,
    pub glitch: Glitch,
    pub frozen: bool,
    /// Ellipsis length on the recovery screen.
    pub recovery_dots: u8,
    /// Rows scrolled back from the bottom of the history.
    pub scroll: usize,
    pub standard_scroll: usize,
    /// Content for the standard (static) screen.
    pub portfolio: Option<Arc<Portfolio>>,
}

impl RenderState {
    /// Screens that animate regardless of state changes.
    pub fn is_animated(&self) -> bool {
        self.screen == Screen::Matrix || self.glitch != Glitch::None
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            screen: Screen::Boot,
            history: Vec::new(),
            input: String::new(),
            mode: InputMode::Standard,
            prompt_visible: false,
            focused: false,
            suggestions: Vec::new(),
            suggestion_index: 0,
            theme: "default".to_string(),
            glitch: Glitch::None,
            frozen: false,
            recovery_dots: 0,
            scroll: 0,
            standard_scroll: 0,
            portfolio: None,
        }
    }
}
