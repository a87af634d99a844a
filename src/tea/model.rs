//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is the whole session state - no channels, no handles, no
//! runtime infrastructure. Randomness is owned here so a seeded model
//! replays identically.

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::boot::{BootKind, BootLine, BootSequencer};
use crate::interpreter::Interpreter;
use crate::meltdown::{Meltdown, Phase};
use crate::render::{next_version, RenderState};
use crate::terminal::{Body, LineId, LineKind, TerminalLine};

/// How the next Enter is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Standard,
    /// Waiting for y/N after a destructive command.
    Confirmation,
}

impl InputMode {
    pub fn prompt(&self) -> &'static str {
        match self {
            InputMode::Standard => ">",
            InputMode::Confirmation => "?",
        }
    }
}

/// Full-screen takeovers that sit on top of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Matrix,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Terminal,
    /// The static, non-interactive portfolio.
    Standard,
}

/// Which view drives the screen. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Boot,
    Session,
    Crashed,
    Recovering,
    Matrix,
    Exiting,
    Standard,
}

impl Screen {
    /// Screens that swallow every key except Ctrl+C.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Screen::Session | Screen::Standard)
    }
}

/// Submitted commands with a navigation cursor in `[0, len]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl CommandHistory {
    pub fn push(&mut self, command: String) {
        self.entries.push(command);
        self.cursor = self.entries.len();
    }

    /// Step back (ArrowUp). `None` when there is no history at all.
    pub fn older(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step forward (ArrowDown); past the end yields an empty buffer.
    pub fn newer(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1).min(self.entries.len());
        Some(self.entries.get(self.cursor).map_or("", String::as_str))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Tab-completion cycle. Empty suggestions means no cycle in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    suggestions: Vec<String>,
    index: usize,
}

impl Completion {
    pub fn reset(&mut self) {
        self.suggestions.clear();
        self.index = 0;
    }

    pub fn is_active(&self) -> bool {
        !self.suggestions.is_empty()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// First press computes matches for `input`; later presses cycle.
    pub fn advance(&mut self, input: &str, candidates: impl FnOnce(&str) -> Vec<String>) -> Option<&str> {
        if self.suggestions.is_empty() {
            let matches = candidates(input);
            if matches.is_empty() {
                return None;
            }
            self.suggestions = matches;
            self.index = 0;
        } else {
            self.index = (self.index + 1) % self.suggestions.len();
        }
        self.suggestions.get(self.index).map(String::as_str)
    }
}

/// Startup choices that come from config, CLI and the session store.
#[derive(Debug, Clone)]
pub struct ModelOptions {
    pub theme: String,
    pub seed: Option<u64>,
    /// Show the short resume sequence instead of the full journal.
    pub fast_boot: bool,
    pub boot_log: Vec<BootLine>,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            seed: None,
            fast_boot: false,
            boot_log: Vec::new(),
        }
    }
}

/// Pure session state - the single source of truth.
pub struct Model {
    // Scrollback and prompt
    pub history: Vec<TerminalLine>,
    pub input: String,
    pub mode: InputMode,
    pub commands: CommandHistory,
    pub completion: Completion,

    // Sub-flows
    /// `Some` while the boot journal is playing.
    pub boot: Option<BootSequencer>,
    pub meltdown: Meltdown,
    pub overlay: Overlay,
    pub route: Route,

    // Presentation
    pub theme: String,
    /// Whether keys go to the prompt (false after Esc or scrolling).
    pub focused: bool,
    /// Rows scrolled back from the bottom of the session history.
    pub scroll: usize,
    pub standard_scroll: usize,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    pub interpreter: Interpreter,
    pub rng: StdRng,
    line_counter: u64,
}

impl Model {
    pub fn new(interpreter: Interpreter, options: ModelOptions) -> Self {
        let boot = if options.fast_boot {
            BootSequencer::fast()
        } else {
            BootSequencer::new(BootKind::Full, options.boot_log)
        };
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            history: Vec::new(),
            input: String::new(),
            mode: InputMode::default(),
            commands: CommandHistory::default(),
            completion: Completion::default(),
            boot: Some(boot),
            meltdown: Meltdown::new(),
            overlay: Overlay::None,
            route: Route::Terminal,
            theme: options.theme,
            focused: false,
            scroll: 0,
            standard_scroll: 0,
            dirty: true,
            interpreter,
            rng,
            line_counter: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.route == Route::Standard {
            return Screen::Standard;
        }
        match self.overlay {
            Overlay::Matrix => return Screen::Matrix,
            Overlay::Exiting => return Screen::Exiting,
            Overlay::None => {}
        }
        match self.meltdown.phase() {
            Phase::Crashed => return Screen::Crashed,
            Phase::Recovering { .. } => return Screen::Recovering,
            _ => {}
        }
        if self.boot.is_some() {
            Screen::Boot
        } else {
            Screen::Session
        }
    }

    /// The prompt is shown and accepts edits.
    pub fn prompt_visible(&self) -> bool {
        self.screen() == Screen::Session && !self.meltdown.is_active()
    }

    pub fn is_booting(&self) -> bool {
        self.boot.is_some()
    }

    pub fn sabotage_proof(&self) -> bool {
        self.meltdown.sabotage_proof()
    }

    pub fn push_line(&mut self, prefix: &str, kind: LineKind, body: impl Into<Body>) -> LineId {
        self.line_counter += 1;
        let id = LineId::new(prefix, self.line_counter);
        self.history.push(TerminalLine {
            id: id.clone(),
            kind,
            body: body.into(),
            timestamp: Some(Local::now()),
        });
        self.dirty = true;
        id
    }

    /// Rendered row count of the history before wrapping.
    pub fn scrollback_rows(&self) -> usize {
        self.history
            .iter()
            .map(|line| match &line.body {
                Body::Markup(m) => m.lines.len().max(1),
                Body::Resume(_) => 1,
            })
            .sum()
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Each snapshot gets a monotonically increasing version number,
    /// enabling the render thread to skip redundant renders.
    pub fn snapshot(&self) -> RenderState {
        let recovery_dots = match self.meltdown.phase() {
            Phase::Recovering { dots } => dots,
            _ => 0,
        };

        RenderState {
            version: next_version(),
            screen: self.screen(),
            history: self.history.clone(),
            input: self.input.clone(),
            mode: self.mode,
            prompt_visible: self.prompt_visible(),
            focused: self.focused,
            suggestions: self.completion.suggestions().to_vec(),
            suggestion_index: self.completion.index(),
            theme: self.theme.clone(),
            glitch: self.meltdown.glitch(),
            frozen: self.meltdown.frozen(),
            recovery_dots,
            scroll: self.scroll,
            standard_scroll: self.standard_scroll,
            portfolio: Some(self.interpreter.portfolio().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ═══════════════════════════════════════════════════════════════════════
    // CommandHistory Tests
    // ═══════════════════════════════════════════════════════════════════════

    fn history(entries: &[&str]) -> CommandHistory {
        let mut h = CommandHistory::default();
        for e in entries {
            h.push(e.to_string());
        }
        h
    }

    #[test]
    fn test_history_up_up_down_down() {
        let mut h = history(&["help", "about"]);
        assert_eq!(h.older(), Some("about"));
        assert_eq!(h.older(), Some("help"));
        assert_eq!(h.newer(), Some("about"));
        assert_eq!(h.newer(), Some(""));
        assert_eq!(h.cursor(), 2);
    }

    #[test]
    fn test_history_clamps_at_both_ends() {
        let mut h = history(&["one"]);
        assert_eq!(h.older(), Some("one"));
        assert_eq!(h.older(), Some("one"));
        assert_eq!(h.cursor(), 0);
        assert_eq!(h.newer(), Some(""));
        assert_eq!(h.newer(), Some(""));
        assert_eq!(h.cursor(), 1);
    }

    #[test]
    fn test_empty_history_navigation_is_none() {
        let mut h = CommandHistory::default();
        assert_eq!(h.older(), None);
        assert_eq!(h.newer(), None);
    }

    #[test]
    fn test_push_resets_cursor_past_end() {
        let mut h = history(&["a", "b"]);
        h.older();
        h.older();
        h.push("c".to_string());
        assert_eq!(h.cursor(), 3);
        h.clear();
        assert!(h.entries().is_empty());
        assert_eq!(h.cursor(), 0);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Completion Tests
    // ═══════════════════════════════════════════════════════════════════════

    fn pro(_: &str) -> Vec<String> {
        vec!["project".to_string(), "projects".to_string()]
    }

    #[test]
    fn test_completion_cycles_and_wraps() {
        let mut c = Completion::default();
        assert_eq!(c.advance("pro", pro), Some("project"));
        assert_eq!(c.advance("project", pro), Some("projects"));
        assert_eq!(c.advance("projects", pro), Some("project"));
        assert!(c.is_active());
    }

    #[test]
    fn test_completion_no_matches_stays_inactive() {
        let mut c = Completion::default();
        assert_eq!(c.advance("zzz", |_| Vec::new()), None);
        assert!(!c.is_active());
    }

    #[test]
    fn test_completion_reset_recomputes() {
        let mut c = Completion::default();
        c.advance("pro", pro);
        c.advance("project", pro);
        c.reset();
        assert_eq!(c.advance("he", |_| vec!["help".to_string()]), Some("help"));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_input_mode_prompt() {
        assert_eq!(InputMode::Standard.prompt(), ">");
        assert_eq!(InputMode::Confirmation.prompt(), "?");
        assert_eq!(InputMode::default(), InputMode::Standard);
    }

    #[test]
    fn test_interactive_screens() {
        assert!(Screen::Session.is_interactive());
        assert!(Screen::Standard.is_interactive());
        for screen in [
            Screen::Boot,
            Screen::Crashed,
            Screen::Recovering,
            Screen::Matrix,
            Screen::Exiting,
        ] {
            assert!(!screen.is_interactive());
        }
    }
}
