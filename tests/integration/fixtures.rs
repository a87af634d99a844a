//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - A session harness with a virtual clock and in-memory boot flag
//! - An opener that records URLs instead of launching a browser
//! - Key and line input helpers

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;
use tokio::sync::mpsc;

use folio::app::{self, Effects};
use folio::config::Config;
use folio::opener::Opener;
use folio::scheduler::{Timer, VirtualScheduler};
use folio::store::MemoryStore;
use folio::tea::{self, Message, Model, Screen};
use folio::terminal::{LineKind, TerminalLine};

/// Hard stop for `run_until_idle` so a self-rescheduling chain fails the
/// test instead of hanging it.
const MAX_TIMERS: usize = 10_000;

/// Records every URL it is asked to open.
#[derive(Default)]
pub struct RecordingOpener {
    urls: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingOpener {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl Opener for RecordingOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        self.urls.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no browser"));
        }
        Ok(())
    }
}

/// One session wired to deterministic effects.
pub struct Harness {
    pub model: Model,
    pub scheduler: VirtualScheduler,
    pub store: MemoryStore,
    pub opener: Arc<RecordingOpener>,
    pub msg_tx: mpsc::UnboundedSender<Message>,
    pub msg_rx: mpsc::UnboundedReceiver<Message>,
    pub export_dir: TempDir,
    pub quit: bool,
}

impl Harness {
    /// A fresh session: nothing has run yet, the boot timer is pending.
    pub fn new(config: Config, store: MemoryStore) -> Self {
        Self::with_opener(config, store, RecordingOpener::default())
    }

    pub fn with_opener(config: Config, store: MemoryStore, opener: RecordingOpener) -> Self {
        let opener = Arc::new(opener);
        let model = app::build_model(&config, &store, opener.clone())
            .expect("Failed to build model");
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();

        let mut harness = Self {
            model,
            scheduler: VirtualScheduler::new(),
            store,
            opener,
            msg_tx,
            msg_rx,
            export_dir: TempDir::new().expect("Failed to create export dir"),
            quit: false,
        };
        for cmd in tea::start(&mut harness.model) {
            let mut fx = Effects {
                scheduler: &mut harness.scheduler,
                store: &mut harness.store,
                msg_tx: &harness.msg_tx,
                export_dir: harness.export_dir.path(),
            };
            harness.quit |= app::execute_command(&harness.model, cmd, &mut fx);
        }
        harness
    }

    /// A seeded session that has already finished its boot.
    pub fn booted() -> Self {
        let mut h = Self::new(seeded(), MemoryStore::new());
        h.run_until_idle();
        assert_eq!(h.model.screen(), Screen::Session, "boot should finish");
        h
    }

    /// Feed one message through update and execute its commands.
    pub fn dispatch(&mut self, msg: Message) {
        let mut fx = Effects {
            scheduler: &mut self.scheduler,
            store: &mut self.store,
            msg_tx: &self.msg_tx,
            export_dir: self.export_dir.path(),
        };
        self.quit |= app::dispatch(&mut self.model, msg, &mut fx);
    }

    pub fn fire(&mut self, timer: Timer) {
        self.dispatch(Message::Timer(timer));
    }

    /// Move the virtual clock forward, firing every timer that comes due.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.scheduler.now() + by;
        while let Some(timer) = self.scheduler.pop_until(deadline) {
            self.fire(timer);
        }
        self.scheduler.settle(deadline);
    }

    /// Fire timers until none are pending. Returns how many fired.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_next() {
            self.fire(timer);
            fired += 1;
            assert!(fired < MAX_TIMERS, "timer chain never settles");
        }
        fired
    }

    /// Fire timers until `done` holds or the queue runs dry.
    pub fn run_until(&mut self, done: impl Fn(&Model) -> bool) {
        let mut fired = 0;
        while !done(&self.model) {
            let Some(timer) = self.scheduler.pop_next() else {
                return;
            };
            self.fire(timer);
            fired += 1;
            assert!(fired < MAX_TIMERS, "condition never reached");
        }
    }

    /// Deliver background completions already sent on the channel.
    pub fn drain_messages(&mut self) -> usize {
        let mut n = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            n += 1;
        }
        n
    }

    pub fn key(&mut self, code: KeyCode) {
        self.key_with(code, KeyModifiers::empty());
    }

    pub fn key_with(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.dispatch(Message::Key(KeyEvent::new(code, modifiers)));
    }

    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.key(KeyCode::Char(c));
        }
    }

    /// Type a line and press Enter.
    pub fn submit(&mut self, text: &str) {
        self.type_str(text);
        self.key(KeyCode::Enter);
    }

    pub fn last_line(&self) -> &TerminalLine {
        self.model.history.last().expect("history is empty")
    }

    pub fn plain_history(&self) -> Vec<String> {
        self.model.history.iter().map(|l| l.to_plain()).collect()
    }

    pub fn lines_of(&self, kind: LineKind) -> usize {
        self.model.history.iter().filter(|l| l.kind == kind).count()
    }
}

/// Config with a fixed seed so fortunes and meltdown noise repeat.
pub fn seeded() -> Config {
    Config {
        seed: Some(7),
        ..Config::default()
    }
}
