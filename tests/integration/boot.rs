//! Boot sequence tests.
//!
//! A cold shell plays the whole journal and records the boot flag; a
//! shell that has booted before gets the three-line resume sequence.

use std::time::Duration;

use crossterm::event::KeyCode;

use folio::boot::{self, READY_LINE};
use folio::config::Config;
use folio::store::{self, MemoryStore};
use folio::tea::Screen;
use folio::terminal::LineKind;

use crate::fixtures::{seeded, Harness};

#[test]
fn test_cold_start_plays_full_journal() {
    let mut h = Harness::new(seeded(), MemoryStore::new());
    assert_eq!(h.model.screen(), Screen::Boot);
    assert!(!h.model.prompt_visible());

    h.run_until_idle();

    let journal = boot::full_log().unwrap();
    let history = h.plain_history();
    assert_eq!(history.len(), journal.len() + 1);
    assert!(history[0].starts_with("[    0.000000] "));
    assert!(history[0].ends_with(&journal[0].text));
    assert_eq!(history.last().unwrap(), READY_LINE);

    assert_eq!(h.model.screen(), Screen::Session);
    assert!(h.model.prompt_visible());
    assert!(h.model.focused);
    assert!(store::has_booted(&h.store), "full boot records the flag");
}

#[test]
fn test_boot_timestamps_never_go_backwards() {
    let mut h = Harness::new(seeded(), MemoryStore::new());
    h.run_until_idle();

    let stamps: Vec<f64> = h
        .model
        .history
        .iter()
        .filter(|l| l.id.as_str().starts_with("boot-"))
        .map(|l| {
            let text = l.to_plain();
            let end = text.find(']').unwrap();
            text[1..end].trim().parse().unwrap()
        })
        .collect();
    assert!(!stamps.is_empty());
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_keys_are_swallowed_until_ready() {
    let mut h = Harness::new(seeded(), MemoryStore::new());
    h.advance(Duration::from_millis(10));
    h.type_str("help");
    h.key(KeyCode::Enter);
    assert!(h.model.input.is_empty());
    assert_eq!(h.lines_of(LineKind::Input), 0);

    h.run_until_idle();
    h.submit("help");
    assert_eq!(h.lines_of(LineKind::Input), 1);
}

#[test]
fn test_second_session_gets_fast_boot() {
    let mut first = Harness::new(seeded(), MemoryStore::new());
    first.run_until_idle();

    let mut second = Harness::new(seeded(), first.store.clone());
    second.run_until_idle();

    let history = second.plain_history();
    assert_eq!(history.len(), boot::fast_log().len() + 1);
    assert!(history[0].ends_with("[INFO] Resuming session..."));
    assert!(history[2].ends_with("[INFO] Welcome back to PortfolioOS."));
    assert_eq!(history[3], READY_LINE);
}

#[test]
fn test_always_full_boot_ignores_flag() {
    let mut store = MemoryStore::new();
    store::mark_booted(&mut store).unwrap();

    let config = Config {
        always_full_boot: true,
        ..seeded()
    };
    let mut h = Harness::new(config, store);
    h.run_until_idle();
    assert!(h.model.history.len() > boot::fast_log().len() + 1);
}

#[test]
fn test_fast_boot_takes_its_delays() {
    let mut store = MemoryStore::new();
    store::mark_booted(&mut store).unwrap();
    let mut h = Harness::new(seeded(), store);

    // 50 + 100 + 200ms of waits before the ready line
    h.advance(Duration::from_millis(340));
    assert_eq!(h.model.screen(), Screen::Boot);
    h.advance(Duration::from_millis(20));
    assert_eq!(h.model.screen(), Screen::Session);
}
