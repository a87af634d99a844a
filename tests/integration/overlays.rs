//! Matrix rain, exit redirect, external links and the résumé export.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyCode;
use tempfile::TempDir;

use folio::app;
use folio::config::Config;
use folio::store::MemoryStore;
use folio::tea::update::{EXIT_DELAY, MATRIX_DURATION, MATRIX_RETURN_LINE};
use folio::tea::Screen;
use folio::terminal::{Body, LineKind, ResumeState};

use crate::fixtures::{seeded, Harness, RecordingOpener};

// ═══════════════════════════════════════════════════════════════════════════
// Matrix
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_matrix_overlay_returns_to_session() {
    let mut h = Harness::booted();
    h.submit("matrix");
    assert_eq!(h.model.screen(), Screen::Matrix);
    assert_eq!(h.model.theme, "matrix");
    assert!(h.model.snapshot().is_animated());

    h.type_str("help");
    assert!(h.model.input.is_empty(), "keys are swallowed by the rain");

    h.advance(MATRIX_DURATION - Duration::from_millis(1));
    assert_eq!(h.model.screen(), Screen::Matrix);
    h.advance(Duration::from_millis(1));

    assert_eq!(h.model.screen(), Screen::Session);
    assert_eq!(h.last_line().to_plain(), MATRIX_RETURN_LINE);
    assert!(h.model.focused);
    assert_eq!(h.model.theme, "matrix");
    assert!(h.model.interpreter.portfolio().has_theme(&h.model.theme));
}

#[test]
fn test_content_without_matrix_theme_is_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("portfolio.toml");
    let source = include_str!("../../assets/portfolio.toml").replacen(
        "\"light\", \"matrix\"]",
        "\"light\"]",
        1,
    );
    std::fs::write(&path, source).unwrap();

    let config = Config {
        content: Some(path.display().to_string()),
        ..seeded()
    };
    let opener = Arc::new(RecordingOpener::default());
    let result = app::build_model(&config, &MemoryStore::new(), opener);
    assert!(matches!(result, Err(folio::Error::Validation(msg)) if msg.contains("matrix")));
}

// ═══════════════════════════════════════════════════════════════════════════
// Exit
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_exit_redirects_to_standard_view() {
    let mut h = Harness::booted();
    h.submit("logout");
    assert_eq!(h.model.screen(), Screen::Exiting);

    h.advance(EXIT_DELAY);
    assert_eq!(h.model.screen(), Screen::Standard);
    assert_eq!(h.scheduler.pending(), 0);
    assert!(!h.quit);

    h.key(KeyCode::Down);
    h.key(KeyCode::Down);
    assert_eq!(h.model.standard_scroll, 2);
    h.key(KeyCode::Home);
    assert_eq!(h.model.standard_scroll, 0);

    h.key(KeyCode::Char('q'));
    assert!(h.quit);
}

// ═══════════════════════════════════════════════════════════════════════════
// Links
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_open_github_uses_opener() {
    let mut h = Harness::booted();
    h.submit("open GitHub");
    assert_eq!(h.opener.urls(), vec!["https://github.com/example"]);
    assert_eq!(h.last_line().kind, LineKind::Output);

    h.submit("open myspace");
    assert_eq!(h.last_line().kind, LineKind::Error);
    assert_eq!(h.opener.urls().len(), 1);
}

#[test]
fn test_open_without_browser_still_prints_link() {
    let mut h = Harness::with_opener(seeded(), MemoryStore::new(), RecordingOpener::failing());
    h.run_until_idle();
    h.submit("open linkedin");

    let text = h.last_line().to_plain();
    assert_eq!(h.last_line().kind, LineKind::Output);
    assert!(text.contains("https://linkedin.com/in/example"));
    assert!(text.contains("Could not launch a browser"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Résumé
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_resume_export_fills_in_its_line() {
    let mut h = Harness::booted();
    h.submit("resume");

    let id = h.last_line().id.clone();
    assert_eq!(h.last_line().body, Body::Resume(ResumeState::Loading));

    let mut delivered = 0;
    for _ in 0..200 {
        delivered += h.drain_messages();
        if delivered > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(delivered, 1, "export should report back");

    let line = h.model.history.iter().find(|l| l.id == id).unwrap();
    match &line.body {
        Body::Resume(ResumeState::Ready(path)) => {
            assert!(path.starts_with(h.export_dir.path()));
            let text = std::fs::read_to_string(path).unwrap();
            assert!(text.contains("Developer"));
        }
        other => panic!("unexpected body: {other:?}"),
    }

    // A second request exports again into the same directory
    h.submit("resume");
    assert_eq!(h.last_line().body, Body::Resume(ResumeState::Loading));
}
