//! Prompt behavior across a booted session.

use crossterm::event::{KeyCode, KeyModifiers};

use folio::tea::InputMode;
use folio::terminal::LineKind;

use crate::fixtures::Harness;

// ═══════════════════════════════════════════════════════════════════════════
// History
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_history_walks_back_and_forward() {
    let mut h = Harness::booted();
    h.submit("help");
    h.submit("about");

    let mut seen = Vec::new();
    for code in [KeyCode::Up, KeyCode::Up, KeyCode::Up, KeyCode::Down, KeyCode::Down] {
        h.key(code);
        seen.push(h.model.input.clone());
    }
    assert_eq!(seen, vec!["about", "help", "help", "about", ""]);
}

#[test]
fn test_empty_lines_stay_out_of_history() {
    let mut h = Harness::booted();
    h.submit("help");
    h.submit("");
    h.submit("   ");
    assert_eq!(h.model.commands.entries(), ["help"]);
    assert_eq!(h.lines_of(LineKind::Input), 3, "blank lines are still echoed");
}

#[test]
fn test_clear_then_recall() {
    let mut h = Harness::booted();
    h.submit("skills");
    h.submit("clear");
    assert!(h.model.history.is_empty());

    h.key(KeyCode::Up);
    assert_eq!(h.model.input, "clear");
    h.key(KeyCode::Up);
    assert_eq!(h.model.input, "skills");
}

// ═══════════════════════════════════════════════════════════════════════════
// Completion
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_tab_cycles_and_wraps() {
    let mut h = Harness::booted();
    h.type_str("pro");

    h.key(KeyCode::Tab);
    assert_eq!(h.model.input, "project");
    assert_eq!(h.model.completion.suggestions(), ["project", "projects"]);
    h.key(KeyCode::Tab);
    assert_eq!(h.model.input, "projects");
    h.key(KeyCode::Tab);
    assert_eq!(h.model.input, "project");

    h.key(KeyCode::Enter);
    assert!(!h.model.completion.is_active());
    assert_eq!(h.last_line().kind, LineKind::Error, "project needs an id");
}

#[test]
fn test_tab_without_match_changes_nothing() {
    let mut h = Harness::booted();
    h.type_str("zzz");
    h.key(KeyCode::Tab);
    assert_eq!(h.model.input, "zzz");
    assert!(!h.model.completion.is_active());
}

#[test]
fn test_completion_is_case_insensitive() {
    let mut h = Harness::booted();
    h.type_str("EX");
    h.key(KeyCode::Tab);
    assert_eq!(h.model.input, "exit");
    h.key(KeyCode::Tab);
    assert_eq!(h.model.input, "experience");
}

// ═══════════════════════════════════════════════════════════════════════════
// Commands through the prompt
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_commands_are_case_insensitive() {
    let mut h = Harness::booted();
    h.submit("ABOUT");
    assert_eq!(h.last_line().kind, LineKind::Output);
    assert!(h.last_line().to_plain().contains("Developer"));
}

#[test]
fn test_unknown_command_reports_name() {
    let mut h = Harness::booted();
    h.submit("Frobnicate now");
    let line = h.last_line();
    assert_eq!(line.kind, LineKind::Error);
    assert!(line.to_plain().contains("frobnicate"));
}

#[test]
fn test_project_lookup() {
    let mut h = Harness::booted();
    h.submit("project FERS");
    assert_eq!(h.last_line().kind, LineKind::Output);
    assert!(h.last_line().to_plain().contains("FERS"));

    h.submit("project nope");
    assert_eq!(h.last_line().kind, LineKind::Error);
}

#[test]
fn test_theme_switching() {
    let mut h = Harness::booted();
    h.submit("theme set solarized");
    assert_eq!(h.model.theme, "solarized");

    h.submit("theme set neon");
    assert_eq!(h.model.theme, "solarized");
    assert_eq!(h.last_line().kind, LineKind::Error);
}

#[test]
fn test_seeded_fortunes_repeat() {
    let mut a = Harness::booted();
    let mut b = Harness::booted();
    for _ in 0..3 {
        a.submit("fortune");
        b.submit("fortune");
        assert_eq!(a.last_line().to_plain(), b.last_line().to_plain());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Focus and scrolling
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_blurred_prompt_ignores_enter() {
    let mut h = Harness::booted();
    h.key(KeyCode::Esc);
    let before = h.model.history.len();
    h.key(KeyCode::Enter);
    assert_eq!(h.model.history.len(), before);
    assert_eq!(h.model.mode, InputMode::Standard);
}

#[test]
fn test_typing_refocuses_and_snaps_to_bottom() {
    let mut h = Harness::booted();
    for _ in 0..5 {
        h.submit("experience");
    }
    h.key(KeyCode::PageUp);
    assert!(!h.model.focused);
    assert!(h.model.scroll > 0);

    h.type_str("he");
    assert!(h.model.focused);
    assert_eq!(h.model.scroll, 0);
    assert_eq!(h.model.input, "he");
}

#[test]
fn test_ctrl_c_quits() {
    let mut h = Harness::booted();
    h.key_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(h.quit);
}
