//! Meltdown end-to-end: confirmation, glitching, crash, recovery and the
//! sabotage-proof session that follows.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers};

use folio::meltdown::{
    Glitch, Phase, CANCEL_LINE, CRASH_HOLD, CRASH_STEP, RECOVERED_LINE, RECOVERY_TOTAL,
    SETTLE_DELAY, WIPE_LINE,
};
use folio::scheduler::TimerGroup;
use folio::tea::{InputMode, Screen};
use folio::terminal::LineKind;

use crate::fixtures::Harness;

fn confirm_wipe(h: &mut Harness) {
    h.submit("rm -rf /");
    assert_eq!(h.model.mode, InputMode::Confirmation);
    h.submit("y");
}

#[test]
fn test_declined_confirmation_cancels() {
    let mut h = Harness::booted();
    h.submit("format c:");
    assert_eq!(h.last_line().kind, LineKind::Error);
    assert_eq!(h.model.mode, InputMode::Confirmation);

    h.submit("nope");
    let history = h.plain_history();
    assert_eq!(history[history.len() - 2], "? nope");
    assert_eq!(history[history.len() - 1], CANCEL_LINE);
    assert_eq!(h.model.mode, InputMode::Standard);
    assert_eq!(h.model.meltdown.phase(), Phase::Idle);
    assert_eq!(h.scheduler.pending(), 0);
}

#[test]
fn test_confirmed_wipe_runs_to_recovery() {
    let mut h = Harness::booted();
    confirm_wipe(&mut h);

    assert!(h.plain_history().contains(&WIPE_LINE.to_string()));
    assert!(h.model.meltdown.is_active());
    assert!(!h.model.prompt_visible());

    // Keys are dead while the system falls apart
    h.type_str("help");
    assert!(h.model.input.is_empty());

    h.run_until(|m| m.meltdown.glitch() != Glitch::None);
    assert_eq!(h.model.screen(), Screen::Session);

    h.run_until(|m| m.meltdown.phase() == Phase::Frozen);
    assert_eq!(h.model.meltdown.phase(), Phase::Frozen);
    assert_eq!(h.model.meltdown.glitch(), Glitch::Screen);
    assert_eq!(
        h.model
            .history
            .iter()
            .filter(|l| l.id.as_str().starts_with("meltdown-"))
            .count(),
        CRASH_STEP as usize
    );

    h.advance(SETTLE_DELAY);
    assert_eq!(h.model.screen(), Screen::Crashed);
    assert!(!h.model.prompt_visible());

    h.advance(CRASH_HOLD);
    assert_eq!(h.model.screen(), Screen::Recovering);
    assert!(h.model.history.is_empty());

    h.advance(RECOVERY_TOTAL);
    assert_eq!(h.model.screen(), Screen::Session);
    assert!(h.model.sabotage_proof());
    assert_eq!(h.plain_history(), vec![RECOVERED_LINE.to_string()]);
    assert!(h.model.prompt_visible());
    assert!(h.model.focused);
    assert_eq!(h.scheduler.pending(), 0);
}

#[test]
fn test_recovery_dots_progress() {
    let mut h = Harness::booted();
    confirm_wipe(&mut h);
    h.run_until(|m| m.meltdown.phase() == Phase::Crashed);
    h.advance(CRASH_HOLD);

    let mut dots = Vec::new();
    for _ in 0..3 {
        h.advance(Duration::from_millis(750));
        dots.push(h.model.snapshot().recovery_dots);
    }
    assert_eq!(dots, vec![1, 2, 3]);
}

#[test]
fn test_destructive_commands_blocked_after_recovery() {
    let mut h = Harness::booted();
    confirm_wipe(&mut h);
    h.run_until_idle();
    assert!(h.model.sabotage_proof());

    for cmd in ["rm -rf /", "sudo rm -rf /*", "sudo rm -rf", "format c:", ":(){ :|:& };:"] {
        h.submit(cmd);
        let line = h.last_line();
        assert_eq!(line.kind, LineKind::System, "{cmd} should be blocked");
        assert!(line.to_plain().contains("disabled"));
        assert_eq!(h.model.mode, InputMode::Standard);
        assert_eq!(h.model.meltdown.phase(), Phase::Idle);
    }
    assert_eq!(h.scheduler.pending(), 0);

    // Everything else still works
    h.submit("about");
    assert_eq!(h.last_line().kind, LineKind::Output);
}

#[test]
fn test_fork_bomb_skips_confirmation() {
    let mut h = Harness::booted();
    h.submit(":(){ :|:& };:");
    assert_eq!(h.model.mode, InputMode::Standard);
    assert!(h.model.meltdown.is_active());
    assert!(h.scheduler.is_pending(TimerGroup::Meltdown));

    h.run_until_idle();
    assert!(h.model.sabotage_proof());
}

#[test]
fn test_sudo_rm_needs_confirmation() {
    let mut h = Harness::booted();
    h.submit("sudo rm -rf");
    assert_eq!(h.model.mode, InputMode::Confirmation);
    h.submit("YES");
    assert!(h.model.meltdown.is_active());
}

#[test]
fn test_ctrl_c_still_quits_mid_meltdown() {
    let mut h = Harness::booted();
    confirm_wipe(&mut h);
    h.advance(Duration::from_millis(500));
    h.key_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(h.quit);
    assert_eq!(h.scheduler.pending(), 0);
}
