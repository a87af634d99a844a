//! Pure update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute. Timers are requested with
//! `Command::Schedule` and come back as `Message::Timer`; a timer that no
//! longer matches the current phase is dropped.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::boot::{BootKind, BootStep, READY_LINE};
use crate::interpreter::{Action, InterpretOptions};
use crate::meltdown::{Next, CANCEL_LINE, RECOVERED_LINE, RECOVERY_PROGRESS, RECOVERY_TOTAL, WIPE_LINE};
use crate::scheduler::{Timer, TimerGroup};
use crate::terminal::{Body, LineKind, ResumeState};
use crate::{flog, flog_debug, flog_trace};

use super::command::Command;
use super::message::Message;
use super::model::{InputMode, Model, Overlay, Route, Screen};

pub const MATRIX_DURATION: Duration = Duration::from_millis(5000);
pub const EXIT_DELAY: Duration = Duration::from_millis(1500);
pub const MATRIX_RETURN_LINE: &str = "Welcome back.";
/// Rows moved per PageUp/PageDown.
const PAGE: usize = 10;

/// Commands that kick off a fresh session: the first boot step.
pub fn start(model: &mut Model) -> Vec<Command> {
    let kind = model.boot.as_ref().map(|b| b.kind());
    flog!("session start boot={:?}", kind);
    model.dirty = true;
    vec![Command::schedule(Timer::BootStep, Duration::ZERO)]
}

/// Pure update function: Model + Message → Commands
///
/// All I/O happens via returned Commands. The only impure inputs are the
/// model's own rng and the interpreter's URL opener.
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => update_key(model, key, &mut cmds),

        Message::Resize(_, _) => {
            model.dirty = true;
        }

        Message::Timer(timer) => update_timer(model, timer, &mut cmds),

        Message::ResumeLoaded(id, state) => {
            flog_debug!("Message::ResumeLoaded id={} state={:?}", id, state);
            if let Some(line) = model.history.iter_mut().find(|l| l.id == id) {
                if matches!(line.body, Body::Resume(_)) {
                    line.body = Body::Resume(state);
                    model.dirty = true;
                }
            }
        }
    }

    cmds
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard
// ═══════════════════════════════════════════════════════════════════════════

fn update_key(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        flog!("Ctrl+C, quitting");
        cmds.push(Command::CancelAll);
        cmds.push(Command::Quit);
        return;
    }

    let screen = model.screen();
    if !screen.is_interactive() || model.meltdown.is_active() {
        return;
    }
    if screen == Screen::Standard {
        update_standard_key(model, key, cmds);
    } else if model.focused {
        update_prompt_key(model, key, cmds);
    } else {
        update_blurred_key(model, key, cmds);
    }
}

fn update_standard_key(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => cmds.push(Command::Quit),
        KeyCode::Up | KeyCode::Char('k') => {
            model.standard_scroll = model.standard_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => model.standard_scroll += 1,
        KeyCode::PageUp => model.standard_scroll = model.standard_scroll.saturating_sub(PAGE),
        KeyCode::PageDown => model.standard_scroll += PAGE,
        KeyCode::Home => model.standard_scroll = 0,
        _ => return,
    }
    model.dirty = true;
}

/// A key that can pull focus back to the prompt: no chord modifiers.
fn is_plain_key(key: &KeyEvent) -> bool {
    let chord = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META;
    !key.modifiers.intersects(chord) && matches!(key.code, KeyCode::Char(_))
}

fn update_blurred_key(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::PageUp => scroll_up(model, PAGE),
        KeyCode::PageDown => scroll_down(model, PAGE),
        KeyCode::Up => scroll_up(model, 1),
        KeyCode::Down => scroll_down(model, 1),
        KeyCode::End => {
            model.scroll = 0;
            model.dirty = true;
        }
        _ if is_plain_key(&key) => {
            model.focused = true;
            update_prompt_key(model, key, cmds);
        }
        _ => {}
    }
}

fn update_prompt_key(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    let chord = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META;

    match key.code {
        KeyCode::Esc => model.focused = false,
        KeyCode::PageUp => {
            model.focused = false;
            scroll_up(model, PAGE);
        }
        KeyCode::PageDown => {
            model.focused = false;
            scroll_down(model, PAGE);
        }
        KeyCode::Tab => autocomplete(model),
        KeyCode::Up => {
            if let Some(entry) = model.commands.older() {
                model.input = entry.to_string();
                model.completion.reset();
            }
        }
        KeyCode::Down => {
            if let Some(entry) = model.commands.newer() {
                model.input = entry.to_string();
                model.completion.reset();
            }
        }
        KeyCode::Enter => submit(model, cmds),
        KeyCode::Backspace => {
            model.input.pop();
            model.completion.reset();
            model.scroll = 0;
        }
        KeyCode::Char(c) if !key.modifiers.intersects(chord) => {
            model.input.push(c);
            model.completion.reset();
            model.scroll = 0;
        }
        _ => return,
    }
    model.dirty = true;
}

fn scroll_up(model: &mut Model, rows: usize) {
    let max = model.scrollback_rows().saturating_sub(1);
    model.scroll = (model.scroll + rows).min(max);
    model.dirty = true;
}

fn scroll_down(model: &mut Model, rows: usize) {
    model.scroll = model.scroll.saturating_sub(rows);
    model.dirty = true;
}

fn autocomplete(model: &mut Model) {
    if model.input.trim().is_empty() {
        return;
    }
    let typed = model.input.to_lowercase();
    let registry = model.interpreter.registry();
    let choice = model
        .completion
        .advance(&typed, |prefix| registry.complete(prefix))
        .map(str::to_string);
    if let Some(choice) = choice {
        model.input = choice;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Submission
// ═══════════════════════════════════════════════════════════════════════════

fn submit(model: &mut Model, cmds: &mut Vec<Command>) {
    model.completion.reset();
    model.scroll = 0;
    let raw = std::mem::take(&mut model.input);
    let echo = format!("{} {}", model.mode.prompt(), raw);
    model.push_line("input", LineKind::Input, echo);

    if model.mode == InputMode::Confirmation {
        model.mode = InputMode::Standard;
        let answer = raw.trim().to_lowercase();
        if answer == "y" || answer == "yes" {
            flog!("destruction confirmed");
            model.push_line("system", LineKind::Error, WIPE_LINE);
            start_meltdown(model, cmds);
        } else {
            model.push_line("system", LineKind::System, CANCEL_LINE);
        }
        return;
    }

    let command = raw.trim();
    if command.is_empty() {
        return;
    }

    let options = InterpretOptions {
        sabotage_proof: model.sabotage_proof(),
    };
    let response = model.interpreter.interpret(command, options, &mut model.rng);
    model.commands.push(command.to_string());

    let kind = response.line_kind();
    if let Some(body) = response.output {
        let loading = body == Body::Resume(ResumeState::Loading);
        let id = model.push_line("output", kind, body);
        if loading {
            cmds.push(Command::LoadResume { id });
        }
    }

    if let Some(action) = response.action {
        apply_action(model, action, cmds);
    }
}

fn apply_action(model: &mut Model, action: Action, cmds: &mut Vec<Command>) {
    flog_debug!("apply_action {:?}", action);
    match action {
        Action::Clear => model.history.clear(),
        Action::SetTheme(name) => model.theme = name,
        Action::ConfirmDestruction => model.mode = InputMode::Confirmation,
        Action::TriggerMeltdown => start_meltdown(model, cmds),
        Action::TriggerMatrixAnimation => {
            model.focused = false;
            model.theme = "matrix".to_string();
            model.overlay = Overlay::Matrix;
            cmds.push(Command::schedule(Timer::MatrixDone, MATRIX_DURATION));
        }
        Action::ExitSession => {
            model.focused = false;
            model.overlay = Overlay::Exiting;
            cmds.push(Command::schedule(Timer::ExitRedirect, EXIT_DELAY));
        }
    }
    model.dirty = true;
}

fn start_meltdown(model: &mut Model, cmds: &mut Vec<Command>) {
    if let Some(delay) = model.meltdown.start(&mut model.rng) {
        flog!("meltdown started");
        cmds.push(Command::schedule(Timer::MeltdownStep, delay));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Timers
// ═══════════════════════════════════════════════════════════════════════════

fn update_timer(model: &mut Model, timer: Timer, cmds: &mut Vec<Command>) {
    flog_trace!("timer fired {:?}", timer);
    match timer {
        Timer::BootStep => boot_step(model, cmds),

        Timer::MeltdownStep => {
            let Some(step) = model.meltdown.step(&mut model.rng) else {
                return;
            };
            model.push_line("meltdown", LineKind::Error, step.line);
            match step.next {
                Next::Step(delay) => cmds.push(Command::schedule(Timer::MeltdownStep, delay)),
                Next::Settle(delay) => cmds.push(Command::schedule(Timer::CrashSettle, delay)),
            }
        }

        Timer::CrashSettle => {
            if let Some(hold) = model.meltdown.crash() {
                flog!("system crashed");
                model.scroll = 0;
                model.dirty = true;
                cmds.push(Command::Cancel(TimerGroup::Meltdown));
                cmds.push(Command::schedule(Timer::CrashHold, hold));
            }
        }

        Timer::CrashHold => {
            if model.meltdown.begin_recovery() {
                model.history.clear();
                model.input.clear();
                model.completion.reset();
                model.commands.clear();
                model.mode = InputMode::Standard;
                model.focused = false;
                model.scroll = 0;
                model.dirty = true;
                for (dots, at) in RECOVERY_PROGRESS {
                    cmds.push(Command::schedule(Timer::RecoveryProgress(dots), at));
                }
                cmds.push(Command::schedule(Timer::RecoveryComplete, RECOVERY_TOTAL));
            }
        }

        Timer::RecoveryProgress(dots) => {
            if model.meltdown.set_progress(dots) {
                model.dirty = true;
            }
        }

        Timer::RecoveryComplete => {
            if model.meltdown.complete_recovery() {
                flog!("recovered, sabotage-proof from now on");
                model.history.clear();
                model.push_line("system", LineKind::System, RECOVERED_LINE);
                model.focused = true;
            }
        }

        Timer::MatrixDone => {
            if model.overlay == Overlay::Matrix {
                model.overlay = Overlay::None;
                model.focused = true;
                model.push_line("system", LineKind::System, MATRIX_RETURN_LINE);
            }
        }

        Timer::ExitRedirect => {
            if model.overlay == Overlay::Exiting {
                model.overlay = Overlay::None;
                model.route = Route::Standard;
                model.dirty = true;
                cmds.push(Command::CancelAll);
            }
        }
    }
}

fn boot_step(model: &mut Model, cmds: &mut Vec<Command>) {
    let Some(boot) = model.boot.as_mut() else {
        return;
    };

    match boot.next_batch() {
        BootStep::Batch { lines, next_delay } => {
            for line in lines {
                model.push_line("boot", LineKind::System, line);
            }
            cmds.push(Command::schedule(Timer::BootStep, next_delay));
        }
        BootStep::Done => {
            let kind = boot.kind();
            model.boot = None;
            model.push_line("system", LineKind::System, READY_LINE);
            model.focused = true;
            flog!("boot complete kind={:?}", kind);
            if kind == BootKind::Full {
                cmds.push(Command::MarkBooted);
            }
        }
    }
}
