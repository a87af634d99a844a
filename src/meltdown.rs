//! Meltdown, crash and recovery state machine.
//!
//! `Idle -> Running(step) -> Frozen -> Crashed -> Recovering -> Idle`.
//! Each transition method returns what the controller must schedule next;
//! calls that do not match the current phase are no-ops, which is how
//! stale timers are absorbed.

use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::Rng;

pub const CRITICAL_PATHS: &[&str] = &[
    "/bin/kernel",
    "/usr/lib/system32",
    "/var/log/life_choices.log",
    "/etc/portfolio_config",
    "/home/visitor/hope",
    "/dev/null",
    "/sys/firmware/efi",
    "/proc/kcore",
    "/boot/vmlinuz",
];

const DELETION_STEPS: u32 = 12;
const CORRUPTION_END: u32 = 22;
/// Steps run before the screen freezes for good.
pub const CRASH_STEP: u32 = 28;

pub const SETTLE_DELAY: Duration = Duration::from_millis(1500);
pub const CRASH_HOLD: Duration = Duration::from_millis(3000);
/// Recovery ellipsis steps, measured from the start of recovery.
pub const RECOVERY_PROGRESS: [(u8, Duration); 3] = [
    (1, Duration::from_millis(750)),
    (2, Duration::from_millis(1500)),
    (3, Duration::from_millis(2250)),
];
pub const RECOVERY_TOTAL: Duration = Duration::from_millis(3000);

pub const WIPE_LINE: &str = "INITIATING SYSTEM WIPE...";
pub const CANCEL_LINE: &str = "Action cancelled.";
pub const RECOVERED_LINE: &str =
    "System recovered. Destructive commands disabled by administrator.";

/// Visual corruption level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub enum Glitch {
    #[default]
    None,
    /// Garbled text.
    Text,
    /// Garbled text plus screen artifacts.
    Screen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running {
        step: u32,
    },
    /// Visuals frozen at full intensity, waiting for the crash.
    Frozen,
    Crashed,
    Recovering {
        dots: u8,
    },
}

/// Result of one fired step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line: String,
    pub next: Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Step(Duration),
    Settle(Duration),
}

#[derive(Debug, Clone, Default)]
pub struct Meltdown {
    phase: Phase,
    glitch: Glitch,
    frozen: bool,
    sabotage_proof: bool,
}

impl Meltdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn glitch(&self) -> Glitch {
        self.glitch
    }

    pub fn frozen(&self) -> bool {
        self.frozen
    }

    pub fn sabotage_proof(&self) -> bool {
        self.sabotage_proof
    }

    /// Running or frozen: the prompt is hidden and history is still visible.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Running { .. } | Phase::Frozen)
    }

    /// Begin the sequence. Returns the delay before the first step, or
    /// `None` when already underway or sabotage-proofed.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Duration> {
        if self.sabotage_proof || self.phase != Phase::Idle {
            return None;
        }
        self.phase = Phase::Running { step: 0 };
        Some(self.plan(0, rng))
    }

    /// Fire the pending step: emit its line and plan the next one.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Step> {
        let Phase::Running { step } = self.phase else {
            return None;
        };
        let line = step_line(step, rng);
        let step = step + 1;

        if step >= CRASH_STEP {
            self.phase = Phase::Frozen;
            self.frozen = true;
            self.glitch = Glitch::Screen;
            return Some(Step {
                line,
                next: Next::Settle(SETTLE_DELAY),
            });
        }

        self.phase = Phase::Running { step };
        let delay = self.plan(step, rng);
        Some(Step {
            line,
            next: Next::Step(delay),
        })
    }

    /// Frozen -> Crashed. Returns the crash hold duration.
    pub fn crash(&mut self) -> Option<Duration> {
        if self.phase != Phase::Frozen {
            return None;
        }
        self.phase = Phase::Crashed;
        self.frozen = false;
        self.glitch = Glitch::None;
        Some(CRASH_HOLD)
    }

    /// Crashed -> Recovering.
    pub fn begin_recovery(&mut self) -> bool {
        if self.phase != Phase::Crashed {
            return false;
        }
        self.phase = Phase::Recovering { dots: 0 };
        true
    }

    pub fn set_progress(&mut self, dots: u8) -> bool {
        let Phase::Recovering { .. } = self.phase else {
            return false;
        };
        self.phase = Phase::Recovering { dots };
        true
    }

    /// Recovering -> Idle, permanently sabotage-proof.
    pub fn complete_recovery(&mut self) -> bool {
        let Phase::Recovering { .. } = self.phase else {
            return false;
        };
        self.phase = Phase::Idle;
        self.sabotage_proof = true;
        true
    }

    /// Set the visuals for `step` and pick its delay.
    fn plan<R: Rng + ?Sized>(&mut self, step: u32, rng: &mut R) -> Duration {
        let ms = if step < DELETION_STEPS {
            self.glitch = Glitch::None;
            60
        } else if step < CORRUPTION_END {
            self.glitch = Glitch::Text;
            if rng.random_bool(0.2) {
                300
            } else {
                40
            }
        } else {
            self.glitch = Glitch::Screen;
            self.frozen = rng.random_bool(0.3);
            if rng.random_bool(0.4) {
                600
            } else {
                80
            }
        };
        Duration::from_millis(ms)
    }
}

fn step_line<R: Rng + ?Sized>(step: u32, rng: &mut R) -> String {
    let path = CRITICAL_PATHS.choose(rng).copied().unwrap_or("/");
    if step < DELETION_STEPS {
        return format!("deleting {path}...");
    }
    let len = rng.random_range(0..8);
    let garbage: String = (0..len)
        .filter_map(|_| char::from_digit(rng.random_range(0..16), 16))
        .collect();
    format!("SEGFAULT: {path} [0x{garbage}]")
}
