//! Boot log playback.
//!
//! The sequencer only decides what to print and how long to wait; the
//! controller owns the history and the timer that drives each step.

use std::time::Duration;

use serde::Deserialize;

use crate::Result;

const BOOT_LOG: &str = include_str!("../assets/boot.toml");

/// Lines printed per step when none of them asks for a pause.
pub const BATCH_SIZE: usize = 3;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(20);
pub const READY_LINE: &str = "Type 'help' to begin.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BootLine {
    pub text: String,
    /// Pause after this line; also ends the current batch.
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

impl BootLine {
    pub fn new(text: impl Into<String>, delay_ms: Option<u64>) -> Self {
        Self {
            text: text.into(),
            delay_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BootLog {
    lines: Vec<BootLine>,
}

/// The full journal shown on a cold start.
pub fn full_log() -> Result<Vec<BootLine>> {
    let log: BootLog = toml::from_str(BOOT_LOG)?;
    Ok(log.lines)
}

/// Abbreviated sequence for a shell session that has booted before.
pub fn fast_log() -> Vec<BootLine> {
    vec![
        BootLine::new("[INFO] Resuming session...", Some(50)),
        BootLine::new("[ OK ] System checks complete.", Some(100)),
        BootLine::new("[INFO] Welcome back to PortfolioOS.", Some(200)),
    ]
}

/// `[    0.123456] ` style prefix.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("[{:>12.6}] ", elapsed.as_secs_f64())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootKind {
    Full,
    Fast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootStep {
    /// Lines to append in one update, and the wait before the next step.
    Batch {
        lines: Vec<String>,
        next_delay: Duration,
    },
    Done,
}

#[derive(Debug, Clone)]
pub struct BootSequencer {
    kind: BootKind,
    lines: Vec<BootLine>,
    cursor: usize,
    /// Sum of the waits scheduled so far; used for the timestamp prefix.
    elapsed: Duration,
}

impl BootSequencer {
    pub fn new(kind: BootKind, lines: Vec<BootLine>) -> Self {
        Self {
            kind,
            lines,
            cursor: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn fast() -> Self {
        Self::new(BootKind::Fast, fast_log())
    }

    pub fn kind(&self) -> BootKind {
        self.kind
    }

    pub fn next_batch(&mut self) -> BootStep {
        if self.cursor >= self.lines.len() {
            return BootStep::Done;
        }

        let prefix = format_elapsed(self.elapsed);
        let mut batch = Vec::with_capacity(BATCH_SIZE);
        let mut next_delay = DEFAULT_DELAY;
        while let Some(line) = self.lines.get(self.cursor) {
            batch.push(format!("{prefix}{}", line.text));
            self.cursor += 1;
            if let Some(ms) = line.delay_ms {
                next_delay = Duration::from_millis(ms);
                break;
            }
            if batch.len() >= BATCH_SIZE {
                break;
            }
        }

        self.elapsed += next_delay;
        BootStep::Batch {
            lines: batch,
            next_delay,
        }
    }
}
