//! Deferred timers driving the boot, meltdown, matrix and exit chains.
//!
//! `update` never sleeps; it asks for a timer with `Command::Schedule` and
//! receives `Message::Timer` when it fires. Timers are grouped so a whole
//! chain can be cancelled at once.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::flog_trace;
use crate::tea::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    BootStep,
    MeltdownStep,
    CrashSettle,
    CrashHold,
    RecoveryProgress(u8),
    RecoveryComplete,
    MatrixDone,
    ExitRedirect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerGroup {
    Boot,
    Meltdown,
    Recovery,
    Matrix,
    Exit,
}

impl Timer {
    pub fn group(&self) -> TimerGroup {
        match self {
            Timer::BootStep => TimerGroup::Boot,
            Timer::MeltdownStep | Timer::CrashSettle | Timer::CrashHold => TimerGroup::Meltdown,
            Timer::RecoveryProgress(_) | Timer::RecoveryComplete => TimerGroup::Recovery,
            Timer::MatrixDone => TimerGroup::Matrix,
            Timer::ExitRedirect => TimerGroup::Exit,
        }
    }
}

pub trait Scheduler {
    fn schedule(&mut self, timer: Timer, after: Duration);
    fn cancel(&mut self, group: TimerGroup);
    fn cancel_all(&mut self);
}

/// Wall-clock timers on the tokio runtime.
pub struct TokioScheduler {
    msg_tx: mpsc::UnboundedSender<Message>,
    groups: HashMap<TimerGroup, CancellationToken>,
}

impl TokioScheduler {
    pub fn new(msg_tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            msg_tx,
            groups: HashMap::new(),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, timer: Timer, after: Duration) {
        let cancel = self
            .groups
            .entry(timer.group())
            .or_insert_with(CancellationToken::new)
            .clone();
        let tx = self.msg_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    flog_trace!("timer {:?} cancelled", timer);
                }
                _ = tokio::time::sleep(after) => {
                    let _ = tx.send(Message::Timer(timer));
                }
            }
        });
    }

    fn cancel(&mut self, group: TimerGroup) {
        if let Some(token) = self.groups.remove(&group) {
            token.cancel();
        }
    }

    fn cancel_all(&mut self) {
        for (_, token) in self.groups.drain() {
            token.cancel();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Deterministic clock for tests: nothing fires until the owner asks.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    seq: u64,
    pending: BTreeMap<(Duration, u64), Timer>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, group: TimerGroup) -> bool {
        self.pending.values().any(|t| t.group() == group)
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest timer due at or before `deadline`, moving the
    /// clock to its due time.
    pub fn pop_until(&mut self, deadline: Duration) -> Option<Timer> {
        let (&(due, seq), _) = self.pending.iter().next()?;
        if due > deadline {
            return None;
        }
        self.now = self.now.max(due);
        self.pending.remove(&(due, seq))
    }

    /// Pop the earliest timer regardless of how far away it is.
    pub fn pop_next(&mut self) -> Option<Timer> {
        let due = self.next_due()?;
        self.pop_until(due)
    }

    /// Move the clock forward without firing anything.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, timer: Timer, after: Duration) {
        self.seq += 1;
        self.pending.insert((self.now + after, self.seq), timer);
    }

    fn cancel(&mut self, group: TimerGroup) {
        self.pending.retain(|_, t| t.group() != group);
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }
}
