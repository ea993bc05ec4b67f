//! Scenario Interrupt Value Object
//!
//! Deadline and cancellation state shared between the runner and the
//! worker executing one scenario. The runner stops waiting for a scenario
//! once either trips; the worker checks it between generator calls so an
//! abandoned scenario stops spawning work and cleans up its workspace.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a scenario was interrupted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptReason {
    Cancelled,
    DeadlineExceeded,
}

impl InterruptReason {
    pub fn as_str(self) -> &'static str {
        match self {
            InterruptReason::Cancelled => "run cancelled",
            InterruptReason::DeadlineExceeded => "deadline exceeded",
        }
    }
}

/// Deadline plus cancellation flag for one scenario
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Interrupt {
    /// Never trips
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Deadline `timeout` from now, if any
    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        self.with_deadline(timeout.map(|t| Instant::now() + t))
    }

    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` without one
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// The reason the scenario must stop, if it must
    pub fn check(&self) -> Option<InterruptReason> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|c| c.load(Ordering::SeqCst))
        {
            return Some(InterruptReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                Some(InterruptReason::DeadlineExceeded)
            }
            _ => None,
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.check().is_some()
    }
}

/// `200ms`, `3s`, `1500ms`: whole seconds when exact, milliseconds otherwise
pub fn format_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 && duration.as_secs() > 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
