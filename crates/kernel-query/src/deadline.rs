//! Caller-supplied time budget for long-running geometry loops.

use std::time::{Duration, Instant};

/// Raised when a [`Deadline`] has passed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{stage} exceeded its time budget of {budget:?}")]
pub struct DeadlineExceeded {
    pub stage: String,
    pub budget: Duration,
}

/// A point in time after which work must stop with an error.
///
/// Checked cooperatively inside loops; there is no preemption.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    /// Deadline that expires `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget: Some(budget),
        }
    }

    /// Deadline that never expires.
    pub fn unbounded() -> Self {
        Self {
            started: Instant::now(),
            budget: None,
        }
    }

    pub fn from_option(budget: Option<Duration>) -> Self {
        match budget {
            Some(b) => Self::after(b),
            None => Self::unbounded(),
        }
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    pub fn is_expired(&self) -> bool {
        match self.budget {
            Some(b) => self.started.elapsed() >= b,
            None => false,
        }
    }

    /// Return an error naming `stage` if the budget is spent.
    pub fn check(&self, stage: &str) -> Result<(), DeadlineExceeded> {
        match self.budget {
            Some(budget) if self.started.elapsed() >= budget => Err(DeadlineExceeded {
                stage: stage.to_string(),
                budget,
            }),
            _ => Ok(()),
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::unbounded()
    }
}
