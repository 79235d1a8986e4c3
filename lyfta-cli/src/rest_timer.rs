use std::time::{Duration, Instant};

/// Between-set countdown owned by the UI, started when a set completion
/// toggles to true. Start/pause/resume/dismiss only; nothing persists
/// across restarts and the engine never sees it.
#[derive(Debug, Clone, Default)]
pub enum RestTimer {
    #[default]
    Idle,
    Running {
        deadline: Instant,
    },
    Paused {
        remaining: Duration,
    },
}

impl RestTimer {
    pub fn start(&mut self, seconds: u32) {
        *self = RestTimer::Running {
            deadline: Instant::now() + Duration::from_secs(u64::from(seconds)),
        };
    }

    pub fn toggle_pause(&mut self) {
        *self = match *self {
            RestTimer::Running { deadline } => RestTimer::Paused {
                remaining: deadline.saturating_duration_since(Instant::now()),
            },
            RestTimer::Paused { remaining } => RestTimer::Running {
                deadline: Instant::now() + remaining,
            },
            RestTimer::Idle => RestTimer::Idle,
        };
    }

    pub fn dismiss(&mut self) {
        *self = RestTimer::Idle;
    }

    /// Seconds left, or `None` when idle. Hits zero and stays there until
    /// dismissed.
    pub fn remaining_secs(&self) -> Option<u64> {
        match self {
            RestTimer::Idle => None,
            RestTimer::Running { deadline } => {
                Some(deadline.saturating_duration_since(Instant::now()).as_secs())
            }
            RestTimer::Paused { remaining } => Some(remaining.as_secs()),
        }
    }
}
