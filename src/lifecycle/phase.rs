//! Session phase tracking.

use std::fmt;

/// Where a session is in its two-exchange lifetime.
///
/// Phases only move forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Listening,
    AwaitGet,
    ServeGet,
    AwaitPost,
    ServePost,
    Done,
}

impl Phase {
    /// The phase that follows this one, `None` once done.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Listening => Some(Phase::AwaitGet),
            Phase::AwaitGet => Some(Phase::ServeGet),
            Phase::ServeGet => Some(Phase::AwaitPost),
            Phase::AwaitPost => Some(Phase::ServePost),
            Phase::ServePost => Some(Phase::Done),
            Phase::Done => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Listening => "listening",
            Phase::AwaitGet => "await_get",
            Phase::ServeGet => "serve_get",
            Phase::AwaitPost => "await_post",
            Phase::ServePost => "serve_post",
            Phase::Done => "done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the current phase and logs every transition.
#[derive(Debug)]
pub struct PhaseTracker {
    current: Phase,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self {
            current: Phase::Listening,
        }
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    /// Step to the next phase. Stays put once done.
    pub fn advance(&mut self) -> Phase {
        if let Some(next) = self.current.next() {
            tracing::debug!(from = %self.current, to = %next, "Phase transition");
            self.current = next;
        }
        self.current
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_every_phase_in_order() {
        let mut tracker = PhaseTracker::new();
        let mut seen = vec![tracker.current()];
        while tracker.current() != Phase::Done {
            seen.push(tracker.advance());
        }
        assert_eq!(
            seen,
            vec![
                Phase::Listening,
                Phase::AwaitGet,
                Phase::ServeGet,
                Phase::AwaitPost,
                Phase::ServePost,
                Phase::Done,
            ]
        );
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn done_is_terminal() {
        let mut tracker = PhaseTracker::new();
        for _ in 0..10 {
            tracker.advance();
        }
        assert_eq!(tracker.current(), Phase::Done);
        assert_eq!(Phase::Done.next(), None);
    }
}
