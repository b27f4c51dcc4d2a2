//! Preview region state machine.
//!
//! ```text
//! idle ──submit──► loading ──► loaded
//!                     │   └──► errored
//!                     └──submit──► loading (new ticket)
//! ```
//!
//! Every submission takes a fresh [`Ticket`]. A completion only applies
//! when it carries the latest ticket, so a slow response for an old
//! submission can never overwrite the outcome of a newer one. The browser
//! script runs the same machine against the `data-seq` and `data-state`
//! attributes rendered from this type.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

impl Phase {
    /// Value of the `data-state` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Errored => "errored",
        }
    }
}

/// Submission sequence number; higher is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticket(u64);

impl Ticket {
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How an artifact fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Loaded,
    Errored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    latest: Ticket,
    phase: Phase,
}

impl PreviewState {
    /// State for a region whose last submission was `seq`, as echoed back
    /// by a fragment request. A region that never saw a submission starts
    /// from zero.
    pub fn resume(seq: u64) -> Self {
        Self {
            latest: Ticket(seq.saturating_sub(1)),
            phase: Phase::Idle,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn latest(&self) -> Ticket {
        self.latest
    }

    /// Start a new submission. Any fetch still in flight is superseded.
    pub fn submit(&mut self) -> Ticket {
        self.latest = Ticket(self.latest.0 + 1);
        self.phase = Phase::Loading;
        self.latest
    }

    /// Apply the outcome of the fetch started by `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when `ticket` is
    /// stale or nothing is loading.
    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome) -> bool {
        if ticket != self.latest || self.phase != Phase::Loading {
            return false;
        }
        self.phase = match outcome {
            Outcome::Loaded => Phase::Loaded,
            Outcome::Errored => Phase::Errored,
        };
        true
    }
}
