use crate::models::AllocationTable;
use std::time::Duration;

/// A snapshot of a strictly better complete allocation found during a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Incumbent {
    /// Utility net of the price of every good consumed
    pub score: i64,
    /// The clients' utility before costs
    pub utility: i64,
    /// The optimistic score the search carried into this leaf.
    ///
    /// Equals `score` whenever the bookkeeping of forgone entertainment was
    /// exact for this allocation.
    pub estimate: i64,
    /// Time since the solve started
    pub elapsed: Duration,
    /// The allocation, in the caller's client order
    pub allocation: AllocationTable,
}

/// What the listener wants the search to do after an incumbent report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Verdict {
    /// Keep searching for a better allocation
    #[default]
    Continue,
    /// Stop as soon as possible and keep the current incumbent
    Stop,
}

impl Verdict {
    /// Whether the search should carry on
    pub fn is_continue(self) -> bool {
        matches!(self, Verdict::Continue)
    }
}

/// Observes a solve as it improves its incumbent.
///
/// The listener is invoked synchronously from the searching thread, outside
/// the solver's lock, so it may freely query the solver. Its verdict is an
/// additional stop signal: returning [`Verdict::Stop`] halts the search
/// without needing a second thread.
pub trait SolveListener {
    /// Called every time the search finds a strictly better allocation
    fn on_incumbent(&mut self, incumbent: &Incumbent) -> Verdict;
}

impl<F: FnMut(&Incumbent) -> Verdict> SolveListener for F {
    fn on_incumbent(&mut self, incumbent: &Incumbent) -> Verdict {
        self(incumbent)
    }
}

/// A listener that ignores every report and never stops the search
#[derive(Clone, Copy, Debug, Default)]
pub struct Unobserved;

impl SolveListener for Unobserved {
    fn on_incumbent(&mut self, _incumbent: &Incumbent) -> Verdict {
        Verdict::Continue
    }
}
