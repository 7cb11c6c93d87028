use super::SolveListener;
use crate::models::{AllocationTable, ShapeError, SolveInput};
use std::time::Duration;
use thiserror::Error;

/// The ways a solve request can be refused.
///
/// Neither is raised once the search has started: degenerate market data is
/// tolerated, and the worst outcome of a bad run is the allocation in which
/// nobody travels.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// Another solve is running on the same solver
    #[error("a solve is already running")]
    AlreadySolving,
    /// The request tables have the wrong shape
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ShapeError),
}

/// Interface for resolvers that allocate goods to clients at current prices.
///
/// A solver runs at most one solve at a time. The thread that calls
/// [`PriceSolver::start_solve`] is blocked for the duration of the search,
/// while any other thread may cancel it or read the best allocation so far.
pub trait PriceSolver {
    /// The configuration type for this solver
    type Settings;

    /// Create a new instance with the provided settings
    fn new(settings: Self::Settings) -> Self;

    /// Whether a solve is currently running
    fn is_solving(&self) -> bool;

    /// Run a solve to completion or cancellation.
    ///
    /// Returns `Ok(true)` if the whole search tree was explored and
    /// `Ok(false)` if the search was cancelled, stopped by the listener or
    /// ran out of time. Either way the latest allocation holds the best
    /// incumbent found.
    fn start_solve<L: SolveListener>(
        &self,
        listener: &mut L,
        input: &SolveInput,
    ) -> Result<bool, SolveError>;

    /// Ask a running solve to stop.
    ///
    /// Returns `true` if no solve is running. Otherwise, when `wait` is set,
    /// blocks until the solve has unwound and returns `true`; without `wait`
    /// it returns `false` immediately.
    fn request_cancel(&self, wait: bool) -> bool;

    /// The allocation of the latest incumbent
    fn latest_allocation(&self) -> AllocationTable;

    /// The wall-clock time of the last finished solve, or the time to the
    /// latest incumbent while a solve is running
    fn elapsed(&self) -> Option<Duration>;
}
