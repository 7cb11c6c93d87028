use crate::{
    PreparedMarket, Solution, SolverSettings, Supply,
    search::{EventPlans, Limits, Reporter, Search},
};
use parking_lot::{Condvar, Mutex};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tac_core::{
    models::{AllocationTable, SolveInput},
    ports::{Incumbent, PriceSolver, SolveError, SolveListener, Unobserved, Verdict},
};
use tracing::{Level, event, span};

/// The incumbent record shared between the searching thread and everyone else
#[derive(Debug)]
struct Shared {
    solving: bool,
    best: Option<Incumbent>,
    elapsed: Option<Duration>,
}

/// A branch-and-bound resolver for one agent's eight clients.
///
/// The optimizer is meant to be shared (typically behind an `Arc`): one
/// thread blocks in [`PriceSolver::start_solve`] or [`PriceOptimizer::solve`]
/// while others poll [`PriceSolver::latest_allocation`] or call
/// [`PriceSolver::request_cancel`]. At most one solve runs at a time.
///
/// Listeners are called without the internal lock held, so they may query
/// the optimizer. They must not call `request_cancel(true)` themselves, since
/// that would wait on the very solve they are part of.
pub struct PriceOptimizer {
    settings: SolverSettings,
    plans: EventPlans,
    shared: Mutex<Shared>,
    finished: Condvar,
    cancel: AtomicBool,
}

impl PriceSolver for PriceOptimizer {
    type Settings = SolverSettings;

    fn new(settings: Self::Settings) -> Self {
        Self {
            settings,
            plans: EventPlans::new(),
            shared: Mutex::new(Shared {
                solving: false,
                best: None,
                elapsed: None,
            }),
            finished: Condvar::new(),
            cancel: AtomicBool::new(false),
        }
    }

    fn is_solving(&self) -> bool {
        self.shared.lock().solving
    }

    fn start_solve<L: SolveListener>(
        &self,
        listener: &mut L,
        input: &SolveInput,
    ) -> Result<bool, SolveError> {
        self.run(listener, input)
            .map(|solution| solution.completed)
    }

    fn request_cancel(&self, wait: bool) -> bool {
        let mut shared = self.shared.lock();
        if !shared.solving {
            return true;
        }
        self.cancel.store(true, Ordering::Release);
        if !wait {
            return false;
        }
        self.finished.wait_while(&mut shared, |shared| shared.solving);
        true
    }

    fn latest_allocation(&self) -> AllocationTable {
        self.shared
            .lock()
            .best
            .map_or(AllocationTable::HOME, |best| best.allocation)
    }

    fn elapsed(&self) -> Option<Duration> {
        self.shared.lock().elapsed
    }
}

impl Default for PriceOptimizer {
    fn default() -> Self {
        Self::new(SolverSettings::default())
    }
}

impl PriceOptimizer {
    /// The settings this optimizer was built with
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// The score of the latest incumbent, 0 if nobody travels
    pub fn best_score(&self) -> i64 {
        self.shared.lock().best.map_or(0, |best| best.score)
    }

    /// Like [`PriceSolver::request_cancel`] with `wait`, but gives up after
    /// `timeout`. Returns whether the solver is idle.
    pub fn request_cancel_within(&self, timeout: Duration) -> bool {
        let mut shared = self.shared.lock();
        if !shared.solving {
            return true;
        }
        self.cancel.store(true, Ordering::Release);
        let waited = self
            .finished
            .wait_while_for(&mut shared, |shared| shared.solving, timeout);
        if waited.timed_out() {
            event!(Level::WARN, ?timeout, "solve did not stop in time");
            return false;
        }
        true
    }

    /// Runs a solve without a listener and returns the full outcome
    pub fn solve(&self, input: &SolveInput) -> Result<Solution, SolveError> {
        self.run(&mut Unobserved, input)
    }

    /// Runs a solve, reporting every new incumbent to `listener`, and
    /// returns the full outcome
    pub fn solve_with<L: SolveListener>(
        &self,
        listener: &mut L,
        input: &SolveInput,
    ) -> Result<Solution, SolveError> {
        self.run(listener, input)
    }

    fn run<L: SolveListener>(
        &self,
        listener: &mut L,
        input: &SolveInput,
    ) -> Result<Solution, SolveError> {
        let _guard = SolvingGuard::acquire(self)?;

        let span = span!(Level::INFO, "solve");
        let _enter = span.enter();

        let owned_only;
        let input = match self.settings.supply {
            Supply::Market => input,
            Supply::Owned => {
                owned_only = input.owned_goods_only();
                &owned_only
            }
        };

        let decreasing = input.prices.iter().filter(|curve| !curve.is_monotone()).count();
        if decreasing > 0 {
            event!(
                Level::WARN,
                curves = decreasing,
                "some price curves decrease, the allocation may not be optimal"
            );
        }

        let started = Instant::now();
        let market = PreparedMarket::new(input);
        event!(
            Level::INFO,
            start_score = market.start_score,
            supply = ?self.settings.supply,
            owned = input.ownership.total(),
            time_limit = ?self.settings.time_limit,
            "starting search"
        );

        let limits = Limits {
            cancel: &self.cancel,
            deadline: self.settings.time_limit.map(|limit| started + limit),
        };
        let mut session = Session {
            optimizer: self,
            listener,
        };
        let outcome = Search::new(&market, &self.plans, &mut session, limits).run();
        let elapsed = started.elapsed();

        let best = {
            let mut shared = self.shared.lock();
            shared.elapsed = Some(elapsed);
            shared.best
        };

        let solution = Solution::new(
            input,
            best.map(|best| (best.score, best.utility, best.allocation)),
            outcome.stop,
            elapsed,
            outcome.stats,
        );

        event!(
            Level::INFO,
            score = solution.score,
            utility = solution.utility,
            completed = solution.completed,
            nodes = solution.stats.nodes,
            leaves = solution.stats.leaves,
            elapsed = ?elapsed,
            "search finished"
        );
        event!(Level::DEBUG, "\n{solution}");

        Ok(solution)
    }
}

/// Marks the optimizer busy for the lifetime of a solve.
///
/// Dropping the guard clears the busy flag and wakes every thread waiting in
/// a cancel request, however the solve ends.
struct SolvingGuard<'a>(&'a PriceOptimizer);

impl<'a> SolvingGuard<'a> {
    fn acquire(optimizer: &'a PriceOptimizer) -> Result<Self, SolveError> {
        let mut shared = optimizer.shared.lock();
        if shared.solving {
            return Err(SolveError::AlreadySolving);
        }
        shared.solving = true;
        shared.best = None;
        shared.elapsed = None;
        optimizer.cancel.store(false, Ordering::Release);
        Ok(Self(optimizer))
    }
}

impl Drop for SolvingGuard<'_> {
    fn drop(&mut self) {
        self.0.shared.lock().solving = false;
        self.0.finished.notify_all();
    }
}

/// Publishes incumbents to the shared record, then to the listener
struct Session<'a, L> {
    optimizer: &'a PriceOptimizer,
    listener: &'a mut L,
}

impl<L: SolveListener> Reporter for Session<'_, L> {
    fn improved(&mut self, incumbent: &Incumbent) -> Verdict {
        {
            let mut shared = self.optimizer.shared.lock();
            shared.best = Some(*incumbent);
            shared.elapsed = Some(incumbent.elapsed);
        }
        event!(
            Level::DEBUG,
            score = incumbent.score,
            estimate = incumbent.estimate,
            travellers = incumbent.allocation.travellers(),
            elapsed = ?incumbent.elapsed,
            "new incumbent"
        );

        let listener = &mut *self.listener;
        let verdict = match catch_unwind(AssertUnwindSafe(|| listener.on_incumbent(incumbent))) {
            Ok(verdict) => verdict,
            Err(_) => {
                event!(Level::WARN, "listener panicked, stopping the search");
                Verdict::Stop
            }
        };

        if verdict.is_continue() && self.optimizer.settings.reached_target(incumbent.score) {
            event!(Level::INFO, score = incumbent.score, "target score reached");
            return Verdict::Stop;
        }
        verdict
    }
}
