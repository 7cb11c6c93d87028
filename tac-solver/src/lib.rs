#![warn(missing_docs)]
//! A branch-and-bound allocation resolver for TAC Travel agents.
//!
//! Given the preferences of an agent's eight clients, the goods it already
//! holds and a price curve for every auction, [`PriceOptimizer`] searches for
//! the assignment of trips, hotel rooms and entertainment tickets that
//! maximizes total client utility minus the cost of the goods consumed.

/**
 * Normalization of the market data ahead of a search.
 */
pub mod market;
pub use market::PreparedMarket;

/**
 * The search tree itself.
 */
mod search;
pub use search::SearchStats;

/**
 * The thread-safe facade that runs searches and publishes their incumbents.
 */
mod optimizer;
pub use optimizer::PriceOptimizer;

/**
 * Solver configuration.
 */
mod settings;
pub use settings::{SolverSettings, Supply};

/**
 * The outcome of a solve, with the purchases it implies.
 */
mod solution;
pub use solution::{Purchase, Solution, StopReason, consumption, purchase_plan};

/**
 * JSON requests and reports, for driving the solver from outside Rust.
 */
#[cfg(feature = "io")]
pub mod io;
