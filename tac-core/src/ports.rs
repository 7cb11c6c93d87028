mod listener;
mod solver;

pub use listener::{Incumbent, SolveListener, Unobserved, Verdict};
pub use solver::{PriceSolver, SolveError};
