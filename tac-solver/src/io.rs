use crate::{Purchase, Solution, StopReason};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tac_core::models::{AllocationTable, SolveInput};
use thiserror::Error;

/// A solve request as read from JSON.
///
/// ```json
/// { "preferences": [[1, 3, 50, 10, 20, 30], ...],
///   "ownership": [[0, 0, 0, 0], ...],
///   "prices": [[0, 100, 200, 300, 400, 500, 600, 700, 800], ...] }
/// ```
pub type Request = SolveInput;

/// The JSON rendering of a [`Solution`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Utility net of costs
    pub score: i64,
    /// Utility before costs
    pub utility: i64,
    /// Whether the whole tree was explored
    pub completed: bool,
    /// Why the search ended early, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopReason>,
    /// Wall-clock time of the solve
    pub elapsed_ms: u64,
    /// Nodes entered
    pub nodes: u64,
    /// Leaves scored
    pub leaves: u64,
    /// `[in_day, out_day, good_hotel, e1_day, e2_day, e3_day]` per client
    pub allocation: AllocationTable,
    /// What the allocation needs from each auction
    pub purchases: Vec<Purchase>,
}

impl From<&Solution> for Report {
    fn from(solution: &Solution) -> Self {
        Self {
            score: solution.score,
            utility: solution.utility,
            completed: solution.completed,
            stop: solution.stop,
            elapsed_ms: solution.elapsed.as_millis().try_into().unwrap_or(u64::MAX),
            nodes: solution.stats.nodes,
            leaves: solution.stats.leaves,
            allocation: solution.allocation,
            purchases: solution.purchases.clone(),
        }
    }
}

/// The ways reading a request or writing a report can fail
#[derive(Debug, Error)]
pub enum IoError {
    /// The document is not valid JSON for the expected shape
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    /// The underlying reader or writer failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parses a solve request
pub fn read_request<R: Read>(reader: R) -> Result<Request, IoError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Writes the report of a solution as pretty-printed JSON
pub fn write_report<W: Write>(mut writer: W, solution: &Solution) -> Result<(), IoError> {
    serde_json::to_writer_pretty(&mut writer, &Report::from(solution))?;
    writeln!(writer)?;
    Ok(())
}
