use std::time::Duration;

/// Configuration for [`crate::PriceOptimizer`].
///
/// Both limits are optional. Without them the search runs until the tree is
/// exhausted or a caller cancels it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverSettings {
    /// Give up on the rest of the tree after this much wall-clock time
    #[cfg_attr(feature = "serde", serde(default, with = "humantime_serde::option"))]
    pub time_limit: Option<Duration>,

    /// Stop as soon as an allocation scores at least this much
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_score: Option<i64>,

    /// Which goods an allocation may draw on
    #[cfg_attr(feature = "serde", serde(default))]
    pub supply: Supply,
}

/// Where the goods handed to clients come from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Supply {
    /// Anything the quoted price curves sell, at their price
    #[default]
    Market,
    /// Only the units already owned, at no cost. The price curves are ignored.
    Owned,
}

impl SolverSettings {
    /// Settings with a time limit and no target score
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit: Some(time_limit),
            ..Default::default()
        }
    }

    /// Whether an allocation with this score ends the search
    pub fn reached_target(&self, score: i64) -> bool {
        self.target_score.is_some_and(|target| score >= target)
    }
}
