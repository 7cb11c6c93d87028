use crate::SearchStats;
use std::fmt;
use std::time::Duration;
use tac_core::models::{
    AllocationTable, AuctionId, DAYS, EventType, FAMILIES, Family, SolveInput,
};

/// Why a search ended before exhausting its tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StopReason {
    /// A caller asked for cancellation
    Cancelled,
    /// The listener returned [`tac_core::ports::Verdict::Stop`], panicked,
    /// or the target score was reached
    Stopped,
    /// The configured time limit ran out
    TimedOut,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::Cancelled => "cancelled",
            StopReason::Stopped => "stopped",
            StopReason::TimedOut => "timed out",
        })
    }
}

/// What has to be bought in one auction to realize an allocation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Purchase {
    /// The auction
    pub auction: AuctionId,
    /// Units the allocation uses
    pub consumed: u8,
    /// Units already held
    pub owned: u8,
    /// Units still to acquire
    pub to_buy: u8,
    /// The curve's cost of the consumed quantity
    pub cost: i64,
}

/// The outcome of a finished solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Utility net of costs of the best allocation found
    pub score: i64,
    /// The clients' utility before costs
    pub utility: i64,
    /// The best allocation found, in the caller's client order
    pub allocation: AllocationTable,
    /// Whether the search explored its whole tree
    pub completed: bool,
    /// Why the search ended early, if it did
    pub stop: Option<StopReason>,
    /// Wall-clock time of the solve
    pub elapsed: Duration,
    /// Search counters
    pub stats: SearchStats,
    /// The goods the allocation needs, auction by auction
    pub purchases: Vec<Purchase>,
}

impl Solution {
    pub(crate) fn new(
        input: &SolveInput,
        best: Option<(i64, i64, AllocationTable)>,
        stop: Option<StopReason>,
        elapsed: Duration,
        stats: SearchStats,
    ) -> Self {
        let (score, utility, allocation) = best.unwrap_or((0, 0, AllocationTable::HOME));
        Self {
            score,
            utility,
            allocation,
            completed: stop.is_none(),
            stop,
            elapsed,
            stats,
            purchases: purchase_plan(input, &allocation),
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "final score: {} (utility {})", self.score, self.utility)?;
        write!(f, "{}", self.allocation)?;
        for purchase in &self.purchases {
            writeln!(
                f,
                "{}: use {}, own {}, buy {} (cost {})",
                purchase.auction, purchase.consumed, purchase.owned, purchase.to_buy, purchase.cost
            )?;
        }
        write!(
            f,
            "{} nodes, {} leaves in {:?}",
            self.stats.nodes, self.stats.leaves, self.elapsed
        )?;
        if let Some(stop) = self.stop {
            write!(f, " ({stop})")?;
        }
        Ok(())
    }
}

/// Units of every good an allocation uses, by family and day slot
pub fn consumption(allocation: &AllocationTable) -> [[u8; DAYS]; FAMILIES] {
    let mut used = [[0u8; DAYS]; FAMILIES];
    let slot = |day: u8, family: Family| {
        (day as usize)
            .checked_sub(family.first_day())
            .filter(|&slot| slot < DAYS)
    };

    for client in allocation.iter().filter(|client| client.is_travelling()) {
        if let Some(day) = slot(client.in_day, Family::InFlight) {
            used[Family::InFlight.index()][day] += 1;
        }
        if let Some(day) = slot(client.out_day, Family::OutFlight) {
            used[Family::OutFlight.index()][day] += 1;
        }
        let hotel = Family::hotel(client.good_hotel);
        for night in client.in_day..client.out_day {
            if let Some(day) = slot(night, hotel) {
                used[hotel.index()][day] += 1;
            }
        }
        for kind in EventType::ALL {
            if let Some(day) = client.event_day(kind).and_then(|day| slot(day, kind.into())) {
                used[Family::from(kind).index()][day] += 1;
            }
        }
    }
    used
}

/// Lists, for every auction the allocation touches or the agent holds goods
/// in, how many units are used, owned and still to buy
pub fn purchase_plan(input: &SolveInput, allocation: &AllocationTable) -> Vec<Purchase> {
    let used = consumption(allocation);
    AuctionId::all()
        .filter_map(|auction| {
            let consumed = used[auction.family.index()][auction.day];
            let owned = input.ownership.units(auction.family, auction.day);
            if consumed == 0 && owned == 0 {
                return None;
            }
            Some(Purchase {
                auction,
                consumed,
                owned,
                to_buy: consumed.saturating_sub(owned),
                cost: input.prices[auction.index()].cost(consumed as usize).into(),
            })
        })
        .collect()
}
