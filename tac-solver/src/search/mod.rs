use crate::{PreparedMarket, StopReason, market::Client};
use candidates::{EventPlan, STAY_COUNT, STAYS, Stay};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tac_core::{
    models::{
        ATTENDANCE_UTILITY, AllocationTable, CLIENTS, ClientAllocation, DAYS, EventType, FAMILIES,
        Family, TRAVEL_PENALTY,
    },
    ports::{Incumbent, Verdict},
};

mod candidates;

pub(crate) use candidates::EventPlans;

/// The deadline is only looked at every this many nodes
const CLOCK_INTERVAL: u64 = 4096;

/// Receives every strictly better complete allocation found by the search.
pub(crate) trait Reporter {
    fn improved(&mut self, incumbent: &Incumbent) -> Verdict;
}

/// The ways a search may be told to stop early
pub(crate) struct Limits<'a> {
    pub cancel: &'a AtomicBool,
    pub deadline: Option<Instant>,
}

/// Counters kept by the search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes of the search tree that were entered
    pub nodes: u64,
    /// Complete allocations that were scored exactly
    pub leaves: u64,
}

pub(crate) struct Outcome {
    pub stop: Option<StopReason>,
    pub stats: SearchStats,
}

/// Units of every good claimed by the partial allocation, by family and day
#[derive(Clone, Copy, Debug, Default)]
struct Usage([[u8; DAYS]; FAMILIES]);

impl Usage {
    fn held(&self, family: Family, day: usize) -> u8 {
        self.0[family.index()][day]
    }

    fn claim(&mut self, family: Family, day: usize) {
        self.0[family.index()][day] += 1;
    }

    fn release(&mut self, family: Family, day: usize) {
        self.0[family.index()][day] -= 1;
    }

    fn claim_stay(&mut self, stay: &Stay) {
        self.claim(Family::InFlight, stay.arrival);
        self.claim(Family::OutFlight, stay.last_night);
        for night in stay.nights() {
            self.claim(Family::hotel(stay.good_hotel), night);
        }
    }

    fn release_stay(&mut self, stay: &Stay) {
        self.release(Family::InFlight, stay.arrival);
        self.release(Family::OutFlight, stay.last_night);
        for night in stay.nights() {
            self.release(Family::hotel(stay.good_hotel), night);
        }
    }

    fn events(plan: &EventPlan) -> impl Iterator<Item = (Family, usize)> + '_ {
        EventType::ALL
            .into_iter()
            .zip(plan)
            .filter_map(|(kind, day)| day.map(|day| (Family::from(kind), day as usize)))
    }
}

/// A depth-first branch and bound over the allocation of the eight clients.
///
/// The tree has 16 levels. The first eight choose a stay (or no trip) for
/// each client in exploration order, the next eight choose the clients'
/// entertainment, and the leaf scores the complete allocation exactly. The
/// score carried down the tree starts from the best case of every client and
/// only ever decreases, so any branch whose score no longer beats the
/// incumbent is dropped.
///
/// Forgone events are charged with a heuristic that can underestimate the
/// loss, which means the search is not guaranteed to be exhaustive. Leaves
/// are always rescored exactly, so a reported score is never overstated.
pub(crate) struct Search<'a, R: Reporter> {
    market: &'a PreparedMarket,
    plans: &'a EventPlans,
    reporter: &'a mut R,
    limits: Limits<'a>,
    started: Instant,

    bound: i64,
    usage: Usage,
    stays: [Option<Stay>; CLIENTS],
    events: [EventPlan; CLIENTS],

    stop: Option<StopReason>,
    stats: SearchStats,
}

impl<'a, R: Reporter> Search<'a, R> {
    pub fn new(
        market: &'a PreparedMarket,
        plans: &'a EventPlans,
        reporter: &'a mut R,
        limits: Limits<'a>,
    ) -> Self {
        Self {
            market,
            plans,
            reporter,
            limits,
            started: Instant::now(),
            bound: 0,
            usage: Usage::default(),
            stays: [None; CLIENTS],
            events: [[None; 3]; CLIENTS],
            stop: None,
            stats: SearchStats::default(),
        }
    }

    /// Explores the tree from the root until it is exhausted or stopped
    pub fn run(mut self) -> Outcome {
        let start = self.market.start_score;
        self.descend(0, start);

        // a cancel that lands after the last node still counts
        if self.stop.is_none() && self.limits.cancel.load(Ordering::Acquire) {
            self.stop = Some(StopReason::Cancelled);
        }

        Outcome {
            stop: self.stop,
            stats: self.stats,
        }
    }

    fn descend(&mut self, position: usize, score: i64) {
        self.stats.nodes += 1;
        if self.should_stop() {
            return;
        }

        if position < CLIENTS {
            self.assign_stay(position, score);
        } else if position < 2 * CLIENTS {
            self.assign_events(position, score);
        } else {
            self.evaluate_leaf(score);
        }
    }

    fn should_stop(&mut self) -> bool {
        if self.stop.is_some() {
            return true;
        }
        if self.limits.cancel.load(Ordering::Acquire) {
            self.stop = Some(StopReason::Cancelled);
        } else if let Some(deadline) = self.limits.deadline {
            if self.stats.nodes % CLOCK_INTERVAL == 1 && Instant::now() >= deadline {
                self.stop = Some(StopReason::TimedOut);
            }
        }
        self.stop.is_some()
    }

    #[inline]
    fn delta(&self, family: Family, day: usize) -> i64 {
        self.market
            .delta(family.auction(day), self.usage.held(family, day))
    }

    /// How much the optimistic score drops when `client` takes `stay`
    fn stay_cost(&self, client: &Client, stay: &Stay) -> i64 {
        let penalty = i64::from(TRAVEL_PENALTY)
            * (stay.arrival.abs_diff(client.arrival) + stay.last_night.abs_diff(client.departure))
                as i64;
        let flights =
            self.delta(Family::InFlight, stay.arrival) + self.delta(Family::OutFlight, stay.last_night);
        let hotel: i64 = stay
            .nights()
            .map(|night| self.delta(Family::hotel(stay.good_hotel), night))
            .sum();
        let forgone_bonus = if stay.good_hotel {
            0
        } else {
            i64::from(client.preferences.hotel_value)
        };

        penalty + flights + hotel + forgone_bonus - client.best_case[stay.length()]
    }

    fn assign_stay(&mut self, position: usize, score: i64) {
        let market = self.market;
        let client = &market.clients[position];

        let costs: [i64; STAY_COUNT] = std::array::from_fn(|k| self.stay_cost(client, &STAYS[k]));
        let mut order: [usize; STAY_COUNT] = std::array::from_fn(|k| k);
        // stable, so equal costs keep their generation order
        order.sort_by_key(|&k| costs[k]);

        for k in order {
            // the remaining candidates are worse than staying home
            if costs[k] > 0 {
                break;
            }
            let next = score - costs[k] - client.full_best_case();
            if next > self.bound {
                let stay = STAYS[k];
                self.usage.claim_stay(&stay);
                self.stays[position] = Some(stay);
                self.descend(position + 1, next);
                self.stays[position] = None;
                self.usage.release_stay(&stay);
            }
            if self.stop.is_some() {
                return;
            }
        }

        let next = score - client.full_best_case();
        if next > self.bound {
            self.descend(position + 1, next);
        }
    }

    fn assign_events(&mut self, position: usize, score: i64) {
        let slot = position - CLIENTS;
        let Some(stay) = self.stays[slot] else {
            if score > self.bound {
                self.descend(position + 1, score);
            }
            return;
        };

        let market = self.market;
        let plans = self.plans;
        let client = &market.clients[slot];
        let threshold = client.forgo_threshold[stay.length()];

        'plans: for plan in plans.window(&stay) {
            let mut next = score;
            for (kind, day) in EventType::ALL.into_iter().zip(plan) {
                let value = i64::from(client.event_values[kind.index()]);
                match day {
                    Some(day) => {
                        let delta = self.delta(kind.into(), *day as usize);
                        // an unaffordable ticket is the same plan as no ticket
                        if delta >= value {
                            continue 'plans;
                        }
                        next -= delta;
                    }
                    None if value >= threshold => next -= value,
                    None => {}
                }
                if next <= self.bound {
                    continue 'plans;
                }
            }

            for (family, day) in Usage::events(plan) {
                self.usage.claim(family, day);
            }
            self.events[slot] = *plan;
            self.descend(position + 1, next);
            self.events[slot] = [None; 3];
            for (family, day) in Usage::events(plan) {
                self.usage.release(family, day);
            }

            if self.stop.is_some() {
                return;
            }
        }
    }

    fn evaluate_leaf(&mut self, estimate: i64) {
        self.stats.leaves += 1;

        let mut utility = 0;
        for ((client, stay), plan) in self.market.clients.iter().zip(&self.stays).zip(&self.events) {
            let Some(stay) = stay else { continue };
            let preferences = &client.preferences;
            let penalty = stay.arrival.abs_diff(client.arrival) + stay.last_night.abs_diff(client.departure);

            utility += i64::from(ATTENDANCE_UTILITY) - i64::from(TRAVEL_PENALTY) * penalty as i64;
            if stay.good_hotel {
                utility += i64::from(preferences.hotel_value);
            }
            for (kind, day) in EventType::ALL.into_iter().zip(plan) {
                if day.is_some() {
                    utility += i64::from(preferences.event_value(kind));
                }
            }
        }

        let cost: i64 = self
            .market
            .prices
            .iter()
            .enumerate()
            .map(|(auction, curve)| {
                let family = Family::ALL[auction / DAYS];
                let held = self.usage.held(family, auction % DAYS);
                i64::from(curve.cost(held as usize))
            })
            .sum();

        let score = utility - cost;
        if score <= self.bound {
            return;
        }
        self.bound = score;

        let incumbent = Incumbent {
            score,
            utility,
            estimate,
            elapsed: self.started.elapsed(),
            allocation: self.allocation(),
        };
        if !self.reporter.improved(&incumbent).is_continue() {
            self.stop = Some(StopReason::Stopped);
        }
    }

    /// The current assignment, in the caller's client order
    fn allocation(&self) -> AllocationTable {
        let mut table = AllocationTable::HOME;
        for ((client, stay), plan) in self.market.clients.iter().zip(&self.stays).zip(&self.events) {
            let Some(stay) = stay else { continue };
            table.0[client.index] = ClientAllocation {
                in_day: stay.arrival as u8 + 1,
                out_day: stay.last_night as u8 + 2,
                good_hotel: stay.good_hotel,
                event_days: plan.map(|day| day.map_or(0, |day| day + 1)),
            };
        }
        table
    }
}
