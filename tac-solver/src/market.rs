use tac_core::models::{
    ATTENDANCE_UTILITY, AUCTIONS, CLIENTS, DAYS, MAX_UNITS, Preferences, PriceCurve, SUP,
    SolveInput,
};

/// Exploration rank of each (arrival slot, departure slot) pair, indexed by
/// `arrival * 4 + departure`. Long and rare stays come first because they are
/// the most constrained and prune hardest. Impossible pairs rank first.
const STAY_RANK: [i8; 16] = [
    0,  // 1-2
    4,  // 1-3
    7,  // 1-4
    9,  // 1-5
    -1, // 2-2
    2,  // 2-3
    6,  // 2-4
    8,  // 2-5
    -1, // 3-2
    -1, // 3-3
    3,  // 3-4
    5,  // 3-5
    -1, // 4-2
    -1, // 4-3
    -1, // 4-4
    1,  // 4-5
];

/// A client as the search sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Client {
    /// The client's position in the caller's input
    pub index: usize,
    /// The preferences exactly as supplied
    pub preferences: Preferences,
    /// Preferred arrival slot
    pub arrival: usize,
    /// Preferred last night slot
    pub departure: usize,
    /// Event values, made pairwise distinct
    pub event_values: [i32; 3],
    /// Best-case utility by stay length (number of nights - 1)
    pub best_case: [i64; DAYS],
    /// Forgoing an event only costs its value when the value reaches this
    /// threshold, by stay length
    pub forgo_threshold: [i64; DAYS],
}

impl Client {
    fn new(index: usize, preferences: Preferences) -> Self {
        let event_values = distinct_event_values(preferences.event_values);
        let (best_case, forgo_threshold) = optimistic_scores(preferences.hotel_value, event_values);
        Self {
            index,
            preferences,
            arrival: preferences.arrival_slot(),
            departure: preferences.departure_slot(),
            event_values,
            best_case,
            forgo_threshold,
        }
    }

    /// The utility of the client under free and unlimited travel
    pub fn full_best_case(&self) -> i64 {
        self.best_case[DAYS - 1]
    }
}

/// The market as prepared for one solve: clients in exploration order and
/// marginal prices for every auction.
///
/// Everything here is immutable for the duration of the search.
#[derive(Clone, Debug)]
pub struct PreparedMarket {
    /// Clients in exploration order
    pub clients: [Client; CLIENTS],
    /// The cumulative price curves, as quoted
    pub prices: [PriceCurve; AUCTIONS],
    /// Marginal prices, see [`build_delta_prices`]
    pub deltas: [[i32; MAX_UNITS]; AUCTIONS],
    /// The optimistic score of the empty assignment
    pub start_score: i64,
}

impl PreparedMarket {
    /// Normalizes the clients and derives the marginal price table
    pub fn new(input: &SolveInput) -> Self {
        let order = client_order(&input.preferences);
        let clients = order.map(|index| Client::new(index, input.preferences[index]));
        let deltas = build_delta_prices(&input.prices);

        let start_score = clients.iter().map(Client::full_best_case).sum::<i64>()
            - input
                .prices
                .iter()
                .map(|curve| i64::from(curve.cost(0)))
                .sum::<i64>();

        Self {
            clients,
            prices: input.prices,
            deltas,
            start_score,
        }
    }

    /// The marginal price of one more unit on `auction` when `held` units
    /// are already claimed
    #[inline]
    pub fn delta(&self, auction: usize, held: u8) -> i64 {
        self.deltas[auction]
            .get(held as usize)
            .map_or(SUP.into(), |&delta| delta.into())
    }
}

/// Turns every cumulative price curve into its eight marginal prices
pub fn build_delta_prices(prices: &[PriceCurve; AUCTIONS]) -> [[i32; MAX_UNITS]; AUCTIONS] {
    prices.map(|curve| curve.deltas())
}

/// Breaks ties among a client's event values by nudging values upwards.
///
/// The result is deterministic and pairwise distinct for all but absurd
/// inputs at the edge of the integer range.
pub fn distinct_event_values([mut e1, e2, mut e3]: [i32; 3]) -> [i32; 3] {
    if e1 == e2 {
        e1 = e1.saturating_add(1);
    }
    if e1 == e3 {
        e3 = e3.saturating_add(1);
    }
    if e2 == e3 {
        e3 = e3.saturating_add(1);
        if e1 == e3 {
            e3 = e3.saturating_add(1);
        }
    }
    [e1, e2, e3]
}

/// Computes a client's best-case utility and forgo thresholds by stay length.
///
/// A stay of `n + 1` nights offers room for `n + 1` distinct event days, so
/// its best case counts the `n + 1` most valuable events (all three from
/// three nights on). The threshold for a stay length is the smallest event
/// value included in that best case.
pub fn optimistic_scores(hotel_value: i32, event_values: [i32; 3]) -> ([i64; DAYS], [i64; DAYS]) {
    let mut sorted = event_values.map(i64::from);
    sorted.sort_unstable();
    let [low, mid, high] = sorted;

    let base = i64::from(ATTENDANCE_UTILITY) + i64::from(hotel_value) + high;
    let best_case = [base, base + mid, base + mid + low, base + mid + low];
    let forgo_threshold = [high, mid, low, low];
    (best_case, forgo_threshold)
}

/// Orders clients so that the most constrained stays are explored first.
///
/// The sort is stable: clients of equal rank keep their input order.
pub fn client_order(preferences: &[Preferences; CLIENTS]) -> [usize; CLIENTS] {
    let mut order: [usize; CLIENTS] = std::array::from_fn(|i| i);
    order.sort_by_key(|&i| {
        let client = &preferences[i];
        STAY_RANK[client.arrival_slot() * DAYS + client.departure_slot()]
    });
    order
}
