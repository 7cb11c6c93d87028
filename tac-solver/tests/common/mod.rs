#![allow(dead_code)]
use rand::{Rng, SeedableRng, rngs::StdRng};
use rstest::*;
use tac_core::models::{
    AllocationTable, CLIENTS, ClientAllocation, EventType, Family, Preferences, PriceCurve, SUP,
    SolveInput,
};
use tac_solver::consumption;

/// A curve that sells `units` units at `step` each and nothing beyond
pub fn capped(step: i32, units: usize) -> PriceCurve {
    let mut curve = PriceCurve::linear(step);
    for point in curve.0.iter_mut().skip(units + 1) {
        *point = SUP;
    }
    curve
}

fn set(input: &mut SolveInput, family: Family, day: usize, curve: PriceCurve) {
    input.prices[family.auction(day)] = curve;
}

/// Clients who would rather arrive on day 4 and leave on day 5
fn bystanders() -> [Preferences; CLIENTS] {
    [Preferences::new(4, 5, 0, [0, 0, 0]); CLIENTS]
}

/// One client wants days 1-3. Only one flight each way can be bought, the
/// good hotel costs more than its bonus and no entertainment is for sale:
/// the client goes in the cheap hotel for a score of 600.
#[fixture]
pub fn scenario() -> SolveInput {
    let mut input = SolveInput::default();
    input.preferences = bystanders();
    input.preferences[0] = Preferences::new(1, 3, 50, [10, 20, 30]);

    set(&mut input, Family::InFlight, 0, capped(100, 1));
    set(&mut input, Family::OutFlight, 1, capped(100, 1));
    for night in 0..2 {
        set(&mut input, Family::GoodHotel, night, PriceCurve::linear(150));
        set(&mut input, Family::CheapHotel, night, PriceCurve::linear(100));
    }
    input
}

/// Two clients want days 1-3 and compete for a single wrestling ticket.
///
/// The first client values the good hotel and the ticket most, so the
/// optimum sends it to the good hotel with the ticket and the second one to
/// the cheap hotel: 970 + 860 = 1830.
#[fixture]
pub fn two_clients() -> SolveInput {
    let mut input = SolveInput::default();
    input.preferences = bystanders();
    input.preferences[0] = Preferences::new(1, 3, 80, [100, 5, 1]);
    input.preferences[1] = Preferences::new(1, 3, 10, [60, 4, 2]);

    set(&mut input, Family::InFlight, 0, capped(50, 2));
    set(&mut input, Family::OutFlight, 1, capped(50, 2));
    for night in 0..2 {
        set(&mut input, Family::GoodHotel, night, PriceCurve::linear(40));
        set(&mut input, Family::CheapHotel, night, PriceCurve::linear(20));
    }
    set(&mut input, Family::Wrestling, 0, capped(30, 1));
    input
}

/// Nothing can be bought at any price
#[fixture]
pub fn stranded() -> SolveInput {
    SolveInput::new(SAMPLE_PREFERENCES, [[0; 4]; 7], [PriceCurve::unavailable().0; 28])
}

/// Every client asks for three nights or more and every good is already owned
#[fixture]
pub fn free_market() -> SolveInput {
    let preferences = [
        [1, 4, 50, 10, 20, 30],
        [1, 5, 120, 80, 30, 55],
        [2, 5, 75, 60, 61, 62],
        [1, 4, 10, 200, 150, 100],
        [2, 5, 90, 5, 15, 25],
        [1, 5, 60, 70, 80, 90],
        [1, 4, 100, 11, 12, 13],
        [2, 5, 140, 42, 43, 44],
    ];
    SolveInput::new(preferences, [[8; 4]; 7], [PriceCurve::owned(8, 100).0; 28])
}

/// Preferences of the sample game, as calendar days
pub const SAMPLE_PREFERENCES: [[i32; 6]; CLIENTS] = [
    [2, 4, 72, 77, 78, 37],
    [3, 4, 55, 193, 180, 111],
    [1, 3, 112, 67, 149, 177],
    [2, 3, 87, 74, 72, 167],
    [3, 4, 110, 68, 193, 148],
    [2, 3, 69, 87, 142, 189],
    [2, 4, 67, 78, 154, 67],
    [1, 4, 140, 141, 3, 23],
];

/// A full game with eight clients and busy markets
#[fixture]
pub fn sample_game() -> SolveInput {
    let own = [
        [2, 4, 2, 0],
        [0, 3, 5, 0],
        [7, 3, 2, 0],
        [9, 3, 3, 0],
        [1, 1, 2, 2],
        [1, 0, 0, 4],
        [1, 1, 4, 0],
    ];
    let linear = PriceCurve::linear(100).0;
    let mut prices = [linear; 28];
    prices[0] = PriceCurve::owned(2, 100).0;
    prices[1] = PriceCurve::owned(4, 100).0;
    prices[2] = PriceCurve::owned(2, 100).0;
    prices[5] = PriceCurve::owned(3, 100).0;
    prices[6] = PriceCurve::owned(5, 100).0;
    prices[10] = PriceCurve::linear(400).0;
    prices[13] = PriceCurve::owned(4, 100).0;
    prices[14] = PriceCurve::owned(4, 100).0;
    prices[18] = PriceCurve::owned(4, 100).0;
    SolveInput::new(SAMPLE_PREFERENCES, own, prices)
}

/// Clients with random travel days and hotel bonuses who care nothing for
/// entertainment
fn indifferent_clients(rng: &mut StdRng) -> [[i32; 6]; CLIENTS] {
    std::array::from_fn(|_| {
        let arrival = rng.random_range(1..=4);
        let departure = rng.random_range(arrival + 1..=5);
        [arrival, departure, rng.random_range(0..=150), 0, 0, 0]
    })
}

/// Random flights and hotels at a flat price per unit, no entertainment
pub fn linear_market(seed: u64) -> SolveInput {
    let mut rng = StdRng::seed_from_u64(seed);
    let preferences = indifferent_clients(&mut rng);
    let mut input = SolveInput::new(preferences, [[0; 4]; 7], [PriceCurve::unavailable().0; 28]);
    for family in [Family::InFlight, Family::OutFlight, Family::GoodHotel, Family::CheapHotel] {
        for day in 0..4 {
            set(&mut input, family, day, PriceCurve::linear(rng.random_range(150..=450)));
        }
    }
    input
}

/// Random hotels in short supply and only two flights into town
pub fn scarce_market(seed: u64) -> SolveInput {
    let mut rng = StdRng::seed_from_u64(seed);
    let preferences = indifferent_clients(&mut rng);
    let mut input = SolveInput::new(preferences, [[0; 4]; 7], [PriceCurve::unavailable().0; 28]);

    let first = rng.random_range(0..4);
    let second = (first + rng.random_range(1..4)) % 4;
    for day in [first, second] {
        set(&mut input, Family::InFlight, day, capped(rng.random_range(20..=300), 1));
    }
    for day in 0..4 {
        set(&mut input, Family::OutFlight, day, PriceCurve::linear(rng.random_range(20..=300)));
        for hotel in [Family::GoodHotel, Family::CheapHotel] {
            let curve = capped(rng.random_range(20..=300), rng.random_range(1..=2));
            set(&mut input, hotel, day, curve);
        }
    }
    input
}

/// Every trip a client can make, in either hotel and without entertainment
pub fn trips() -> impl Iterator<Item = ClientAllocation> {
    (1..=4).flat_map(|in_day| {
        (in_day + 1..=5).flat_map(move |out_day| {
            [0, 1].map(|hotel| ClientAllocation::from([in_day, out_day, hotel, 0, 0, 0]))
        })
    })
}

/// The best score reachable by sending each client on its own best trip.
///
/// Exhaustive when every price is flat, since one client's trip then costs
/// the same whoever else travels.
pub fn best_trip_per_client(input: &SolveInput) -> i64 {
    (0..CLIENTS)
        .map(|client| {
            trips()
                .map(|trip| {
                    let mut table = AllocationTable::HOME;
                    table.0[client] = trip;
                    exact_score(input, &table)
                })
                .fold(0, i64::max)
        })
        .sum()
}

/// The best score of any allocation in which at most two clients travel
pub fn best_pair_of_trips(input: &SolveInput) -> i64 {
    let mut best = 0;
    let mut table = AllocationTable::HOME;
    for first in 0..CLIENTS {
        for trip in trips() {
            table.0[first] = trip;
            best = best.max(exact_score(input, &table));
            for second in first + 1..CLIENTS {
                for other in trips() {
                    table.0[second] = other;
                    best = best.max(exact_score(input, &table));
                }
                table.0[second] = ClientAllocation::HOME;
            }
        }
        table.0[first] = ClientAllocation::HOME;
    }
    best
}

/// Scores an allocation from scratch
pub fn exact_score(input: &SolveInput, allocation: &AllocationTable) -> i64 {
    if allocation.travellers() == 0 {
        return 0;
    }
    let mut utility = 0i64;
    for (client, preferences) in allocation.iter().zip(&input.preferences) {
        if !client.is_travelling() {
            continue;
        }
        let penalty = (i32::from(client.in_day) - preferences.arrival).abs()
            + (i32::from(client.out_day) - preferences.departure).abs();
        utility += 1000 - 100 * i64::from(penalty);
        if client.good_hotel {
            utility += i64::from(preferences.hotel_value);
        }
        for kind in EventType::ALL {
            if client.event_day(kind).is_some() {
                utility += i64::from(preferences.event_value(kind));
            }
        }
    }

    let used = consumption(allocation);
    let cost: i64 = Family::ALL
        .into_iter()
        .flat_map(|family| (0..4).map(move |day| (family, day)))
        .map(|(family, day)| {
            let units = used[family.index()][day] as usize;
            i64::from(input.prices[family.auction(day)].cost(units))
        })
        .sum();
    utility - cost
}

/// Checks that every trip is well formed and every ticket falls inside it
pub fn assert_feasible(allocation: &AllocationTable) {
    for client in allocation.iter() {
        if !client.is_travelling() {
            assert_eq!(client.row(), [0; 6]);
            continue;
        }
        assert!((1..=4).contains(&client.in_day));
        assert!(client.in_day < client.out_day && client.out_day <= 5);

        let days: Vec<u8> = client.event_days.into_iter().filter(|&d| d != 0).collect();
        for (i, day) in days.iter().enumerate() {
            assert!((client.in_day..client.out_day).contains(day));
            assert!(!days[i + 1..].contains(day));
        }
    }
}
