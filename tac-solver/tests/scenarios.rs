use rstest::*;
use std::time::Duration;
use tac_core::{
    models::{AllocationTable, ClientAllocation, Family, SolveInput},
    ports::{Incumbent, PriceSolver, Verdict},
};
use tac_solver::{PriceOptimizer, SolverSettings, StopReason, Supply, consumption};

mod common;
use common::*;

/// Collects every incumbent reported during a solve
fn observe(
    optimizer: &PriceOptimizer,
    input: &SolveInput,
) -> (tac_solver::Solution, Vec<Incumbent>) {
    let mut seen = Vec::new();
    let mut listener = |incumbent: &Incumbent| {
        seen.push(*incumbent);
        Verdict::Continue
    };
    let solution = optimizer.solve_with(&mut listener, input).unwrap();
    (solution, seen)
}

#[rstest]
fn lone_traveller_takes_the_cheap_hotel(scenario: SolveInput) {
    let optimizer = PriceOptimizer::default();
    let solution = optimizer.solve(&scenario).unwrap();

    assert!(solution.completed);
    assert_eq!(solution.score, 600);
    assert_eq!(solution.utility, 1000);

    let mut expected = AllocationTable::HOME;
    expected.0[0] = ClientAllocation::from([1, 3, 0, 0, 0, 0]);
    assert_eq!(solution.allocation, expected);
    assert_eq!(optimizer.latest_allocation(), expected);
    assert_eq!(optimizer.best_score(), 600);
    assert!(optimizer.elapsed().is_some());
}

#[rstest]
fn contested_ticket_goes_to_the_keenest_client(two_clients: SolveInput) {
    let solution = PriceOptimizer::default().solve(&two_clients).unwrap();

    assert!(solution.completed);
    assert_eq!(solution.score, 1830);
    assert_eq!(solution.utility, 2180);
    assert_eq!(solution.allocation[0].row(), [1, 3, 1, 1, 0, 0]);
    assert_eq!(solution.allocation[1].row(), [1, 3, 0, 0, 0, 0]);
    assert_eq!(solution.allocation.travellers(), 2);
}

#[rstest]
#[case::one_client(scenario())]
#[case::two_clients(two_clients())]
fn leaf_score_matches_the_running_estimate(#[case] input: SolveInput) {
    let (solution, seen) = observe(&PriceOptimizer::default(), &input);

    let last = seen.last().unwrap();
    assert_eq!(last.score, solution.score);
    assert_eq!(last.estimate, last.score);
    assert_eq!(exact_score(&input, &solution.allocation), solution.score);
}

#[rstest]
fn nobody_travels_when_nothing_is_for_sale(stranded: SolveInput) {
    let (solution, seen) = observe(&PriceOptimizer::default(), &stranded);

    assert!(seen.is_empty());
    assert!(solution.completed);
    assert_eq!(solution.score, 0);
    assert_eq!(solution.allocation, AllocationTable::HOME);
    assert!(solution.purchases.is_empty());
}

#[rstest]
fn owned_goods_reach_the_best_case(free_market: SolveInput) {
    let solution = PriceOptimizer::default().solve(&free_market).unwrap();

    let best_case: i64 = free_market
        .preferences
        .iter()
        .map(|p| 1000 + i64::from(p.hotel_value) + p.event_values.iter().map(|&v| i64::from(v)).sum::<i64>())
        .sum();

    assert!(solution.completed);
    assert_eq!(solution.score, best_case);
    assert_eq!(solution.allocation.travellers(), 8);
    for (client, preferences) in solution.allocation.iter().zip(&free_market.preferences) {
        assert_eq!(i32::from(client.in_day), preferences.arrival);
        assert_eq!(i32::from(client.out_day), preferences.departure);
        assert!(client.good_hotel);
        assert!(client.event_days.iter().all(|&day| day != 0));
    }
    assert!(solution.purchases.iter().all(|purchase| purchase.to_buy == 0));
    assert_feasible(&solution.allocation);
}

#[rstest]
#[case::one_client(scenario())]
#[case::two_clients(two_clients())]
#[case::free_market(free_market())]
fn solving_twice_gives_the_same_answer(#[case] input: SolveInput) {
    let optimizer = PriceOptimizer::default();
    let first = optimizer.solve(&input).unwrap();
    let second = optimizer.solve(&input).unwrap();

    assert_eq!(first.allocation, second.allocation);
    assert_eq!(first.score, second.score);
    assert_eq!(first.stats, second.stats);
}

#[rstest]
fn incumbents_strictly_improve(sample_game: SolveInput) {
    let optimizer = PriceOptimizer::new(SolverSettings::with_time_limit(Duration::from_secs(2)));
    let (solution, seen) = observe(&optimizer, &sample_game);

    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|pair| pair[0].score < pair[1].score));
    assert!(seen.windows(2).all(|pair| pair[0].elapsed <= pair[1].elapsed));
    assert_eq!(seen.last().map(|best| best.score), Some(solution.score));
    assert!(solution.score > 0);

    assert_feasible(&solution.allocation);
    assert_eq!(exact_score(&sample_game, &solution.allocation), solution.score);
    for incumbent in &seen {
        assert_feasible(&incumbent.allocation);
        assert_eq!(exact_score(&sample_game, &incumbent.allocation), incumbent.score);
    }
}

#[rstest]
fn zero_time_limit_stops_at_the_root(sample_game: SolveInput) {
    let optimizer = PriceOptimizer::new(SolverSettings::with_time_limit(Default::default()));
    let solution = optimizer.solve(&sample_game).unwrap();

    assert!(!solution.completed);
    assert_eq!(solution.stop, Some(StopReason::TimedOut));
    assert_eq!(solution.score, 0);
    assert_eq!(solution.allocation, AllocationTable::HOME);
    assert_eq!(solution.stats.nodes, 1);
}

#[rstest]
fn target_score_ends_the_search(two_clients: SolveInput) {
    let optimizer = PriceOptimizer::new(SolverSettings {
        target_score: Some(1),
        ..Default::default()
    });
    let (solution, seen) = observe(&optimizer, &two_clients);

    assert_eq!(seen.len(), 1);
    assert!(!solution.completed);
    assert_eq!(solution.stop, Some(StopReason::Stopped));
    assert_eq!(solution.score, seen[0].score);
}

#[rstest]
fn flat_prices_match_the_best_trip_of_every_client(
    #[values(1, 2, 3, 4, 5, 6, 7, 8, 9, 10)] seed: u64,
) {
    let input = linear_market(seed);
    let solution = PriceOptimizer::default().solve(&input).unwrap();

    assert!(solution.completed);
    assert_eq!(solution.score, best_trip_per_client(&input));
    assert_eq!(exact_score(&input, &solution.allocation), solution.score);
    assert_feasible(&solution.allocation);
}

#[rstest]
fn scarce_goods_match_every_pair_of_trips(
    #[values(1, 2, 3, 4, 5, 6, 7, 8, 9, 10)] seed: u64,
) {
    let input = scarce_market(seed);
    let solution = PriceOptimizer::default().solve(&input).unwrap();

    assert!(solution.completed);
    assert!(solution.allocation.travellers() <= 2);
    assert_eq!(solution.score, best_pair_of_trips(&input));
    assert_eq!(exact_score(&input, &solution.allocation), solution.score);
}

fn owned_only() -> PriceOptimizer {
    PriceOptimizer::new(SolverSettings {
        supply: Supply::Owned,
        ..Default::default()
    })
}

#[rstest]
fn owned_goods_ignore_the_market(mut two_clients: SolveInput) {
    let mut own = [[0; 4]; 7];
    own[Family::InFlight.index()][0] = 1;
    own[Family::OutFlight.index()][1] = 1;
    own[Family::CheapHotel.index()] = [1, 1, 0, 0];
    own[Family::Wrestling.index()][0] = 1;
    two_clients.ownership = own.into();

    let solution = owned_only().solve(&two_clients).unwrap();

    // one trip is held, so only the keener client goes, with the ticket
    assert!(solution.completed);
    assert_eq!(solution.score, 1100);
    assert_eq!(solution.utility, 1100);
    assert_eq!(solution.allocation[0].row(), [1, 3, 0, 1, 0, 0]);
    assert_eq!(solution.allocation.travellers(), 1);
    assert!(solution.purchases.iter().all(|purchase| purchase.to_buy == 0 && purchase.cost == 0));

    // the market would have sent both
    let market = PriceOptimizer::default().solve(&two_clients).unwrap();
    assert_eq!(market.score, 1830);
}

#[rstest]
fn owned_goods_bound_the_sample_game(sample_game: SolveInput) {
    let optimizer = PriceOptimizer::new(SolverSettings {
        time_limit: Some(Duration::from_secs(2)),
        supply: Supply::Owned,
        ..Default::default()
    });
    let solution = optimizer.solve(&sample_game).unwrap();

    assert!(solution.score > 0);
    assert_eq!(solution.score, solution.utility);
    assert_feasible(&solution.allocation);

    let used = consumption(&solution.allocation);
    for family in Family::ALL {
        for day in 0..4 {
            assert!(used[family.index()][day] <= sample_game.ownership.units(family, day));
        }
    }
}

#[rstest]
#[case::flat(linear_market(3))]
#[case::scarce(scarce_market(3))]
fn nothing_owned_means_nobody_travels(#[case] input: SolveInput) {
    let solution = owned_only().solve(&input).unwrap();

    assert!(solution.completed);
    assert_eq!(solution.score, 0);
    assert_eq!(solution.allocation, AllocationTable::HOME);
}
