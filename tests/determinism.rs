use checkout_sim::{Dispatch, FixedDraws, Simulation, SimulationConfig, Statistics, UniformSource};
use proptest::prelude::*;

fn config() -> SimulationConfig {
    SimulationConfig::builder()
        .checkouts(2)
        .horizon_secs(1800.0)
        .mean_inter_arrival_secs(40.0)
        .mean_items_per_cart(8.0)
        .build()
        .unwrap()
}

fn traced_run<S: UniformSource>(mut sim: Simulation<S>) -> (Vec<Dispatch>, Statistics) {
    let mut trace = vec![];
    let stats = sim
        .run_observed(|_, dispatch| trace.push(*dispatch))
        .unwrap();
    (trace, stats)
}

#[test]
fn same_seed_same_run() {
    let (trace1, stats1) = traced_run(Simulation::from_seed(config(), Some(2024)));
    let (trace2, stats2) = traced_run(Simulation::from_seed(config(), Some(2024)));

    assert!(!trace1.is_empty());
    assert_eq!(trace1, trace2);
    assert_eq!(stats1, stats2);
}

#[test]
fn different_seeds_differ() {
    let (trace1, _) = traced_run(Simulation::from_seed(config(), Some(1)));
    let (trace2, _) = traced_run(Simulation::from_seed(config(), Some(2)));

    assert_ne!(trace1, trace2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fixed_draws_replay_exactly(draws in prop::collection::vec(0.001f64..0.999, 1..64)) {
        let (trace1, stats1) = traced_run(Simulation::new(config(), FixedDraws::new(draws.clone())));
        let (trace2, stats2) = traced_run(Simulation::new(config(), FixedDraws::new(draws)));

        prop_assert_eq!(trace1, trace2);
        prop_assert_eq!(stats1, stats2);
    }
}
