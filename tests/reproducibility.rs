use mcsim::core::{Estimate, OptionType};
use mcsim::experiments::{
    BirthdayConfig, CircleInSquare, EulerConfig, IntegrationConfig, MontyHall, OptionConfig,
};
use mcsim::math::RngKind;
use mcsim::mc::MonteCarloEngine;
use mcsim::pricing::european::{BlackScholesParams, black_scholes_mc_integrated};

fn assert_bit_identical(a: Estimate, b: Estimate) {
    assert_eq!(a.value.to_bits(), b.value.to_bits());
    assert_eq!(a.std_error.to_bits(), b.std_error.to_bits());
    assert_eq!(a.trials, b.trials);
}

#[test]
fn identical_seed_reproduces_every_experiment() {
    for kind in [RngKind::Xoshiro256PlusPlus, RngKind::Pcg64, RngKind::StdRng] {
        let engine = || MonteCarloEngine::new(1234).with_rng_kind(kind);

        let birthday = BirthdayConfig::default().experiment();
        assert_bit_identical(
            engine().run(&birthday, 5_000).unwrap(),
            engine().run(&birthday, 5_000).unwrap(),
        );
        assert_bit_identical(
            engine().run(&CircleInSquare, 5_000).unwrap(),
            engine().run(&CircleInSquare, 5_000).unwrap(),
        );
        let euler = EulerConfig::default().experiment();
        assert_bit_identical(
            engine().run(&euler, 5_000).unwrap(),
            engine().run(&euler, 5_000).unwrap(),
        );
        assert_bit_identical(
            engine().run(&MontyHall::default(), 5_000).unwrap(),
            engine().run(&MontyHall::default(), 5_000).unwrap(),
        );
        let option = OptionConfig::default().experiment();
        assert_bit_identical(
            engine().run(&option, 2_000).unwrap(),
            engine().run(&option, 2_000).unwrap(),
        );
        let integral = IntegrationConfig::default().experiment();
        assert_bit_identical(
            engine().run(&integral, 5_000).unwrap(),
            engine().run(&integral, 5_000).unwrap(),
        );
    }
}

#[test]
fn integrated_pricer_is_reproducible() {
    let params = BlackScholesParams::default();
    let run = || {
        black_scholes_mc_integrated(
            &params,
            OptionType::Call,
            20_000,
            -20.0,
            &MonteCarloEngine::new(99),
        )
        .unwrap()
    };
    assert_bit_identical(run(), run());
}

#[test]
fn different_seeds_give_different_estimates() {
    let a = MonteCarloEngine::new(1).run(&CircleInSquare, 10_000).unwrap();
    let b = MonteCarloEngine::new(2).run(&CircleInSquare, 10_000).unwrap();
    assert_ne!(a.value.to_bits(), b.value.to_bits());
}

#[test]
fn sampled_paths_repeat_under_fixed_seed() {
    let experiment = OptionConfig::default().experiment();
    let a = MonteCarloEngine::new(5).sample(&experiment, 20).unwrap();
    let b = MonteCarloEngine::new(5).sample(&experiment, 20).unwrap();
    assert_eq!(a, b);
}
