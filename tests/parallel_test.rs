use mcsim::math::{gaussian_integral, normal_cdf, normal_probability};

#[cfg(feature = "parallel")]
use mcsim::experiments::{BirthdayConfig, CircleInSquare, MontyHall, OptionConfig};
#[cfg(feature = "parallel")]
use mcsim::mc::MonteCarloEngine;

#[test]
fn normal_cdf_is_symmetric_and_monotone() {
    let mut previous = 0.0;
    for i in -60..=60 {
        let x = f64::from(i) / 10.0;
        let p = normal_cdf(x);
        assert!(p >= previous, "cdf decreased at x={x}");
        assert!((p + normal_cdf(-x) - 1.0).abs() <= 1.0e-10, "x={x}");
        previous = p;
    }
}

#[test]
fn normal_probability_matches_sigma_rule() {
    let sigma_rule = [
        (1.0, 0.682_689_492_137_085_9),
        (2.0, 0.954_499_736_103_641_6),
        (3.0, 0.997_300_203_936_739_8),
    ];
    for (k, expected) in sigma_rule {
        let got = normal_probability(-k, k);
        assert!((got - expected).abs() <= 1.0e-10, "k={k} got={got} expected={expected}");
    }
    let sqrt_pi = std::f64::consts::PI.sqrt();
    assert!((gaussian_integral(-20.0, 20.0) - sqrt_pi).abs() <= 1.0e-10);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_driver_is_deterministic_for_fixed_seed() {
    let engine = MonteCarloEngine::new(17);
    let experiment = BirthdayConfig::default().experiment();
    let a = engine.run_parallel(&experiment, 100_003).unwrap();
    let b = engine.run_parallel(&experiment, 100_003).unwrap();
    assert_eq!(a.value.to_bits(), b.value.to_bits());
    assert_eq!(a.trials, 100_003);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_pi_matches_sequential_within_tolerance() {
    let engine = MonteCarloEngine::new(20_000);
    let seq = engine.run(&CircleInSquare, 1_000_000).unwrap();
    let par = engine.run_parallel(&CircleInSquare, 1_000_000).unwrap();
    assert!((seq.value - par.value).abs() < 0.015, "seq={} par={}", seq.value, par.value);
    assert!((par.value - std::f64::consts::PI).abs() < 0.01);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_option_and_monty_hall_converge() {
    let engine = MonteCarloEngine::new(3).with_streams(16);
    let option = OptionConfig::default().experiment();
    let est = engine.run_parallel(&option, 200_000).unwrap();
    let reference = mcsim::core::Experiment::reference(&option).unwrap();
    assert!((est.value - reference).abs() < 5.0 * est.std_error);

    let monty = engine.run_parallel(&MontyHall::default(), 300_000).unwrap();
    assert!((monty.value - 2.0 / 3.0).abs() < 0.005);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_rejects_zero_trials() {
    let engine = MonteCarloEngine::new(1);
    assert!(engine.run_parallel(&CircleInSquare, 0).is_err());
}
