//! Command-line entry point for the Monte Carlo experiments.
//!
//! ```text
//! mcsim <experiment> [--config FILE] [--trials N] [--seed S] [--rng KIND]
//!       [--json] [--parallel] [--samples FILE] [--sample-count N]
//! ```
//!
//! Reports go to stdout; logs go to stderr and are filtered by `RUST_LOG`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use mcsim::config::SimulationConfig;
use mcsim::core::Experiment;
use mcsim::experiments::CircleInSquare;
use mcsim::math::RngKind;
use mcsim::mc::MonteCarloEngine;
use mcsim::pricing::european::{black_scholes_mc_integrated, closed_form_price};
use mcsim::report::{Report, SampleSet, to_json_pretty};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const EXPERIMENTS: [&str; 7] = [
    "birthday",
    "option",
    "option-integrated",
    "euler",
    "pi",
    "monty-hall",
    "integration",
];

const USAGE: &str = "usage: mcsim <birthday|option|option-integrated|euler|pi|monty-hall|integration|all> \
[--config FILE] [--trials N] [--seed S] [--rng KIND] [--json] [--parallel] \
[--samples FILE] [--sample-count N]";

#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    experiment: String,
    config: Option<PathBuf>,
    trials: Option<usize>,
    seed: Option<u64>,
    rng: Option<RngKind>,
    json: bool,
    parallel: bool,
    samples: Option<PathBuf>,
    sample_count: usize,
}

fn parse_value<T>(flag: &str, value: Option<String>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = value.ok_or_else(|| anyhow!("{flag} expects a value"))?;
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {flag} value `{value}`: {err}"))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut cli = CliArgs {
        experiment: String::new(),
        config: None,
        trials: None,
        seed: None,
        rng: None,
        json: false,
        parallel: false,
        samples: None,
        sample_count: 1_000,
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };
        let mut value = || inline.clone().or_else(|| args.next());
        match flag.as_str() {
            "--config" => cli.config = Some(parse_value(&flag, value())?),
            "--trials" => cli.trials = Some(parse_value(&flag, value())?),
            "--seed" => cli.seed = Some(parse_value(&flag, value())?),
            "--rng" => cli.rng = Some(parse_value(&flag, value())?),
            "--samples" => cli.samples = Some(parse_value(&flag, value())?),
            "--sample-count" => cli.sample_count = parse_value(&flag, value())?,
            "--json" => cli.json = true,
            "--parallel" => cli.parallel = true,
            "-h" | "--help" => bail!("{USAGE}"),
            other if other.starts_with('-') => bail!("unknown flag `{other}`\n{USAGE}"),
            _ if cli.experiment.is_empty() => cli.experiment = arg,
            _ => bail!("unexpected argument `{arg}`\n{USAGE}"),
        }
    }

    if cli.experiment.is_empty() {
        bail!("missing experiment\n{USAGE}");
    }
    if cli.experiment != "all" && !EXPERIMENTS.contains(&cli.experiment.as_str()) {
        bail!("unknown experiment `{}`\n{USAGE}", cli.experiment);
    }
    if cli.samples.is_some() && cli.experiment == "all" {
        bail!("--samples needs a single experiment");
    }
    if cli.parallel && cli.experiment == "option-integrated" {
        bail!("--parallel is not supported for option-integrated");
    }
    if cli.parallel && !cfg!(feature = "parallel") {
        bail!("--parallel requires building with `--features parallel`");
    }
    Ok(cli)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mcsim=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn estimate<E: Experiment>(
    engine: &MonteCarloEngine,
    experiment: &E,
    trials: usize,
    parallel: bool,
) -> Result<Report> {
    #[cfg(feature = "parallel")]
    let estimate = if parallel {
        engine.run_parallel(experiment, trials)?
    } else {
        engine.run(experiment, trials)?
    };
    #[cfg(not(feature = "parallel"))]
    let estimate = {
        let _ = parallel;
        engine.run(experiment, trials)?
    };
    Ok(Report::new(experiment.name(), estimate, experiment.reference())?)
}

fn run_experiment(
    name: &str,
    config: &SimulationConfig,
    engine: &MonteCarloEngine,
    parallel: bool,
) -> Result<Report> {
    let started = Instant::now();
    let report = match name {
        "birthday" => estimate(
            engine,
            &config.birthday.experiment(),
            config.birthday.trials,
            parallel,
        ),
        "option" => estimate(engine, &config.option.experiment(), config.option.trials, parallel),
        "option-integrated" => {
            if parallel {
                warn!(experiment = name, "integrated pricer runs sequentially");
            }
            let params = config.option.params();
            let est = black_scholes_mc_integrated(
                &params,
                config.option.option_type,
                config.option.integration_points,
                config.option.lower_bound,
                engine,
            )?;
            let reference = closed_form_price(&params, config.option.option_type);
            Ok(Report::new(name, est, Some(reference))?)
        }
        "euler" => estimate(engine, &config.euler.experiment(), config.euler.trials, parallel),
        "pi" => estimate(engine, &CircleInSquare, config.pi.trials, parallel),
        "monty-hall" => estimate(
            engine,
            &config.monty_hall.experiment(),
            config.monty_hall.trials,
            parallel,
        ),
        "integration" => estimate(
            engine,
            &config.integration.experiment(),
            config.integration.trials,
            parallel,
        ),
        other => Err(anyhow!("unknown experiment `{other}`")),
    }
    .with_context(|| format!("experiment `{name}` failed"))?;

    info!(
        experiment = name,
        trials = report.trials,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "experiment finished"
    );
    Ok(report)
}

fn collect_samples(
    name: &str,
    config: &SimulationConfig,
    engine: &MonteCarloEngine,
    n: usize,
) -> Result<SampleSet> {
    let set = match name {
        "birthday" => SampleSet::reduced(&config.birthday.experiment(), engine, n),
        "option" | "option-integrated" => {
            SampleSet::option_paths(&config.option.experiment(), engine, n)
        }
        "euler" => SampleSet::reduced(&config.euler.experiment(), engine, n),
        "pi" => SampleSet::pi_points(engine, n),
        "monty-hall" => SampleSet::reduced(&config.monty_hall.experiment(), engine, n),
        "integration" => SampleSet::reduced(&config.integration.experiment(), engine, n),
        other => return Err(anyhow!("no samples for `{other}`")),
    }?;
    Ok(set)
}

/// Runs the selected experiments and returns the rendered stdout payload.
fn run(cli: &CliArgs) -> Result<String> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(trials) = cli.trials {
        config.set_trials(trials);
    }
    if let Some(seed) = cli.seed {
        config.run.seed = Some(seed);
    }
    if let Some(rng) = cli.rng {
        config.run.rng = rng;
    }
    config.validate()?;

    let engine = config.engine();
    info!(
        seed = ?config.run.seed,
        rng = engine.rng_kind.as_str(),
        parallel = cli.parallel,
        "configured engine"
    );

    let names: Vec<&str> = if cli.experiment == "all" {
        EXPERIMENTS.to_vec()
    } else {
        vec![cli.experiment.as_str()]
    };
    let reports = names
        .iter()
        .map(|name| run_experiment(name, &config, &engine, cli.parallel))
        .collect::<Result<Vec<_>>>()?;

    let output = if cli.json {
        match reports.as_slice() {
            [report] => to_json_pretty(report)?,
            _ => to_json_pretty(&reports)?,
        }
    } else {
        reports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    if let Some(path) = &cli.samples {
        let set = collect_samples(&cli.experiment, &config, &engine, cli.sample_count)?;
        set.write_json(path)
            .with_context(|| format!("writing samples to {}", path.display()))?;
        info!(path = %path.display(), samples = set.len(), "samples written");
    }
    Ok(output)
}

fn main() {
    init_tracing();
    match parse_args(std::env::args().skip(1)).and_then(|cli| run(&cli)) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("mcsim failed: {err:#}");
            std::process::exit(1);
        }
    }
}
