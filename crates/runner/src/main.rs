//! crashsim - replay a betting strategy against crash-round multipliers
//!
//! Usage:
//!   crashsim [--config config.json] --multipliers rounds.txt [options]
//!   crashsim [--config config.json] --simulate 1000 --seed 42 [options]
//!
//! Options:
//!   --config <path>       JSON StrategyConfig (defaults used when omitted)
//!   --multipliers <path>  text file, one multiplier per line
//!   --simulate <n>        generate n rounds from the seeded crash feed
//!   --seed <u64>          feed seed (default: entropy)
//!   --policy <name>       "staged" (default) or "flat"
//!   --ledger              dump the ledger as JSON lines after the summary

use anyhow::{Context, Result, bail};
use crashsim_core::StrategyConfig;
use crashsim_driver::SimulationDriver;
use crashsim_engine::{FlatBet, StagedMartingale};
use crashsim_feed::parse_manual;
use crashsim_ports::EscalationPolicy;
use crashsim_runner::{CrashFeedSimulator, SimulationRunner};
use std::fs;

struct Args {
    config_path: Option<String>,
    multipliers_path: Option<String>,
    simulate: Option<usize>,
    seed: Option<u64>,
    policy: String,
    dump_ledger: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config_path: None,
        multipliers_path: None,
        simulate: None,
        seed: None,
        policy: "staged".to_string(),
        dump_ledger: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .with_context(|| format!("{flag} requires a value"))
        };
        match flag.as_str() {
            "--config" => args.config_path = Some(value()?),
            "--multipliers" => args.multipliers_path = Some(value()?),
            "--simulate" => args.simulate = Some(value()?.parse()?),
            "--seed" => args.seed = Some(value()?.parse()?),
            "--policy" => args.policy = value()?,
            "--ledger" => args.dump_ledger = true,
            other => bail!("Unknown argument: {other}"),
        }
    }
    if args.multipliers_path.is_some() == args.simulate.is_some() {
        bail!("Provide exactly one of --multipliers or --simulate");
    }
    Ok(args)
}

fn load_config(path: Option<&str>) -> Result<StrategyConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("Failed to parse config {path}"))?
        }
        None => StrategyConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let config = load_config(args.config_path.as_deref())?;

    let policy: Box<dyn EscalationPolicy> = match args.policy.as_str() {
        "staged" => Box::new(StagedMartingale::new()),
        "flat" => Box::new(FlatBet::new()),
        other => bail!("Unknown policy: {other} (expected \"staged\" or \"flat\")"),
    };

    let mut driver = SimulationDriver::new(config, policy)?;

    if let Some(path) = &args.multipliers_path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read multipliers {path}"))?;
        let multipliers = parse_manual(&text);
        if multipliers.is_empty() {
            bail!("No valid multipliers in {path}");
        }
        log::info!("Loaded {} multipliers from {}", multipliers.len(), path);
        driver.append_multipliers(multipliers);
    } else if let Some(rounds) = args.simulate {
        let mut feed = match args.seed {
            Some(seed) => CrashFeedSimulator::with_seed(seed),
            None => CrashFeedSimulator::new(),
        };
        let generated = feed.generate(rounds).to_vec();
        log::info!("Generated {} simulated rounds", generated.len());
        driver.append_multipliers(generated);
    }

    let mut runner = SimulationRunner::new(driver);
    let summary = runner.run_to_completion().await?;

    println!("{summary}");
    if args.dump_ledger {
        for record in runner.driver().ledger() {
            println!("{}", serde_json::to_string(record)?);
        }
    }
    Ok(())
}
