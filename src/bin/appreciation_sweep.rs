//! Final net worth across a range of home appreciation rates
//!
//! Usage: cargo run --bin appreciation_sweep [scenarios.csv]

use anyhow::{Context, Result};
use rent_vs_buy::scenario::{load_scenarios, presets};
use rent_vs_buy::{ProjectionConfig, ScenarioRunner, SweepParameter};
use std::env;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let scenarios = match env::args().nth(1) {
        Some(path) => load_scenarios(&path).with_context(|| format!("loading scenarios from {}", path))?,
        None => presets::rent_vs_buy().context("building scenarios")?,
    };

    let runner = ScenarioRunner::new();
    let values: Vec<f64> = (0..=12).map(|i| -0.02 + 0.005 * i as f64).collect();

    let start = Instant::now();
    let points = runner.sweep(&scenarios, ProjectionConfig::default(), SweepParameter::HomeAppreciation, &values)?;
    println!("Sweep complete in {:?}\n", start.elapsed());

    print!("{:>12}", "Appreciation");
    for scenario in &scenarios {
        print!(" {:>16}", scenario.name);
    }
    println!(" {:>16}", "Winner");
    println!("{}", "-".repeat(29 + 17 * scenarios.len()));

    for point in &points {
        print!("{:>11.1}%", point.value * 100.0);
        for summary in &point.summary.scenarios {
            print!(" {:>16.0}", summary.final_net_worth);
        }
        println!(" {:>16}", point.summary.winner.as_deref().unwrap_or("-"));
    }

    Ok(())
}
