//! Break-even investment return and appreciation for each purchase versus renting
//!
//! Usage: cargo run --bin breakeven [years]

use anyhow::{Context, Result};
use rent_vs_buy::projection::{breakeven_appreciation, breakeven_investment_return, BreakevenSearch};
use rent_vs_buy::scenario::presets;
use rent_vs_buy::{Assumptions, ProjectionConfig, ProjectionEngine};
use std::env;

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "not in range".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let years: u32 = match env::args().nth(1) {
        Some(arg) => arg.parse().with_context(|| format!("invalid year count '{}'", arg))?,
        None => 30,
    };

    let scenarios = presets::down_payment_ladder().context("building scenarios")?;
    let engine = ProjectionEngine::new(
        Assumptions::bay_area_defaults(),
        ProjectionConfig {
            years,
            ..Default::default()
        },
    );

    let return_search = BreakevenSearch::between(0.0, 0.20);
    let appreciation_search = BreakevenSearch::between(-0.05, 0.15);

    println!("Break-even rates versus renting over {} years", years);
    println!("{:<12} {:>20} {:>20}", "Scenario", "Investment Return", "Appreciation");
    println!("{}", "-".repeat(54));

    for scenario in scenarios.iter().filter(|s| s.is_owner()) {
        let investment = breakeven_investment_return(
            &engine,
            &scenarios,
            "Renting",
            &scenario.name,
            years,
            &return_search,
        )?;
        let appreciation =
            breakeven_appreciation(&engine, &scenarios, &scenario.name, "Renting", years, &appreciation_search)?;

        println!(
            "{:<12} {:>20} {:>20}",
            scenario.name,
            format_rate(investment),
            format_rate(appreciation)
        );
    }

    println!("\nRenting wins above the investment return and below the appreciation shown.");
    Ok(())
}
