//! PMI removal timeline for each low-down-payment purchase
//!
//! Usage: cargo run --bin pmi_timeline [years]

use anyhow::{Context, Result};
use rent_vs_buy::projection::pmi_timeline;
use rent_vs_buy::scenario::presets;
use rent_vs_buy::Assumptions;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let years: u32 = match env::args().nth(1) {
        Some(arg) => arg.parse().with_context(|| format!("invalid year count '{}'", arg))?,
        None => 15,
    };

    let assumptions = Assumptions::bay_area_defaults();
    let scenarios = presets::down_payment_ladder().context("building scenarios")?;

    println!(
        "PMI removal at 20% equity of purchase price, {:.1}% appreciation",
        assumptions.market.home_appreciation * 100.0
    );

    for scenario in &scenarios {
        let ownership = match scenario.ownership() {
            Some(o) if o.pmi.is_some() => o,
            _ => continue,
        };

        let timeline = pmi_timeline(ownership, &assumptions, years);

        println!("\n{}", "=".repeat(72));
        println!("{}", scenario.name);
        println!("{}", "=".repeat(72));
        println!(
            "{:>4} {:>14} {:>14} {:>14} {:>8} {:>10}",
            "Year", "Home Value", "Balance", "Equity", "Equity%", "PMI Paid"
        );
        for row in &timeline.rows {
            println!(
                "{:>4} {:>14.0} {:>14.0} {:>14.0} {:>7.1}% {:>10.0}",
                row.year,
                row.home_value,
                row.mortgage_balance,
                row.equity,
                row.equity_fraction * 100.0,
                row.pmi_paid
            );
        }

        match timeline.removal_year {
            Some(year) => println!("PMI removed in year {}", year),
            None => println!("PMI still charged after {} years", years),
        }
        println!("Total PMI paid: ${:.0}", timeline.total_pmi);
    }

    Ok(())
}
