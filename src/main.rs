//! Rent vs Buy CLI
//!
//! Command-line interface for comparing housing scenarios

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use rent_vs_buy::projection::{
    fund_by_saving, gross_target_for_after_tax, required_income, ProjectionSummary,
    DEFAULT_COMBINED_TAX_RATE, DEFAULT_HOUSING_SHARE,
};
use rent_vs_buy::scenario::{load_scenarios, presets};
use rent_vs_buy::{Assumptions, BaselineStrategy, ProjectionConfig, ProjectionEngine, ProjectionResult, Scenario};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rent-vs-buy")]
#[command(about = "Compare renting against buying over a multi-year horizon")]
#[command(version)]
struct Cli {
    /// Assumption overrides (Parameter,Value CSV)
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a scenario set and print yearly net worth
    Compare {
        /// Built-in scenario set
        #[arg(long, value_enum, default_value = "rent-vs-buy")]
        preset: Preset,

        /// Scenario CSV (overrides --preset)
        #[arg(long)]
        scenarios: Option<PathBuf>,

        /// most-expensive, least-expensive, scenario:<name>, or fixed:<monthly>
        #[arg(short, long, default_value = "most-expensive")]
        baseline: BaselineStrategy,

        /// Projection horizon in years
        #[arg(short, long, default_value = "30")]
        years: u32,

        /// Write one row per scenario-year to this CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print a JSON report instead of the table
        #[arg(long)]
        json: bool,
    },

    /// First-year cost breakdown and the income needed to carry it
    Costs {
        /// Built-in scenario set
        #[arg(long, value_enum, default_value = "rent-vs-buy")]
        preset: Preset,

        /// Scenario CSV (overrides --preset)
        #[arg(long)]
        scenarios: Option<PathBuf>,

        /// Share of take-home pay spent on housing
        #[arg(long, default_value_t = DEFAULT_HOUSING_SHARE)]
        housing_share: f64,

        /// Flat federal, state and payroll rate on gross income
        #[arg(long, default_value_t = DEFAULT_COMBINED_TAX_RATE)]
        income_tax_rate: f64,

        /// Earners splitting the required income
        #[arg(long, default_value = "2")]
        earners: u32,
    },

    /// Savings plan for a purchase funded from investments
    Fund {
        /// Cash needed at closing, after capital gains tax
        #[arg(long, default_value = "56600")]
        needed: f64,

        /// Years of monthly saving
        #[arg(long, default_value = "4")]
        saving_years: u32,

        /// Years held after the target is reached
        #[arg(long, default_value = "1")]
        holding_years: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    RentVsBuy,
    DownPaymentLadder,
    GroundLease,
}

#[derive(Serialize)]
struct CompareReport<'a> {
    generated_at: DateTime<Utc>,
    assumptions: &'a Assumptions,
    summary: ProjectionSummary,
    result: &'a ProjectionResult,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            preset,
            scenarios,
            baseline,
            years,
            csv,
            json,
        } => cmd_compare(
            cli.assumptions.as_deref(),
            preset,
            scenarios.as_deref(),
            baseline,
            years,
            csv.as_deref(),
            json,
        ),
        Commands::Costs {
            preset,
            scenarios,
            housing_share,
            income_tax_rate,
            earners,
        } => cmd_costs(
            cli.assumptions.as_deref(),
            preset,
            scenarios.as_deref(),
            housing_share,
            income_tax_rate,
            earners,
        ),
        Commands::Fund {
            needed,
            saving_years,
            holding_years,
        } => cmd_fund(cli.assumptions.as_deref(), needed, saving_years, holding_years),
    }
}

fn load_assumptions(path: Option<&Path>, preset: Preset) -> Result<Assumptions> {
    match path {
        Some(path) => Assumptions::from_csv_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display())),
        None => Ok(match preset {
            Preset::GroundLease => presets::ground_lease_assumptions(),
            _ => Assumptions::bay_area_defaults(),
        }),
    }
}

fn load_scenario_set(path: Option<&Path>, preset: Preset) -> Result<Vec<Scenario>> {
    if let Some(path) = path {
        return load_scenarios(path).with_context(|| format!("loading scenarios from {}", path.display()));
    }
    let scenarios = match preset {
        Preset::RentVsBuy => presets::rent_vs_buy(),
        Preset::DownPaymentLadder => presets::down_payment_ladder(),
        Preset::GroundLease => presets::ground_lease_vs_traditional(),
    };
    scenarios.context("building preset scenarios")
}

fn cmd_compare(
    assumptions_path: Option<&Path>,
    preset: Preset,
    scenarios_path: Option<&Path>,
    baseline: BaselineStrategy,
    years: u32,
    csv_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let assumptions = load_assumptions(assumptions_path, preset)?;
    let scenarios = load_scenario_set(scenarios_path, preset)?;

    let engine = ProjectionEngine::new(assumptions, ProjectionConfig { years, baseline });
    let result = engine.run(&scenarios).context("running projection")?;

    if let Some(path) = csv_path {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for row in result.export_rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        eprintln!("Full results written to: {}", path.display());
    }

    if json {
        let report = CompareReport {
            generated_at: Utc::now(),
            assumptions: engine.assumptions(),
            summary: result.summary(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_table(&result);
    Ok(())
}

fn print_table(result: &ProjectionResult) {
    println!("Net worth by year (baseline: {})", result.baseline);
    print!("{:>4} {:>12}", "Year", "Baseline/mo");
    for scenario in &result.scenarios {
        print!(" {:>16}", scenario.name);
    }
    println!();
    println!("{}", "-".repeat(17 + 17 * result.scenarios.len()));

    for (i, baseline) in result.baseline_monthly.iter().enumerate() {
        print!("{:>4} {:>12.0}", i + 1, baseline);
        for scenario in &result.scenarios {
            let worth = scenario.rows.get(i).map(|r| r.net_worth).unwrap_or(0.0);
            print!(" {:>16.0}", worth);
        }
        println!();
    }

    let summary = result.summary();
    println!("\nSummary after {} years:", summary.years);
    for s in &summary.scenarios {
        println!(
            "  {:<20} net worth ${:>14.0}  equity ${:>12.0}  tax benefit ${:>10.0}  PMI ${:>8.0}  behind best ${:>12.0}",
            s.name,
            s.final_net_worth,
            s.final_home_equity,
            s.total_tax_benefit,
            s.total_pmi,
            s.shortfall_to_best
        );
        if let Some(after_tax) = s.after_tax_net_worth {
            println!("  {:<20} after capital gains tax ${:>14.0}", "", after_tax);
        }
    }
    if let Some(winner) = &summary.winner {
        println!("\nHighest net worth: {}", winner);
    }
}

fn cmd_costs(
    assumptions_path: Option<&Path>,
    preset: Preset,
    scenarios_path: Option<&Path>,
    housing_share: f64,
    income_tax_rate: f64,
    earners: u32,
) -> Result<()> {
    let assumptions = load_assumptions(assumptions_path, preset)?;
    let scenarios = load_scenario_set(scenarios_path, preset)?;

    let engine = ProjectionEngine::new(assumptions, ProjectionConfig::default());
    let result = engine.run_horizon(&scenarios, 1).context("projecting first year")?;

    println!(
        "Year 1 monthly costs (housing at {:.0}% of take-home, {:.2}% income tax)",
        housing_share * 100.0,
        income_tax_rate * 100.0
    );
    for scenario in &result.scenarios {
        let Some(row) = scenario.rows.first() else {
            continue;
        };
        let costs = &row.costs;
        let income = required_income(costs, housing_share, income_tax_rate)
            .context("computing required income")?;

        println!("\n{}", scenario.name);
        if scenario.is_owner {
            println!("  Principal & interest:  ${:>10.2}", costs.principal_and_interest / 12.0);
            println!("  Property tax:          ${:>10.2}", costs.property_tax / 12.0);
            println!("  Insurance:             ${:>10.2}", costs.insurance / 12.0);
            println!("  PMI:                   ${:>10.2}", costs.pmi / 12.0);
            println!("  Land lease:            ${:>10.2}", costs.land_lease / 12.0);
            println!("  Maintenance:           ${:>10.2}", costs.maintenance / 12.0);
            println!("  Gross:                 ${:>10.2}", costs.gross_annual_cost / 12.0);
            println!("  Tax benefit:           ${:>10.2}", -costs.tax_benefit / 12.0);
        } else {
            println!("  Rent:                  ${:>10.2}", costs.rent / 12.0);
        }
        println!("  Net after tax:         ${:>10.2}", costs.monthly_net_cost());
        println!(
            "  Required income:       ${:>10.0}/yr pre-tax (${:.0} per earner)",
            income.annual_pre_tax,
            income.per_earner(earners)
        );
    }
    Ok(())
}

fn cmd_fund(assumptions_path: Option<&Path>, needed: f64, saving_years: u32, holding_years: u32) -> Result<()> {
    let assumptions = load_assumptions(assumptions_path, Preset::RentVsBuy)?;
    let annual_return = assumptions.market.investment_return;
    let gains_rate = assumptions.tax.capital_gains_rate.unwrap_or(0.0);
    let saving_months = saving_years * 12;

    let target = gross_target_for_after_tax(needed, saving_months, annual_return, gains_rate);
    let outcome = fund_by_saving(target, saving_months, holding_years * 12, annual_return, gains_rate);

    println!("Funding ${:.0} after tax at {:.1}% return, {:.1}% capital gains", needed, annual_return * 100.0, gains_rate * 100.0);
    println!("  Pre-tax target:        ${:>12.2}", target);
    println!("  Monthly contribution:  ${:>12.2} for {} years", outcome.monthly_contribution, saving_years);
    println!("  Value at sale:         ${:>12.2} after {} more years", outcome.value_at_sale, holding_years);
    println!("  Cost basis:            ${:>12.2}", outcome.liquidation.cost_basis);
    println!("  Capital gains tax:     ${:>12.2}", outcome.liquidation.tax);
    println!("  Net proceeds:          ${:>12.2}", outcome.liquidation.net_proceeds);
    Ok(())
}
