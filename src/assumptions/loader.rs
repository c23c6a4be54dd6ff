//! CSV-based assumption overrides
//!
//! Reads `Parameter,Value` rows and applies them on top of the default
//! assumptions. Unknown parameters are rejected so typos fail loudly.

use std::fs::File;
use std::path::Path;

use super::{Assumptions, DeductibleDebtBasis, EscalationTiming};
use crate::error::LoadError;

/// Default path to the assumption override file
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions.csv";

/// Read raw `(parameter, value)` pairs in file order
pub fn load_parameters(path: &Path) -> Result<Vec<(String, String)>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_parameters_from_reader(file)
}

/// Read raw `(parameter, value)` pairs from any reader
pub fn load_parameters_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<(String, String)>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut params = Vec::new();
    for result in reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default().to_string();
        let value = record.get(1).unwrap_or_default().to_string();
        if !name.is_empty() {
            params.push((name, value));
        }
    }

    Ok(params)
}

fn parse_f64(field: &str, value: &str) -> Result<f64, LoadError> {
    value.parse().map_err(|_| LoadError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(field: &str, value: &str) -> Result<u32, LoadError> {
    value.parse().map_err(|_| LoadError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Apply a single named override
pub fn apply_parameter(
    assumptions: &mut Assumptions,
    name: &str,
    value: &str,
) -> Result<(), LoadError> {
    match name {
        "investment_return" => assumptions.market.investment_return = parse_f64(name, value)?,
        "home_appreciation" => assumptions.market.home_appreciation = parse_f64(name, value)?,

        "marginal_tax_rate" => assumptions.tax.marginal_rate = parse_f64(name, value)?,
        "standard_deduction" => assumptions.tax.standard_deduction = parse_f64(name, value)?,
        "salt_cap" => assumptions.tax.salt_cap = parse_f64(name, value)?,
        "mortgage_debt_cap" => assumptions.tax.mortgage_debt_cap = parse_f64(name, value)?,
        "capital_gains_rate" => {
            assumptions.tax.capital_gains_rate = match value {
                "" | "none" => None,
                v => Some(parse_f64(name, v)?),
            }
        }
        "deductible_debt_basis" => {
            assumptions.tax.debt_basis = match value {
                "original" => DeductibleDebtBasis::OriginalPrincipal,
                "outstanding" => DeductibleDebtBasis::OutstandingBalance,
                other => {
                    return Err(LoadError::InvalidValue {
                        field: name.to_string(),
                        value: other.to_string(),
                    })
                }
            }
        }

        "property_tax_escalation" => {
            assumptions.escalation.property_tax.annual_rate = parse_f64(name, value)?
        }
        "insurance_escalation" => {
            assumptions.escalation.insurance.annual_rate = parse_f64(name, value)?
        }
        "rent_escalation" => assumptions.escalation.rent.annual_rate = parse_f64(name, value)?,
        "maintenance_escalation" => {
            assumptions.escalation.maintenance.annual_rate = parse_f64(name, value)?
        }
        "land_lease_escalation" => {
            assumptions.escalation.land_lease.annual_rate = parse_f64(name, value)?
        }
        "escalation_timing" => {
            assumptions.escalation.timing = match value {
                "base" => EscalationTiming::BaseInYearOne,
                "escalated" => EscalationTiming::EscalatedInYearOne,
                other => {
                    return Err(LoadError::InvalidValue {
                        field: name.to_string(),
                        value: other.to_string(),
                    })
                }
            }
        }
        "land_lease_flat_years" => {
            assumptions.escalation.land_lease.flat_years = parse_u32(name, value)?.max(1)
        }

        other => return Err(LoadError::UnknownParameter(other.to_string())),
    }

    Ok(())
}
