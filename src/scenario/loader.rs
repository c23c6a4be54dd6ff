//! Load scenario definitions from CSV

use std::fs::File;
use std::path::Path;

use super::{Ownership, Pmi, Scenario, Tenure};
use crate::error::{LoadError, ValidationError};

/// Raw CSV row; ownership columns may be blank for renters
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Tenure")]
    tenure: String,
    #[serde(rename = "StartingCapital")]
    starting_capital: f64,
    #[serde(rename = "MonthlyRent", default)]
    monthly_rent: Option<f64>,
    #[serde(rename = "PurchasePrice", default)]
    purchase_price: Option<f64>,
    #[serde(rename = "DownPaymentPct", default)]
    down_payment_pct: Option<f64>,
    #[serde(rename = "ClosingCosts", default)]
    closing_costs: Option<f64>,
    #[serde(rename = "MortgageRate", default)]
    mortgage_rate: Option<f64>,
    #[serde(rename = "TermYears", default)]
    term_years: Option<u32>,
    #[serde(rename = "PropertyTaxRate", default)]
    property_tax_rate: Option<f64>,
    #[serde(rename = "InsuranceAnnual", default)]
    insurance_annual: Option<f64>,
    #[serde(rename = "MaintenanceAnnual", default)]
    maintenance_annual: Option<f64>,
    #[serde(rename = "PmiRate", default)]
    pmi_rate: Option<f64>,
    #[serde(rename = "LandLeaseMonthly", default)]
    land_lease_monthly: Option<f64>,
    #[serde(rename = "OwnershipShare", default)]
    ownership_share: Option<f64>,
}

impl CsvRow {
    fn required(&self, field: &str, value: Option<f64>) -> Result<f64, LoadError> {
        value.ok_or_else(|| LoadError::InvalidValue {
            field: format!("{} ({})", field, self.name),
            value: String::new(),
        })
    }

    fn to_scenario(self) -> Result<Scenario, LoadError> {
        let tenure = match self.tenure.as_str() {
            "Rent" => Tenure::Rent {
                monthly_rent: self.required("MonthlyRent", self.monthly_rent)?,
            },
            "Own" => Tenure::Own(self.to_ownership()?),
            other => {
                return Err(LoadError::InvalidValue {
                    field: "Tenure".to_string(),
                    value: other.to_string(),
                })
            }
        };

        Scenario::new(self.name.clone(), self.starting_capital, tenure).map_err(|source| {
            LoadError::InvalidScenario {
                name: self.name,
                source,
            }
        })
    }

    fn to_ownership(&self) -> Result<Ownership, LoadError> {
        let price = self.required("PurchasePrice", self.purchase_price)?;
        let down_pct = self.required("DownPaymentPct", self.down_payment_pct)?;
        let rate = self.required("MortgageRate", self.mortgage_rate)?;
        let term = self.term_years.unwrap_or(30);

        let invalid = |source: ValidationError| LoadError::InvalidScenario {
            name: self.name.clone(),
            source,
        };

        let mut ownership = Ownership::financed(price, down_pct, rate, term)
            .map_err(invalid)?
            .with_closing_costs(self.closing_costs.unwrap_or(0.0))
            .with_property_tax_rate(self.property_tax_rate.unwrap_or(0.0))
            .with_insurance(self.insurance_annual.unwrap_or(0.0))
            .with_maintenance(self.maintenance_annual.unwrap_or(0.0))
            .with_land_lease(self.land_lease_monthly.unwrap_or(0.0))
            .with_ownership_share(self.ownership_share.unwrap_or(1.0));

        if let Some(pmi_rate) = self.pmi_rate.filter(|r| *r > 0.0) {
            ownership = ownership.with_pmi(Pmi::percent_of_price(price, pmi_rate));
        }

        Ok(ownership)
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any reader (e.g., string buffer)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    log::debug!("Loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Tenure,StartingCapital,MonthlyRent,PurchasePrice,DownPaymentPct,ClosingCosts,MortgageRate,TermYears,PropertyTaxRate,InsuranceAnnual,MaintenanceAnnual,PmiRate,LandLeaseMonthly,OwnershipShare";

    #[test]
    fn test_load_scenarios() {
        let csv = format!(
            "{HEADER}\n\
             Renting,Rent,410000,5800,,,,,,,,,,,\n\
             3% Down,Own,410000,,1900000,0.03,30000,0.06,30,0.012,3000,,0.01,,\n"
        );

        let scenarios = load_scenarios_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 2);

        assert_eq!(scenarios[0].tenure, Tenure::Rent { monthly_rent: 5_800.0 });

        let own = scenarios[1].ownership().unwrap();
        assert_eq!(own.closing_costs, 30_000.0);
        assert_eq!(own.loan.term_years(), 30);
        assert_eq!(own.ownership_share, 1.0);
        assert!(own.pmi.is_some());
    }

    #[test]
    fn test_unknown_tenure() {
        let csv = format!("{HEADER}\nX,Lease,100,,,,,,,,,,,,\n");
        let err = load_scenarios_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { field, .. } if field == "Tenure"));
    }

    #[test]
    fn test_invalid_scenario_named_in_error() {
        let csv = format!("{HEADER}\nBroke,Own,1000,,1900000,0.20,30000,0.06,30,,,,,,\n");
        let err = load_scenarios_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidScenario { name, .. } if name == "Broke"));
    }

    #[test]
    fn test_oversized_term_rejected() {
        let csv = format!("{HEADER}\nLong,Own,410000,,1900000,0.20,30000,0.06,400000000,,,,,,\n");
        let err = load_scenarios_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidScenario {
                source: ValidationError::TermTooLong { .. },
                ..
            }
        ));
    }
}
