//! Scenario records: financing, recurring costs, and starting capital

use serde::Serialize;

use super::loan::LoanTerms;
use crate::error::ValidationError;

/// Private mortgage insurance on a low-down-payment loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pmi {
    /// Annual premium while PMI applies
    pub annual_premium: f64,

    /// Equity, as a fraction of the ORIGINAL purchase price, at which PMI
    /// is dropped. `None` keeps PMI for the life of the loan.
    pub removal_equity_ratio: Option<f64>,
}

impl Pmi {
    /// Premium quoted as a percentage of purchase price, removed at 20% equity
    pub fn percent_of_price(purchase_price: f64, annual_rate: f64) -> Self {
        Self {
            annual_premium: purchase_price * annual_rate,
            removal_equity_ratio: Some(0.20),
        }
    }

    /// Fixed monthly premium paid until the loan is retired (FHA style)
    pub fn for_life_of_loan(monthly_premium: f64) -> Self {
        Self {
            annual_premium: monthly_premium * 12.0,
            removal_equity_ratio: None,
        }
    }

    /// Whether PMI still applies given year-end equity
    pub fn applies(&self, equity: f64, purchase_price: f64) -> bool {
        match self.removal_equity_ratio {
            Some(threshold) => equity / purchase_price < threshold,
            None => true,
        }
    }
}

/// An owned home: purchase, loan, and year-1 carrying costs
///
/// Carrying costs are year-1 annual amounts; the projection escalates them
/// with the shared schedules in the assumptions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ownership {
    pub purchase_price: f64,
    pub down_payment: f64,
    pub closing_costs: f64,
    pub loan: LoanTerms,

    pub property_tax_annual: f64,
    pub insurance_annual: f64,
    pub maintenance_annual: f64,
    pub pmi: Option<Pmi>,

    /// Ground rent for the land, zero for fee-simple ownership
    pub land_lease_annual: f64,

    /// Share of the home's market value the buyer owns (structure only
    /// under a ground lease)
    pub ownership_share: f64,
}

impl Ownership {
    /// Ownership with an explicit loan (ground lease, FHA-financed upfront PMI)
    pub fn new(purchase_price: f64, down_payment: f64, loan: LoanTerms) -> Self {
        Self {
            purchase_price,
            down_payment,
            closing_costs: 0.0,
            loan,
            property_tax_annual: 0.0,
            insurance_annual: 0.0,
            maintenance_annual: 0.0,
            pmi: None,
            land_lease_annual: 0.0,
            ownership_share: 1.0,
        }
    }

    /// Conventional purchase financing everything above the down payment
    pub fn financed(
        purchase_price: f64,
        down_payment_pct: f64,
        annual_rate: f64,
        term_years: u32,
    ) -> Result<Self, ValidationError> {
        let down_payment = purchase_price * down_payment_pct;
        if down_payment >= purchase_price {
            return Err(ValidationError::DownPaymentTooLarge {
                down_payment,
                price: purchase_price,
            });
        }
        let loan = LoanTerms::new(purchase_price - down_payment, annual_rate, term_years)?;
        Ok(Self::new(purchase_price, down_payment, loan))
    }

    pub fn with_closing_costs(mut self, amount: f64) -> Self {
        self.closing_costs = amount;
        self
    }

    /// Property tax as a rate on purchase price
    pub fn with_property_tax_rate(mut self, rate: f64) -> Self {
        self.property_tax_annual = self.purchase_price * rate;
        self
    }

    pub fn with_property_tax(mut self, annual: f64) -> Self {
        self.property_tax_annual = annual;
        self
    }

    pub fn with_insurance(mut self, annual: f64) -> Self {
        self.insurance_annual = annual;
        self
    }

    pub fn with_maintenance(mut self, annual: f64) -> Self {
        self.maintenance_annual = annual;
        self
    }

    pub fn with_pmi(mut self, pmi: Pmi) -> Self {
        self.pmi = Some(pmi);
        self
    }

    pub fn with_land_lease(mut self, monthly: f64) -> Self {
        self.land_lease_annual = monthly * 12.0;
        self
    }

    pub fn with_ownership_share(mut self, share: f64) -> Self {
        self.ownership_share = share;
        self
    }

    /// Cash needed at closing
    pub fn upfront_costs(&self) -> f64 {
        self.down_payment + self.closing_costs
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.purchase_price > 0.0) {
            return Err(ValidationError::NonPositivePrice(self.purchase_price));
        }

        let amounts = [
            ("purchase price", self.purchase_price),
            ("down payment", self.down_payment),
            ("closing costs", self.closing_costs),
            ("property tax", self.property_tax_annual),
            ("insurance", self.insurance_annual),
            ("maintenance", self.maintenance_annual),
            ("land lease", self.land_lease_annual),
            ("PMI premium", self.pmi.map(|p| p.annual_premium).unwrap_or(0.0)),
        ];
        for (field, value) in amounts {
            if !(value >= 0.0) {
                return Err(ValidationError::NegativeAmount { field, value });
            }
        }

        if !(self.ownership_share > 0.0 && self.ownership_share <= 1.0) {
            return Err(ValidationError::OwnershipShareOutOfRange(self.ownership_share));
        }

        Ok(())
    }
}

/// How the household is housed for the horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Tenure {
    /// Renting at a year-1 monthly rent
    Rent { monthly_rent: f64 },
    /// Owning with a mortgage
    Own(Ownership),
}

/// A single competing scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    /// Display name, also used to select a named baseline
    pub name: String,

    /// Liquid capital before any upfront purchase costs
    pub starting_capital: f64,

    pub tenure: Tenure,
}

impl Scenario {
    /// Build and validate a scenario
    pub fn new(
        name: impl Into<String>,
        starting_capital: f64,
        tenure: Tenure,
    ) -> Result<Self, ValidationError> {
        let scenario = Self {
            name: name.into(),
            starting_capital,
            tenure,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn renter(
        name: impl Into<String>,
        starting_capital: f64,
        monthly_rent: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(name, starting_capital, Tenure::Rent { monthly_rent })
    }

    pub fn buyer(
        name: impl Into<String>,
        starting_capital: f64,
        ownership: Ownership,
    ) -> Result<Self, ValidationError> {
        Self::new(name, starting_capital, Tenure::Own(ownership))
    }

    pub fn ownership(&self) -> Option<&Ownership> {
        match &self.tenure {
            Tenure::Own(ownership) => Some(ownership),
            Tenure::Rent { .. } => None,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.ownership().is_some()
    }

    pub fn upfront_costs(&self) -> f64 {
        self.ownership().map(Ownership::upfront_costs).unwrap_or(0.0)
    }

    /// Investment account balance on day one
    pub fn initial_investment(&self) -> f64 {
        self.starting_capital - self.upfront_costs()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.starting_capital >= 0.0) {
            return Err(ValidationError::NegativeAmount {
                field: "starting capital",
                value: self.starting_capital,
            });
        }

        match &self.tenure {
            Tenure::Rent { monthly_rent } => {
                if !(*monthly_rent >= 0.0) {
                    return Err(ValidationError::NegativeAmount {
                        field: "monthly rent",
                        value: *monthly_rent,
                    });
                }
            }
            Tenure::Own(ownership) => ownership.validate()?,
        }

        let upfront = self.upfront_costs();
        if upfront > self.starting_capital {
            return Err(ValidationError::UpfrontExceedsCapital {
                upfront,
                capital: self.starting_capital,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twenty_down() -> Ownership {
        Ownership::financed(1_900_000.0, 0.20, 0.06, 30)
            .unwrap()
            .with_closing_costs(30_000.0)
            .with_property_tax_rate(0.012)
            .with_insurance(3_000.0)
    }

    #[test]
    fn test_financed_loan_amount() {
        let own = twenty_down();
        assert_eq!(own.loan.principal(), 1_520_000.0);
        assert_eq!(own.upfront_costs(), 410_000.0);
        assert_eq!(own.property_tax_annual, 22_800.0);
    }

    #[test]
    fn test_initial_investment_after_upfront() {
        let buyer = Scenario::buyer("20% down", 410_000.0, twenty_down()).unwrap();
        assert_eq!(buyer.initial_investment(), 0.0);

        let renter = Scenario::renter("Renting", 410_000.0, 5_800.0).unwrap();
        assert_eq!(renter.initial_investment(), 410_000.0);
        assert!(!renter.is_owner());
    }

    #[test]
    fn test_upfront_exceeding_capital_rejected() {
        let err = Scenario::buyer("short", 400_000.0, twenty_down()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UpfrontExceedsCapital {
                upfront: 410_000.0,
                capital: 400_000.0
            }
        );
    }

    #[test]
    fn test_ownership_share_validated() {
        let own = twenty_down().with_ownership_share(0.0);
        assert!(matches!(
            Scenario::buyer("bad", 500_000.0, own),
            Err(ValidationError::OwnershipShareOutOfRange(_))
        ));
    }

    #[test]
    fn test_negative_rent_rejected() {
        assert!(matches!(
            Scenario::renter("bad", 0.0, -1.0),
            Err(ValidationError::NegativeAmount { field: "monthly rent", .. })
        ));
    }

    #[test]
    fn test_full_down_payment_rejected() {
        assert!(matches!(
            Ownership::financed(500_000.0, 1.0, 0.06, 30),
            Err(ValidationError::DownPaymentTooLarge { .. })
        ));
    }

    #[test]
    fn test_zero_purchase_price_rejected() {
        let loan = LoanTerms::thirty_year(500_000.0, 0.06).unwrap();
        let own = Ownership::new(0.0, 0.0, loan).with_pmi(Pmi::for_life_of_loan(100.0));
        assert_eq!(own.validate(), Err(ValidationError::NonPositivePrice(0.0)));
        assert!(matches!(
            Scenario::buyer("free", 100_000.0, own),
            Err(ValidationError::NonPositivePrice(_))
        ));
    }

    #[test]
    fn test_pmi_threshold_uses_purchase_price() {
        let pmi = Pmi::percent_of_price(1_900_000.0, 0.01);
        assert_eq!(pmi.annual_premium, 19_000.0);

        // 19.9% of purchase price: still charged
        assert!(pmi.applies(378_100.0, 1_900_000.0));
        // exactly 20%: removed
        assert!(!pmi.applies(380_000.0, 1_900_000.0));

        let fha = Pmi::for_life_of_loan(336.0);
        assert!(fha.applies(1_000_000.0, 1_900_000.0));
    }
}
