//! Annual escalation schedules for recurring housing costs

use serde::{Deserialize, Serialize};

/// Annual compounding applied to a recurring cost
///
/// Year 1 of a schedule is billed at the base amount. Costs held flat for longer
/// (a land lease fixed for its first five years) set `flat_years` to the
/// number of leading years billed at base; the first escalation lands in
/// year `flat_years + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EscalationSchedule {
    /// Annual growth rate (0.03 = 3% per year)
    pub annual_rate: f64,

    /// Leading years billed at the base amount (at least 1)
    pub flat_years: u32,
}

impl EscalationSchedule {
    /// Escalates every year from year 2 onwards
    pub fn annual(annual_rate: f64) -> Self {
        Self { annual_rate, flat_years: 1 }
    }

    /// Held at the base amount for `flat_years`, then escalates annually
    pub fn with_flat_years(annual_rate: f64, flat_years: u32) -> Self {
        Self {
            annual_rate,
            flat_years: flat_years.max(1),
        }
    }

    /// Never escalates
    pub fn flat() -> Self {
        Self::annual(0.0)
    }

    /// Multiplier on the base amount for a 1-indexed projection year
    pub fn factor(&self, year: u32) -> f64 {
        let flat = self.flat_years.max(1);
        if year <= flat {
            1.0
        } else {
            (1.0 + self.annual_rate).powi((year - flat) as i32)
        }
    }

    /// Escalated amount for a 1-indexed projection year
    pub fn amount(&self, base: f64, year: u32) -> f64 {
        base * self.factor(year)
    }
}

impl Default for EscalationSchedule {
    fn default() -> Self {
        Self::flat()
    }
}

/// Whether the first projection year is billed at base or already escalated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscalationTiming {
    /// Projection year 1 pays the quoted amounts
    BaseInYearOne,
    /// Quoted amounts are one year stale; projection year 1 is escalated once
    EscalatedInYearOne,
}

impl Default for EscalationTiming {
    fn default() -> Self {
        EscalationTiming::BaseInYearOne
    }
}

/// Shared escalation schedules, one per recurring cost category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationRates {
    pub property_tax: EscalationSchedule,
    pub insurance: EscalationSchedule,
    pub rent: EscalationSchedule,
    pub maintenance: EscalationSchedule,
    pub land_lease: EscalationSchedule,

    #[serde(default)]
    pub timing: EscalationTiming,
}

impl EscalationRates {
    /// Schedule year that a 1-indexed projection year is billed at
    pub fn schedule_year(&self, projection_year: u32) -> u32 {
        match self.timing {
            EscalationTiming::BaseInYearOne => projection_year,
            EscalationTiming::EscalatedInYearOne => projection_year + 1,
        }
    }
}

impl Default for EscalationRates {
    fn default() -> Self {
        Self {
            property_tax: EscalationSchedule::annual(0.02), // Prop 13 cap
            insurance: EscalationSchedule::annual(0.03),
            rent: EscalationSchedule::annual(0.03),
            maintenance: EscalationSchedule::annual(0.03),
            land_lease: EscalationSchedule::with_flat_years(0.03, 5),
            timing: EscalationTiming::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_year_one_is_base() {
        let schedule = EscalationSchedule::annual(0.03);
        assert_eq!(schedule.factor(1), 1.0);
        assert_relative_eq!(schedule.factor(2), 1.03);
        assert_relative_eq!(schedule.factor(3), 1.03 * 1.03);
    }

    #[test]
    fn test_land_lease_flat_period() {
        let schedule = EscalationSchedule::with_flat_years(0.03, 5);

        for year in 1..=5 {
            assert_eq!(schedule.amount(6_650.0, year), 6_650.0);
        }
        assert_relative_eq!(schedule.amount(6_650.0, 6), 6_650.0 * 1.03);
        assert_relative_eq!(schedule.amount(6_650.0, 10), 6_650.0 * 1.03_f64.powi(5));
    }

    #[test]
    fn test_timing_shifts_schedule_year() {
        let mut rates = EscalationRates::default();
        assert_eq!(rates.schedule_year(1), 1);
        assert_eq!(rates.rent.amount(69_600.0, rates.schedule_year(1)), 69_600.0);

        rates.timing = EscalationTiming::EscalatedInYearOne;
        assert_eq!(rates.schedule_year(1), 2);
        assert_relative_eq!(rates.rent.amount(69_600.0, rates.schedule_year(1)), 69_600.0 * 1.03);
    }

    #[test]
    fn test_zero_flat_years_treated_as_one() {
        let schedule = EscalationSchedule { annual_rate: 0.02, flat_years: 0 };
        assert_eq!(schedule.factor(1), 1.0);
        assert_relative_eq!(schedule.factor(2), 1.02);
    }
}
