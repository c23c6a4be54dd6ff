//! Fixed-rate mortgage terms

use serde::Serialize;

use crate::error::ValidationError;

/// Longest loan term accepted by [`LoanTerms::new`]
pub const MAX_TERM_YEARS: u32 = 50;

/// Immutable fixed-rate, fully amortizing loan terms
///
/// Construction validates the terms; an instance always has a positive
/// principal, a rate in `[0, 1)`, and a term of 1 to [`MAX_TERM_YEARS`] years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanTerms {
    principal: f64,
    annual_rate: f64,
    term_years: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate: f64, term_years: u32) -> Result<Self, ValidationError> {
        if !(principal > 0.0) || !principal.is_finite() {
            return Err(ValidationError::NonPositivePrincipal(principal));
        }
        if !(0.0..1.0).contains(&annual_rate) {
            return Err(ValidationError::RateOutOfRange(annual_rate));
        }
        if term_years == 0 {
            return Err(ValidationError::ZeroTerm);
        }
        if term_years > MAX_TERM_YEARS {
            return Err(ValidationError::TermTooLong {
                years: term_years,
                max: MAX_TERM_YEARS,
            });
        }

        Ok(Self {
            principal,
            annual_rate,
            term_years,
        })
    }

    /// 30-year fixed
    pub fn thirty_year(principal: f64, annual_rate: f64) -> Result<Self, ValidationError> {
        Self::new(principal, annual_rate, 30)
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }

    pub fn total_months(&self) -> u32 {
        self.term_years * 12
    }

    /// Level monthly principal and interest payment
    ///
    /// Standard annuity formula `P r (1+r)^n / ((1+r)^n - 1)`; a zero rate
    /// falls back to straight-line `P / n`.
    pub fn monthly_payment(&self) -> f64 {
        let r = self.monthly_rate();
        let n = self.total_months() as f64;
        let growth = (1.0 + r).powf(n);
        if r == 0.0 || growth == 1.0 {
            return self.principal / n;
        }
        self.principal * r * growth / (growth - 1.0)
    }

    /// Closed-form balance outstanding after `months_paid` scheduled payments
    pub fn remaining_balance_after(&self, months_paid: u32) -> f64 {
        let total = self.total_months();
        if months_paid >= total {
            return 0.0;
        }

        let r = self.monthly_rate();
        let growth_total = (1.0 + r).powi(total as i32);
        if r == 0.0 || growth_total == 1.0 {
            return self.principal * (1.0 - months_paid as f64 / total as f64);
        }

        let growth_paid = (1.0 + r).powi(months_paid as i32);
        self.principal * (growth_total - growth_paid) / (growth_total - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rejects_invalid_terms() {
        assert_eq!(
            LoanTerms::new(0.0, 0.06, 30),
            Err(ValidationError::NonPositivePrincipal(0.0))
        );
        assert_eq!(
            LoanTerms::new(-5.0, 0.06, 30),
            Err(ValidationError::NonPositivePrincipal(-5.0))
        );
        assert_eq!(
            LoanTerms::new(100_000.0, 1.0, 30),
            Err(ValidationError::RateOutOfRange(1.0))
        );
        assert_eq!(
            LoanTerms::new(100_000.0, -0.01, 30),
            Err(ValidationError::RateOutOfRange(-0.01))
        );
        assert_eq!(LoanTerms::new(100_000.0, 0.06, 0), Err(ValidationError::ZeroTerm));
        assert!(LoanTerms::new(f64::NAN, 0.06, 30).is_err());
    }

    #[test]
    fn test_term_capped() {
        assert!(LoanTerms::new(100_000.0, 0.06, MAX_TERM_YEARS).is_ok());
        assert_eq!(
            LoanTerms::new(1_520_000.0, 0.06, 400_000_000),
            Err(ValidationError::TermTooLong {
                years: 400_000_000,
                max: MAX_TERM_YEARS
            })
        );
    }

    #[test]
    fn test_three_percent_down_payment() {
        // $1.9M home, 3% down
        let loan = LoanTerms::thirty_year(1_843_000.0, 0.06).unwrap();
        assert_abs_diff_eq!(loan.monthly_payment(), 11_049.716, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let loan = LoanTerms::new(360_000.0, 0.0, 30).unwrap();
        assert_eq!(loan.monthly_payment(), 1_000.0);
        assert_eq!(loan.remaining_balance_after(180), 180_000.0);
    }

    #[test]
    fn test_closed_form_balance() {
        let loan = LoanTerms::thirty_year(1_843_000.0, 0.06).unwrap();

        assert_abs_diff_eq!(loan.remaining_balance_after(0), 1_843_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(loan.remaining_balance_after(12), 1_820_367.74, epsilon = 0.01);
        assert_eq!(loan.remaining_balance_after(360), 0.0);
        assert_eq!(loan.remaining_balance_after(400), 0.0);
    }
}
