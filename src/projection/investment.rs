//! Monthly compounding of the investment account

/// Grow a balance for `months` months with end-of-month contributions
///
/// Each month compounds first and then adds the contribution:
/// `balance = balance × (1 + r) + contribution`. Contributions of any sign
/// are accepted; callers decide whether a negative contribution (spending
/// more than the baseline) is meaningful.
pub fn grow_investment(balance: f64, monthly_contribution: f64, monthly_return: f64, months: u32) -> f64 {
    let mut balance = balance;
    for _ in 0..months {
        balance = balance * (1.0 + monthly_return) + monthly_contribution;
    }
    balance
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert_eq, proptest};

    #[test]
    fn test_contribution_added_after_compounding() {
        let grown = grow_investment(100_000.0, 1_000.0, 0.01, 1);
        assert_relative_eq!(grown, 102_000.0);
        assert_ne!(grown, (100_000.0 + 1_000.0) * 1.01);
    }

    #[test]
    fn test_renter_first_year() {
        // $410K at 7%/12 with no contributions
        let grown = grow_investment(410_000.0, 0.0, 0.07 / 12.0, 12);
        assert_relative_eq!(grown, 410_000.0 * (1.0 + 0.07 / 12.0_f64).powi(12), max_relative = 1e-12);
    }

    #[test]
    fn test_zero_months_is_identity() {
        assert_eq!(grow_investment(5.0, 100.0, 0.5, 0), 5.0);
    }

    #[test]
    fn test_negative_contribution_accepted() {
        let grown = grow_investment(10_000.0, -1_000.0, 0.0, 12);
        assert_eq!(grown, -2_000.0);
    }

    proptest! {
        #[test]
        fn prop_single_month_order(
            balance in -1_000_000.0f64..5_000_000.0,
            contribution in -20_000.0f64..20_000.0,
            rate in 0.0f64..0.02,
        ) {
            prop_assert_eq!(
                grow_investment(balance, contribution, rate, 1),
                balance * (1.0 + rate) + contribution
            );
        }
    }
}
