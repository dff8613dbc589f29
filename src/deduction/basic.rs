//! Basic deduction amount and reporting category
//!
//! The amount table and the A/B/C category table are independent axes over
//! the same total income. The category feeds the withholding form's
//! reporting code only; it never changes the amount.

use serde::{Deserialize, Serialize};

use super::income::Money;

/// Reporting category for the basic deduction declaration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasicDeductionCategory {
    /// Total income up to 9,000,000
    A,
    /// Total income up to 9,500,000
    B,
    /// Total income above 9,500,000
    C,
}

impl BasicDeductionCategory {
    /// Code as written on the statutory form
    pub fn as_str(&self) -> &'static str {
        match self {
            BasicDeductionCategory::A => "A",
            BasicDeductionCategory::B => "B",
            BasicDeductionCategory::C => "C",
        }
    }
}

/// Basic deduction result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicDeduction {
    pub amount: Money,
    pub category: BasicDeductionCategory,
}

/// Resolve the basic deduction for a total income.
pub fn basic_deduction(total_income: Money) -> BasicDeduction {
    BasicDeduction {
        amount: basic_deduction_amount(total_income),
        category: basic_deduction_category(total_income),
    }
}

/// Reiwa 7 basic deduction amounts, including the temporary uplift tiers
/// for lower incomes and the phase-out above 24,000,000.
fn basic_deduction_amount(total_income: Money) -> Money {
    if total_income <= 1_320_000 {
        950_000
    } else if total_income <= 3_360_000 {
        880_000
    } else if total_income <= 4_890_000 {
        680_000
    } else if total_income <= 6_550_000 {
        630_000
    } else if total_income <= 23_500_000 {
        580_000
    } else if total_income <= 24_000_000 {
        480_000
    } else if total_income <= 24_500_000 {
        320_000
    } else if total_income <= 25_000_000 {
        160_000
    } else {
        0
    }
}

fn basic_deduction_category(total_income: Money) -> BasicDeductionCategory {
    if total_income <= 9_000_000 {
        BasicDeductionCategory::A
    } else if total_income <= 9_500_000 {
        BasicDeductionCategory::B
    } else {
        BasicDeductionCategory::C
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_tiers() {
        assert_eq!(basic_deduction(1_320_000).amount, 950_000);
        assert_eq!(basic_deduction(2_760_000).amount, 880_000);
        assert_eq!(basic_deduction(4_360_000).amount, 680_000);
        assert_eq!(basic_deduction(6_000_000).amount, 630_000);
        assert_eq!(basic_deduction(8_050_000).amount, 580_000);
        assert_eq!(basic_deduction(25_000_001).amount, 0);
    }

    #[test]
    fn test_phase_out_boundaries() {
        // Inclusive upper bounds: exactly at the boundary keeps the higher amount
        assert_eq!(basic_deduction(24_000_000).amount, 480_000);
        assert_eq!(basic_deduction(24_000_001).amount, 320_000);
        assert_eq!(basic_deduction(24_500_000).amount, 320_000);
        assert_eq!(basic_deduction(24_500_001).amount, 160_000);
        assert_eq!(basic_deduction(25_000_000).amount, 160_000);
    }

    #[test]
    fn test_category_is_independent_of_amount() {
        // Same 580,000 amount tier, different categories
        let a = basic_deduction(9_000_000);
        let b = basic_deduction(9_000_001);
        let c = basic_deduction(9_500_001);
        assert_eq!(a.category, BasicDeductionCategory::A);
        assert_eq!(b.category, BasicDeductionCategory::B);
        assert_eq!(c.category, BasicDeductionCategory::C);
        assert_eq!(a.amount, 580_000);
        assert_eq!(b.amount, 580_000);
        assert_eq!(c.amount, 580_000);
    }

    #[test]
    fn test_amount_non_increasing() {
        let mut prev = Money::MAX;
        for income in (0..=26_000_000).step_by(97_531) {
            let amount = basic_deduction(income).amount;
            assert!(amount <= prev, "basic deduction increased at income {}", income);
            prev = amount;
        }
    }
}
