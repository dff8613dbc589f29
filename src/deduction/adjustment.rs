//! Income adjustment deduction for high-salary earners with qualifying
//! household circumstances
//!
//! 10% of salary in excess of 8,500,000 yen, excess capped at 1,500,000 and
//! the deduction at 150,000. The statutory rounding here is a ceiling, not
//! the flooring used by every other resolver.

use serde::{Deserialize, Serialize};

use super::income::Money;

/// Salary at or below this is out of scope for the adjustment
const SALARY_THRESHOLD: Money = 8_500_000;

/// Excess salary counted toward the adjustment, effectively a 10,000,000
/// salary ceiling
const EXCESS_CAP: Money = 1_500_000;

/// Maximum deduction
const DEDUCTION_CAP: Money = 150_000;

/// Income adjustment deduction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentDeduction {
    pub amount: Money,
    pub eligible: bool,
    pub message: String,
}

impl AdjustmentDeduction {
    fn ineligible(message: &str) -> Self {
        Self {
            amount: 0,
            eligible: false,
            message: message.to_string(),
        }
    }
}

/// Resolve the income adjustment deduction from gross salary and the two
/// qualifying-circumstance flags.
pub fn income_adjustment_deduction(
    annual_salary: Money,
    has_special_disabled: bool,
    has_young_dependent: bool,
) -> AdjustmentDeduction {
    if annual_salary <= SALARY_THRESHOLD {
        return AdjustmentDeduction::ineligible(
            "Annual salary is 8,500,000 yen or less; the income adjustment deduction does not apply",
        );
    }

    if !has_special_disabled && !has_young_dependent {
        return AdjustmentDeduction::ineligible(
            "No special disability or dependent under 23 is declared; the deduction does not apply",
        );
    }

    let excess = (annual_salary - SALARY_THRESHOLD).min(EXCESS_CAP);
    // 10% with ceiling rounding, per the statutory formula
    let amount = excess.div_ceil(10).min(DEDUCTION_CAP);

    AdjustmentDeduction {
        amount,
        eligible: true,
        message: "Income adjustment deduction applies".to_string(),
    }
}
