//! Special deduction for specific dependents (age 19 to under 23)
//!
//! Applies only in the income window where the ordinary dependent deduction
//! has phased out: dependent income above 580,000 up to 1,230,000 yen. Below
//! the window the ordinary dependent deduction (out of scope here) applies;
//! above it nothing applies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::age::is_specific_dependent_age;
use super::income::Money;
use super::spouse::scale_by_own_income;

/// Dependent income at or below this gets the ordinary dependent deduction
const DEPENDENT_INCOME_FLOOR: Money = 580_000;

/// Dependent income above this gets nothing
const DEPENDENT_INCOME_CEILING: Money = 1_230_000;

/// Base amounts by dependent total income (inclusive upper bound)
const BASE_BRACKETS: [(Money, Money); 9] = [
    (850_000, 630_000),
    (900_000, 610_000),
    (950_000, 510_000),
    (1_000_000, 410_000),
    (1_050_000, 310_000),
    (1_100_000, 210_000),
    (1_150_000, 110_000),
    (1_200_000, 60_000),
    (1_230_000, 30_000),
];

/// Dependent special deduction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentDeduction {
    pub amount: Money,
    pub eligible: bool,
    pub message: String,
}

impl DependentDeduction {
    fn ineligible(message: &str) -> Self {
        Self {
            amount: 0,
            eligible: false,
            message: message.to_string(),
        }
    }
}

/// Resolve the special deduction for a specific dependent.
///
/// `dependent_income` must already be resolved through the salary income
/// table; this function does not re-derive it.
pub fn dependent_special_deduction(
    own_total_income: Money,
    dependent_income: Money,
    dependent_birth_date: Option<NaiveDate>,
    target_year: i32,
) -> DependentDeduction {
    if !is_specific_dependent_age(dependent_birth_date, target_year) {
        return DependentDeduction::ineligible(
            "Dependent does not meet the age requirement (19 to under 23 as of December 31)",
        );
    }

    if dependent_income <= DEPENDENT_INCOME_FLOOR {
        return DependentDeduction::ineligible(
            "Dependent income is 580,000 yen or less; the ordinary dependent deduction applies instead",
        );
    }

    if dependent_income > DEPENDENT_INCOME_CEILING {
        return DependentDeduction::ineligible(
            "Dependent income exceeds 1,230,000 yen; no deduction applies",
        );
    }

    let base = base_amount(dependent_income);

    match scale_by_own_income(base, own_total_income) {
        Some(amount) => DependentDeduction {
            amount,
            eligible: true,
            message: "Special deduction for a specific dependent applies".to_string(),
        },
        None => DependentDeduction::ineligible(
            "Own total income exceeds 10,000,000 yen; no deduction applies",
        ),
    }
}

fn base_amount(dependent_income: Money) -> Money {
    BASE_BRACKETS
        .iter()
        .find(|(bound, _)| dependent_income <= *bound)
        .map(|(_, amount)| *amount)
        .unwrap_or(0)
}
