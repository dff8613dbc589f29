//! Spousal deduction and special spousal deduction
//!
//! Two regimes keyed on the spouse's total income: the ordinary regime up to
//! 580,000 yen (fixed amounts, elderly uplift), and the special regime up to
//! 1,330,000 yen (sliding bracket table, scaled down by own income). All
//! bracket bounds are inclusive on the upper side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::age::is_elderly;
use super::income::Money;

/// Own total income above which no spousal deduction applies
pub const OWN_INCOME_CEILING: Money = 10_000_000;

/// Spouse total income limit for the ordinary regime
const ORDINARY_INCOME_LIMIT: Money = 580_000;

/// Spouse total income limit for the special regime
const SPECIAL_INCOME_LIMIT: Money = 1_330_000;

/// Special regime base amounts by spouse total income (inclusive upper bound).
///
/// The two tail rows both resolve to 10,000 yen; the 1,300,000/1,330,000
/// split is carried over from the statutory table as published.
const SPECIAL_BRACKETS: [(Money, Money); 18] = [
    (500_000, 480_000),
    (550_000, 480_000),
    (600_000, 460_000),
    (650_000, 440_000),
    (700_000, 420_000),
    (750_000, 400_000),
    (800_000, 360_000),
    (850_000, 320_000),
    (900_000, 280_000),
    (950_000, 240_000),
    (1_000_000, 200_000),
    (1_050_000, 160_000),
    (1_100_000, 120_000),
    (1_150_000, 80_000),
    (1_200_000, 40_000),
    (1_250_000, 20_000),
    (1_300_000, 10_000),
    (1_330_000, 10_000),
];

/// Which spousal regime produced the deduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpouseDeductionKind {
    /// Spousal deduction (spouse income within the ordinary limit)
    Ordinary,
    /// Special spousal deduction (sliding scale above the ordinary limit)
    Special,
}

/// Spousal deduction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseDeduction {
    pub amount: Money,
    /// None when no regime applies
    pub kind: Option<SpouseDeductionKind>,
    pub message: String,
}

impl SpouseDeduction {
    pub fn is_eligible(&self) -> bool {
        self.kind.is_some()
    }

    fn ineligible(message: &str) -> Self {
        Self {
            amount: 0,
            kind: None,
            message: message.to_string(),
        }
    }
}

/// Resolve the spousal deduction.
///
/// `spouse_total_income` must already be a total income (salary income plus
/// other income), not a gross salary.
pub fn spouse_deduction(
    own_total_income: Money,
    spouse_total_income: Money,
    spouse_birth_date: Option<NaiveDate>,
    target_year: i32,
) -> SpouseDeduction {
    if own_total_income > OWN_INCOME_CEILING {
        return SpouseDeduction::ineligible(
            "Own total income exceeds 10,000,000 yen; no spousal deduction applies",
        );
    }

    let elderly = is_elderly(spouse_birth_date, target_year);

    if spouse_total_income <= ORDINARY_INCOME_LIMIT {
        let amount = ordinary_amount(own_total_income, elderly);
        return SpouseDeduction {
            amount,
            kind: Some(SpouseDeductionKind::Ordinary),
            message: "Spousal deduction applies".to_string(),
        };
    }

    if spouse_total_income <= SPECIAL_INCOME_LIMIT {
        let base = special_base_amount(spouse_total_income);
        // Own income is already known to be within the ceiling here
        let amount = scale_by_own_income(base, own_total_income).unwrap_or(0);
        return SpouseDeduction {
            amount,
            kind: Some(SpouseDeductionKind::Special),
            message: "Special spousal deduction applies".to_string(),
        };
    }

    SpouseDeduction::ineligible(
        "Spouse total income exceeds 1,330,000 yen; no spousal deduction applies",
    )
}

/// Ordinary regime amounts by own income tier, with the elderly uplift
fn ordinary_amount(own_total_income: Money, elderly: bool) -> Money {
    if own_total_income <= 9_000_000 {
        if elderly { 580_000 } else { 480_000 }
    } else if own_total_income <= 9_500_000 {
        if elderly { 387_000 } else { 320_000 }
    } else {
        if elderly { 193_000 } else { 160_000 }
    }
}

fn special_base_amount(spouse_total_income: Money) -> Money {
    SPECIAL_BRACKETS
        .iter()
        .find(|(bound, _)| spouse_total_income <= *bound)
        .map(|(_, amount)| *amount)
        .unwrap_or(0)
}

/// Reduce a base amount by the own-income tier: full up to 9,000,000,
/// two-thirds up to 9,500,000, one-third up to 10,000,000 (both floored).
/// None above the ceiling. Shared with the dependent special deduction.
pub(crate) fn scale_by_own_income(base: Money, own_total_income: Money) -> Option<Money> {
    if own_total_income <= 9_000_000 {
        Some(base)
    } else if own_total_income <= 9_500_000 {
        Some(base * 2 / 3)
    } else if own_total_income <= OWN_INCOME_CEILING {
        Some(base / 3)
    } else {
        None
    }
}
