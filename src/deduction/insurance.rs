//! Insurance premium deductions
//!
//! Four independent sub-calculators: life insurance (new/old regimes with a
//! combination cap), earthquake and old long-term property insurance, social
//! insurance pass-through, and retirement savings pass-through. Each takes
//! already-normalized yen amounts.

use serde::{Deserialize, Serialize};

use super::income::Money;

/// Per-category deduction cap under the new regime
const NEW_REGIME_CAP: Money = 40_000;

/// Per-category deduction cap under the old regime
const OLD_REGIME_CAP: Money = 50_000;

/// Grand total cap for the life insurance deduction
const LIFE_TOTAL_CAP: Money = 120_000;

/// Earthquake premium pass-through cap, also the combined property cap
const EARTHQUAKE_CAP: Money = 50_000;

/// Old long-term property premium deduction cap
const OLD_LONG_TERM_CAP: Money = 15_000;

/// New-regime premium-to-deduction schedule (life, medical care, pension)
pub fn new_regime_deduction(premium: Money) -> Money {
    if premium == 0 {
        0
    } else if premium <= 20_000 {
        premium
    } else if premium <= 40_000 {
        premium / 2 + 10_000
    } else if premium <= 80_000 {
        premium / 4 + 20_000
    } else {
        NEW_REGIME_CAP
    }
}

/// Old-regime premium-to-deduction schedule (life, pension)
pub fn old_regime_deduction(premium: Money) -> Money {
    if premium == 0 {
        0
    } else if premium <= 25_000 {
        premium
    } else if premium <= 50_000 {
        premium / 2 + 12_500
    } else if premium <= 100_000 {
        premium / 4 + 25_000
    } else {
        OLD_REGIME_CAP
    }
}

/// Life insurance deduction breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifeInsuranceDeduction {
    pub general_new: Money,
    pub general_old: Money,
    pub general_total: Money,
    pub medical_new: Money,
    pub pension_new: Money,
    pub pension_old: Money,
    pub pension_total: Money,
    pub total: Money,
}

/// Combine a category's new- and old-regime amounts. When both regimes
/// contribute, the pair's sum caps at the new-regime limit; an old-only
/// category keeps the higher old-regime cap.
fn combine_regimes(new_amount: Money, old_amount: Money) -> Money {
    if new_amount > 0 && old_amount > 0 {
        (new_amount + old_amount).min(NEW_REGIME_CAP)
    } else if new_amount > 0 {
        new_amount
    } else {
        old_amount
    }
}

/// Resolve the life insurance deduction from the five premium figures.
pub fn life_insurance_deduction(
    general_new_premium: Money,
    general_old_premium: Money,
    medical_new_premium: Money,
    pension_new_premium: Money,
    pension_old_premium: Money,
) -> LifeInsuranceDeduction {
    let general_new = new_regime_deduction(general_new_premium);
    let general_old = old_regime_deduction(general_old_premium);
    let general_total = combine_regimes(general_new, general_old);

    let medical_new = new_regime_deduction(medical_new_premium);

    let pension_new = new_regime_deduction(pension_new_premium);
    let pension_old = old_regime_deduction(pension_old_premium);
    let pension_total = combine_regimes(pension_new, pension_old);

    let total = (general_total + medical_new + pension_total).min(LIFE_TOTAL_CAP);

    LifeInsuranceDeduction {
        general_new,
        general_old,
        general_total,
        medical_new,
        pension_new,
        pension_old,
        pension_total,
        total,
    }
}

/// Earthquake / old long-term property insurance deduction breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EarthquakeInsuranceDeduction {
    pub earthquake: Money,
    pub old_long_term: Money,
    pub total: Money,
}

/// Resolve the earthquake insurance deduction. Earthquake premiums pass
/// through up to 50,000; old long-term premiums use their own schedule;
/// the combined total shares the 50,000 cap.
pub fn earthquake_insurance_deduction(
    earthquake_premium: Money,
    old_long_term_premium: Money,
) -> EarthquakeInsuranceDeduction {
    let earthquake = earthquake_premium.min(EARTHQUAKE_CAP);

    let old_long_term = if old_long_term_premium == 0 {
        0
    } else if old_long_term_premium <= 10_000 {
        old_long_term_premium / 2
    } else if old_long_term_premium <= 20_000 {
        old_long_term_premium / 2 + 5_000
    } else {
        OLD_LONG_TERM_CAP
    };

    EarthquakeInsuranceDeduction {
        earthquake,
        old_long_term,
        total: (earthquake + old_long_term).min(EARTHQUAKE_CAP),
    }
}

/// Social insurance deduction: full pass-through, no caps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialInsuranceDeduction {
    pub national_pension: Money,
    pub national_health: Money,
    pub other_social: Money,
    pub total: Money,
}

pub fn social_insurance_deduction(
    national_pension: Money,
    national_health: Money,
    other_social: Money,
) -> SocialInsuranceDeduction {
    SocialInsuranceDeduction {
        national_pension,
        national_health,
        other_social,
        total: national_pension + national_health + other_social,
    }
}

/// Retirement savings deduction (iDeCo and small-business mutual aid):
/// full pass-through, no caps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetirementSavingsDeduction {
    pub ideco: Money,
    pub mutual_aid: Money,
    pub total: Money,
}

pub fn retirement_savings_deduction(ideco: Money, mutual_aid: Money) -> RetirementSavingsDeduction {
    RetirementSavingsDeduction {
        ideco,
        mutual_aid,
        total: ideco + mutual_aid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_regime_schedule() {
        assert_eq!(new_regime_deduction(0), 0);
        assert_eq!(new_regime_deduction(20_000), 20_000);
        assert_eq!(new_regime_deduction(40_000), 30_000);
        assert_eq!(new_regime_deduction(80_000), 40_000);
        assert_eq!(new_regime_deduction(90_000), 40_000);
        // Odd premium floors at the halving step
        assert_eq!(new_regime_deduction(30_001), 25_000);
    }

    #[test]
    fn test_old_regime_schedule() {
        assert_eq!(old_regime_deduction(0), 0);
        assert_eq!(old_regime_deduction(25_000), 25_000);
        assert_eq!(old_regime_deduction(50_000), 37_500);
        assert_eq!(old_regime_deduction(60_000), 40_000);
        assert_eq!(old_regime_deduction(100_000), 50_000);
        assert_eq!(old_regime_deduction(120_000), 50_000);
    }

    #[test]
    fn test_both_regimes_share_the_new_cap() {
        // New 90,000 -> 40,000 capped; old 60,000 -> 40,000; pair caps at 40,000
        let result = life_insurance_deduction(90_000, 60_000, 0, 0, 0);
        assert_eq!(result.general_new, 40_000);
        assert_eq!(result.general_old, 40_000);
        assert_eq!(result.general_total, 40_000);
    }

    #[test]
    fn test_old_only_keeps_the_old_cap() {
        // An old-only category may exceed the 40,000 new-regime cap
        let result = life_insurance_deduction(0, 120_000, 0, 0, 0);
        assert_eq!(result.general_total, 50_000);
    }

    #[test]
    fn test_life_grand_total_cap() {
        // 50,000 + 40,000 + 40,000 would be 130,000
        let result = life_insurance_deduction(0, 120_000, 90_000, 90_000, 0);
        assert_eq!(result.general_total, 50_000);
        assert_eq!(result.medical_new, 40_000);
        assert_eq!(result.pension_total, 40_000);
        assert_eq!(result.total, 120_000);
    }

    #[test]
    fn test_pension_combination() {
        let result = life_insurance_deduction(0, 0, 0, 30_000, 40_000);
        assert_eq!(result.pension_new, 25_000);
        assert_eq!(result.pension_old, 32_500);
        assert_eq!(result.pension_total, 40_000);
    }

    #[test]
    fn test_earthquake_schedule() {
        let simple = earthquake_insurance_deduction(30_000, 0);
        assert_eq!(simple.earthquake, 30_000);
        assert_eq!(simple.total, 30_000);

        let capped = earthquake_insurance_deduction(60_000, 0);
        assert_eq!(capped.earthquake, 50_000);

        let old_tiers = earthquake_insurance_deduction(0, 15_000);
        assert_eq!(old_tiers.old_long_term, 12_500);
        assert_eq!(earthquake_insurance_deduction(0, 10_000).old_long_term, 5_000);
        assert_eq!(earthquake_insurance_deduction(0, 25_000).old_long_term, 15_000);
    }

    #[test]
    fn test_earthquake_combined_cap() {
        let result = earthquake_insurance_deduction(50_000, 25_000);
        assert_eq!(result.earthquake, 50_000);
        assert_eq!(result.old_long_term, 15_000);
        assert_eq!(result.total, 50_000);
    }

    #[test]
    fn test_pass_through_sums() {
        let social = social_insurance_deduction(200_000, 350_000, 50_000);
        assert_eq!(social.total, 600_000);

        let savings = retirement_savings_deduction(276_000, 840_000);
        assert_eq!(savings.total, 1_116_000);
    }
}
