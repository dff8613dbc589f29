//! Statement builder: runs every resolver over one declaration
//!
//! The engine carries only the target year. Each call recomputes everything
//! from the declaration; nothing is cached or mutated between calls, so one
//! engine can serve any number of worker threads.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::deduction::{
    basic_deduction, dependent_special_deduction, earthquake_insurance_deduction,
    income_adjustment_deduction, life_insurance_deduction, retirement_savings_deduction,
    salary_income, social_insurance_deduction, spouse_deduction, total_income,
    AdjustmentDeduction, BasicDeduction, DependentDeduction, EarthquakeInsuranceDeduction,
    LifeInsuranceDeduction, Money, RetirementSavingsDeduction, SocialInsuranceDeduction,
    SpouseDeduction, DEFAULT_TARGET_YEAR,
};
use crate::taxpayer::Declaration;

/// Deduction engine bound to a target tax year
#[derive(Debug, Clone, Copy)]
pub struct DeductionEngine {
    target_year: i32,
}

impl DeductionEngine {
    /// Engine for a specific tax year
    pub fn new(target_year: i32) -> Self {
        Self { target_year }
    }

    /// Get the target year used for age determination
    pub fn target_year(&self) -> i32 {
        self.target_year
    }

    /// Compute the full deduction statement for one declaration.
    pub fn compute(&self, declaration: &Declaration) -> DeductionStatement {
        let salary = salary_income(declaration.annual_salary);
        let total = total_income(salary, declaration.other_income);

        let basic = basic_deduction(total);

        // The spouse's own figures run through the same salary resolver
        let spouse = declaration.spouse.as_ref().map(|s| {
            let spouse_total = total_income(salary_income(s.annual_salary), s.other_income);
            spouse_deduction(total, spouse_total, s.birth_date, self.target_year)
        });

        let dependent = declaration.dependent.as_ref().map(|d| {
            let dependent_income = salary_income(d.annual_salary);
            dependent_special_deduction(total, dependent_income, d.birth_date, self.target_year)
        });

        let adjustment = income_adjustment_deduction(
            declaration.annual_salary,
            declaration.has_special_disabled,
            declaration.has_young_dependent,
        );

        let premiums = &declaration.insurance;
        let life = life_insurance_deduction(
            premiums.general_life_new,
            premiums.general_life_old,
            premiums.medical_care_new,
            premiums.personal_pension_new,
            premiums.personal_pension_old,
        );
        let earthquake =
            earthquake_insurance_deduction(premiums.earthquake, premiums.old_long_term);
        let social = social_insurance_deduction(
            premiums.national_pension,
            premiums.national_health,
            premiums.other_social,
        );
        let retirement = retirement_savings_deduction(premiums.ideco, premiums.mutual_aid);

        debug!(
            "employee {}: salary income {}, total income {}, basic {}",
            declaration.employee_id, salary, total, basic.amount
        );

        DeductionStatement {
            employee_id: declaration.employee_id,
            name: declaration.name.clone(),
            salary_income: salary,
            total_income: total,
            basic,
            spouse,
            dependent,
            adjustment,
            life,
            earthquake,
            social,
            retirement,
        }
    }

    /// Compute statements for a whole roster with the same target year
    pub fn compute_batch(&self, declarations: &[Declaration]) -> Vec<DeductionStatement> {
        declarations.iter().map(|d| self.compute(d)).collect()
    }
}

impl Default for DeductionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_YEAR)
    }
}

/// Complete deduction results for one employee, ready for form transcription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionStatement {
    pub employee_id: u32,
    pub name: String,

    /// Salary income after the statutory salary income deduction
    pub salary_income: Money,

    /// Salary income plus other income
    pub total_income: Money,

    pub basic: BasicDeduction,

    /// Present when a spouse was declared
    pub spouse: Option<SpouseDeduction>,

    /// Present when a specific dependent was declared
    pub dependent: Option<DependentDeduction>,

    pub adjustment: AdjustmentDeduction,

    pub life: LifeInsuranceDeduction,
    pub earthquake: EarthquakeInsuranceDeduction,
    pub social: SocialInsuranceDeduction,
    pub retirement: RetirementSavingsDeduction,
}

impl DeductionStatement {
    /// Sum of every deduction on the statement
    pub fn total_deductions(&self) -> Money {
        self.basic.amount
            + self.spouse.as_ref().map_or(0, |s| s.amount)
            + self.dependent.as_ref().map_or(0, |d| d.amount)
            + self.adjustment.amount
            + self.life.total
            + self.earthquake.total
            + self.social.total
            + self.retirement.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deduction::{BasicDeductionCategory, SpouseDeductionKind};
    use crate::taxpayer::{parse_birth_date, DependentDeclaration, InsurancePremiums, SpouseDeclaration};

    fn declaration() -> Declaration {
        Declaration {
            employee_id: 1001,
            name: "Yamada Taro".to_string(),
            annual_salary: 4_000_000,
            other_income: 0,
            spouse: Some(SpouseDeclaration {
                // 1,130,000 gross salary resolves to exactly 580,000 income:
                // the last yen of the ordinary regime
                annual_salary: 1_130_000,
                other_income: 0,
                birth_date: parse_birth_date("1985/06/15"),
            }),
            dependent: None,
            has_special_disabled: false,
            has_young_dependent: false,
            insurance: InsurancePremiums {
                general_life_new: 90_000,
                general_life_old: 60_000,
                earthquake: 30_000,
                national_pension: 200_000,
                ideco: 276_000,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_full_statement() {
        let engine = DeductionEngine::default();
        let statement = engine.compute(&declaration());

        assert_eq!(statement.salary_income, 2_760_000);
        assert_eq!(statement.total_income, 2_760_000);
        assert_eq!(statement.basic.amount, 880_000);
        assert_eq!(statement.basic.category, BasicDeductionCategory::A);

        let spouse = statement.spouse.as_ref().expect("spouse result");
        assert_eq!(spouse.kind, Some(SpouseDeductionKind::Ordinary));
        assert_eq!(spouse.amount, 480_000);

        assert!(statement.dependent.is_none());
        assert!(!statement.adjustment.eligible);

        assert_eq!(statement.life.general_total, 40_000);
        assert_eq!(statement.earthquake.total, 30_000);
        assert_eq!(statement.social.total, 200_000);
        assert_eq!(statement.retirement.total, 276_000);

        assert_eq!(
            statement.total_deductions(),
            880_000 + 480_000 + 40_000 + 30_000 + 200_000 + 276_000
        );
    }

    #[test]
    fn test_dependent_pipeline_uses_salary_resolver() {
        // Dependent gross salary 1,600,000 resolves to 1,050,000 income,
        // landing in the 310,000 base bracket
        let mut decl = declaration();
        decl.spouse = None;
        decl.dependent = Some(DependentDeclaration {
            annual_salary: 1_600_000,
            birth_date: parse_birth_date("2005/04/01"),
        });

        let statement = DeductionEngine::default().compute(&decl);
        let dependent = statement.dependent.as_ref().expect("dependent result");
        assert!(dependent.eligible);
        assert_eq!(dependent.amount, 310_000);
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let engine = DeductionEngine::default();
        let decl = declaration();
        assert_eq!(engine.compute(&decl), engine.compute(&decl));
    }

    #[test]
    fn test_batch_matches_single() {
        let engine = DeductionEngine::default();
        let decls = vec![declaration(), declaration()];
        let batch = engine.compute_batch(&decls);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], engine.compute(&decls[0]));
    }
}
