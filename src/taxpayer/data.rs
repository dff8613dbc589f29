//! Declaration data structures matching the year-end adjustment forms
//!
//! One `Declaration` carries everything an employee reports across the
//! basic, spousal, dependent, adjustment, and insurance declaration forms.
//! Amounts are integer yen; birth dates are optional and tolerate both
//! `YYYY/MM/DD` and `YYYY-MM-DD` on input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::deduction::Money;

/// Parse a birth date in `YYYY/MM/DD` or `YYYY-MM-DD` form.
///
/// Anything unparseable is `None`; downstream age gates treat a missing
/// date as ineligible rather than an error.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok()
}

/// Serde adapter for optional birth dates accepting both supported formats
mod flexible_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        // Malformed dates degrade to None instead of failing the whole record
        Ok(raw.as_deref().and_then(super::parse_birth_date))
    }
}

/// Spouse block of the spousal deduction declaration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseDeclaration {
    /// Spouse's gross annual salary
    pub annual_salary: Money,

    /// Spouse's income other than salary
    #[serde(default)]
    pub other_income: Money,

    /// Spouse's birth date, for the elderly uplift
    #[serde(default, with = "flexible_date")]
    pub birth_date: Option<NaiveDate>,
}

/// Dependent block of the specific dependent declaration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentDeclaration {
    /// Dependent's gross annual salary
    pub annual_salary: Money,

    /// Dependent's birth date, for the 19-to-under-23 gate
    #[serde(default, with = "flexible_date")]
    pub birth_date: Option<NaiveDate>,
}

/// Annual premium figures from the insurance deduction declaration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsurancePremiums {
    pub general_life_new: Money,
    pub general_life_old: Money,
    pub medical_care_new: Money,
    pub personal_pension_new: Money,
    pub personal_pension_old: Money,
    pub earthquake: Money,
    pub old_long_term: Money,
    pub national_pension: Money,
    pub national_health: Money,
    pub other_social: Money,
    pub ideco: Money,
    pub mutual_aid: Money,
}

/// A single employee's complete year-end adjustment declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Payroll identifier
    pub employee_id: u32,

    /// Employee name as written on the forms
    pub name: String,

    /// Gross annual salary
    pub annual_salary: Money,

    /// Income other than salary
    #[serde(default)]
    pub other_income: Money,

    /// Spousal deduction form block, when a spouse is declared
    #[serde(default)]
    pub spouse: Option<SpouseDeclaration>,

    /// Specific dependent form block, when one is declared
    #[serde(default)]
    pub dependent: Option<DependentDeclaration>,

    /// Special disability flag for the income adjustment deduction
    #[serde(default)]
    pub has_special_disabled: bool,

    /// Dependent-under-23 flag for the income adjustment deduction
    #[serde(default)]
    pub has_young_dependent: bool,

    /// Insurance premium declarations
    #[serde(default)]
    pub insurance: InsurancePremiums,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birth_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2005, 4, 1).unwrap();
        assert_eq!(parse_birth_date("2005/04/01"), Some(expected));
        assert_eq!(parse_birth_date("2005-04-01"), Some(expected));
        assert_eq!(parse_birth_date(" 2005/04/01 "), Some(expected));
        assert_eq!(parse_birth_date(""), None);
        assert_eq!(parse_birth_date("April 1, 2005"), None);
        assert_eq!(parse_birth_date("2005/13/01"), None);
    }

    #[test]
    fn test_declaration_from_json() {
        let json = r#"{
            "employee_id": 1001,
            "name": "Yamada Taro",
            "annual_salary": 4000000,
            "spouse": {
                "annual_salary": 1000000,
                "birth_date": "1985/06/15"
            },
            "insurance": {
                "general_life_new": 90000
            }
        }"#;

        let decl: Declaration = serde_json::from_str(json).expect("valid declaration");
        assert_eq!(decl.employee_id, 1001);
        assert_eq!(decl.annual_salary, 4_000_000);
        assert_eq!(decl.other_income, 0);
        let spouse = decl.spouse.expect("spouse block");
        assert_eq!(
            spouse.birth_date,
            Some(NaiveDate::from_ymd_opt(1985, 6, 15).unwrap())
        );
        assert_eq!(decl.insurance.general_life_new, 90_000);
        assert_eq!(decl.insurance.ideco, 0);
        assert!(decl.dependent.is_none());
    }

    #[test]
    fn test_malformed_birth_date_degrades_to_none() {
        let json = r#"{
            "employee_id": 1,
            "name": "Test",
            "annual_salary": 0,
            "dependent": { "annual_salary": 0, "birth_date": "not a date" }
        }"#;

        let decl: Declaration = serde_json::from_str(json).expect("record still parses");
        assert_eq!(decl.dependent.expect("dependent block").birth_date, None);
    }
}
