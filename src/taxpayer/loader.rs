//! Load employee declarations from a payroll roster CSV

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::{parse_birth_date, Declaration, DependentDeclaration, InsurancePremiums, SpouseDeclaration};
use crate::deduction::normalize_amount;

/// Roster loading failure
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {reason}")]
    Row { row: usize, reason: String },
}

/// Raw CSV row. Amount columns stay as strings so formatted figures
/// ("4,000,000") normalize the same way form input does.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "EmployeeID")]
    employee_id: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "AnnualSalary")]
    annual_salary: String,
    #[serde(rename = "OtherIncome", default)]
    other_income: String,
    #[serde(rename = "HasSpouse", default)]
    has_spouse: String,
    #[serde(rename = "SpouseSalary", default)]
    spouse_salary: String,
    #[serde(rename = "SpouseOtherIncome", default)]
    spouse_other_income: String,
    #[serde(rename = "SpouseBirthDate", default)]
    spouse_birth_date: String,
    #[serde(rename = "HasDependent", default)]
    has_dependent: String,
    #[serde(rename = "DependentSalary", default)]
    dependent_salary: String,
    #[serde(rename = "DependentBirthDate", default)]
    dependent_birth_date: String,
    #[serde(rename = "SpecialDisabled", default)]
    special_disabled: String,
    #[serde(rename = "YoungDependent", default)]
    young_dependent: String,
    #[serde(rename = "GeneralLifeNew", default)]
    general_life_new: String,
    #[serde(rename = "GeneralLifeOld", default)]
    general_life_old: String,
    #[serde(rename = "MedicalCareNew", default)]
    medical_care_new: String,
    #[serde(rename = "PensionNew", default)]
    pension_new: String,
    #[serde(rename = "PensionOld", default)]
    pension_old: String,
    #[serde(rename = "Earthquake", default)]
    earthquake: String,
    #[serde(rename = "OldLongTerm", default)]
    old_long_term: String,
    #[serde(rename = "NationalPension", default)]
    national_pension: String,
    #[serde(rename = "NationalHealth", default)]
    national_health: String,
    #[serde(rename = "OtherSocial", default)]
    other_social: String,
    #[serde(rename = "Ideco", default)]
    ideco: String,
    #[serde(rename = "MutualAid", default)]
    mutual_aid: String,
}

impl CsvRow {
    fn to_declaration(self, row: usize) -> Result<Declaration, RosterError> {
        let spouse = if parse_flag(&self.has_spouse, row)? {
            Some(SpouseDeclaration {
                annual_salary: normalize_amount(&self.spouse_salary),
                other_income: normalize_amount(&self.spouse_other_income),
                birth_date: parse_birth_date(&self.spouse_birth_date),
            })
        } else {
            None
        };

        let dependent = if parse_flag(&self.has_dependent, row)? {
            Some(DependentDeclaration {
                annual_salary: normalize_amount(&self.dependent_salary),
                birth_date: parse_birth_date(&self.dependent_birth_date),
            })
        } else {
            None
        };

        Ok(Declaration {
            employee_id: self.employee_id,
            name: self.name,
            annual_salary: normalize_amount(&self.annual_salary),
            other_income: normalize_amount(&self.other_income),
            spouse,
            dependent,
            has_special_disabled: parse_flag(&self.special_disabled, row)?,
            has_young_dependent: parse_flag(&self.young_dependent, row)?,
            insurance: InsurancePremiums {
                general_life_new: normalize_amount(&self.general_life_new),
                general_life_old: normalize_amount(&self.general_life_old),
                medical_care_new: normalize_amount(&self.medical_care_new),
                personal_pension_new: normalize_amount(&self.pension_new),
                personal_pension_old: normalize_amount(&self.pension_old),
                earthquake: normalize_amount(&self.earthquake),
                old_long_term: normalize_amount(&self.old_long_term),
                national_pension: normalize_amount(&self.national_pension),
                national_health: normalize_amount(&self.national_health),
                other_social: normalize_amount(&self.other_social),
                ideco: normalize_amount(&self.ideco),
                mutual_aid: normalize_amount(&self.mutual_aid),
            },
        })
    }
}

fn parse_flag(raw: &str, row: usize) -> Result<bool, RosterError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "" | "0" | "false" | "no" | "n" => Ok(false),
        other => Err(RosterError::Row {
            row,
            reason: format!("unrecognized flag value: {}", other),
        }),
    }
}

/// Load all declarations from a roster CSV file
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<Declaration>, RosterError> {
    let mut reader = csv::Reader::from_path(path)?;
    collect_rows(&mut reader)
}

/// Load declarations from any reader (e.g. string buffer, network stream)
pub fn load_roster_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Declaration>, RosterError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    collect_rows(&mut csv_reader)
}

fn collect_rows<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<Vec<Declaration>, RosterError> {
    let mut declarations = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        // Header is line 1; data rows start at line 2
        let row = i + 2;
        let record: CsvRow = result?;
        declarations.push(record.to_declaration(row)?);
    }

    Ok(declarations)
}
