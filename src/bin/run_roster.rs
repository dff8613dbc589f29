//! Run the deduction engine over an entire employee roster CSV
//!
//! Outputs one result row per employee for payroll system import, plus
//! aggregate totals for reconciliation.

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use rayon::prelude::*;

use nencho_system::deduction::Money;
use nencho_system::statement::DeductionStatement;
use nencho_system::taxpayer::{load_roster, validate_declaration};
use nencho_system::{DeductionEngine, DEFAULT_TARGET_YEAR};

fn main() {
    env_logger::init();

    let roster_path = std::env::args().nth(1).unwrap_or_else(|| "roster.csv".to_string());

    let start = Instant::now();
    println!("Loading declarations from {}...", roster_path);

    let declarations = load_roster(&roster_path).expect("Failed to load roster");
    println!("Loaded {} declarations in {:?}", declarations.len(), start.elapsed());

    let engine = DeductionEngine::new(DEFAULT_TARGET_YEAR);

    // Surface validation findings without blocking computation
    for declaration in &declarations {
        let report = validate_declaration(declaration, engine.target_year());
        for error in &report.errors {
            log::warn!("employee {}: {}", declaration.employee_id, error);
        }
        for warning in &report.warnings {
            log::info!("employee {}: {}", declaration.employee_id, warning);
        }
    }

    println!("Computing statements...");
    let compute_start = Instant::now();

    // Each computation is independent; fan out across cores
    let statements: Vec<DeductionStatement> = declarations
        .par_iter()
        .map(|declaration| engine.compute(declaration))
        .collect();

    println!("Computation complete in {:?}", compute_start.elapsed());

    // Write output
    let output_path = "roster_statements.csv";
    let mut file = File::create(output_path).expect("Failed to create output file");

    writeln!(file, "EmployeeID,Name,SalaryIncome,TotalIncome,BasicDeduction,BasicCategory,SpousalDeduction,DependentSpecialDeduction,IncomeAdjustmentDeduction,LifeInsurance,EarthquakeInsurance,SocialInsurance,RetirementSavings,TotalDeductions").unwrap();

    for statement in &statements {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            statement.employee_id,
            statement.name,
            statement.salary_income,
            statement.total_income,
            statement.basic.amount,
            statement.basic.category.as_str(),
            statement.spouse.as_ref().map_or(0, |s| s.amount),
            statement.dependent.as_ref().map_or(0, |d| d.amount),
            statement.adjustment.amount,
            statement.life.total,
            statement.earthquake.total,
            statement.social.total,
            statement.retirement.total,
            statement.total_deductions(),
        )
        .unwrap();
    }

    println!("Output written to {}", output_path);

    // Print aggregate totals for payroll reconciliation
    let total_basic: Money = statements.iter().map(|s| s.basic.amount).sum();
    let total_spousal: Money = statements
        .iter()
        .map(|s| s.spouse.as_ref().map_or(0, |r| r.amount))
        .sum();
    let total_all: Money = statements.iter().map(|s| s.total_deductions()).sum();

    println!("\nRoster Summary:");
    println!("  Employees:          {}", statements.len());
    println!("  Basic Deductions:   {}", total_basic);
    println!("  Spousal Deductions: {}", total_spousal);
    println!("  All Deductions:     {}", total_all);

    println!("\nTotal time: {:?}", start.elapsed());
}
