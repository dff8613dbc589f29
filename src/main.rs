//! Nencho System CLI
//!
//! Computes one employee's year-end adjustment statement from a declaration
//! JSON file and prints the amounts to transcribe onto the withholding forms.

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use nencho_system::deduction::format_yen;
use nencho_system::taxpayer::validate_declaration;
use nencho_system::{Declaration, DeductionEngine, DeductionStatement, DEFAULT_TARGET_YEAR};

#[derive(Debug, Parser)]
#[command(name = "nencho_system", about = "Year-end adjustment deduction calculator")]
struct Cli {
    /// Declaration JSON file
    #[arg(long)]
    input: PathBuf,

    /// Target tax year for age determination
    #[arg(long, default_value_t = DEFAULT_TARGET_YEAR)]
    year: i32,

    /// Optional CSV output path for the statement line items
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let declaration: Declaration =
        serde_json::from_str(&raw).with_context(|| "failed to parse declaration JSON")?;

    let report = validate_declaration(&declaration, cli.year);
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    for error in &report.errors {
        println!("error: {}", error);
    }

    let engine = DeductionEngine::new(cli.year);
    let statement = engine.compute(&declaration);

    println!("Nencho System v0.1.0 (tax year {})", cli.year);
    println!("======================\n");

    println!("Employee: {} ({})", statement.name, statement.employee_id);
    println!("  Salary Income:     {:>12}", format_yen(statement.salary_income));
    println!("  Total Income:      {:>12}", format_yen(statement.total_income));
    println!();

    println!(
        "  Basic Deduction:   {:>12}  (category {})",
        format_yen(statement.basic.amount),
        statement.basic.category.as_str()
    );

    if let Some(spouse) = &statement.spouse {
        println!("  Spousal Deduction: {:>12}  {}", format_yen(spouse.amount), spouse.message);
    }

    if let Some(dependent) = &statement.dependent {
        println!(
            "  Dependent Special: {:>12}  {}",
            format_yen(dependent.amount),
            dependent.message
        );
    }

    println!(
        "  Income Adjustment: {:>12}  {}",
        format_yen(statement.adjustment.amount),
        statement.adjustment.message
    );

    println!("  Life Insurance:    {:>12}", format_yen(statement.life.total));
    println!("  Earthquake:        {:>12}", format_yen(statement.earthquake.total));
    println!("  Social Insurance:  {:>12}", format_yen(statement.social.total));
    println!("  Retirement Saving: {:>12}", format_yen(statement.retirement.total));
    println!();
    println!("  Total Deductions:  {:>12}", format_yen(statement.total_deductions()));

    if let Some(path) = &cli.output {
        write_statement_csv(path, &statement)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nStatement written to: {}", path.display());
    }

    Ok(())
}

/// Write the statement as Item,Amount,Note rows for spreadsheet import
fn write_statement_csv(path: &PathBuf, statement: &DeductionStatement) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "Item,Amount,Note")?;
    writeln!(file, "SalaryIncome,{},", statement.salary_income)?;
    writeln!(file, "TotalIncome,{},", statement.total_income)?;
    writeln!(
        file,
        "BasicDeduction,{},category {}",
        statement.basic.amount,
        statement.basic.category.as_str()
    )?;

    if let Some(spouse) = &statement.spouse {
        writeln!(file, "SpousalDeduction,{},{}", spouse.amount, spouse.message)?;
    }
    if let Some(dependent) = &statement.dependent {
        writeln!(file, "DependentSpecialDeduction,{},{}", dependent.amount, dependent.message)?;
    }

    writeln!(
        file,
        "IncomeAdjustmentDeduction,{},{}",
        statement.adjustment.amount, statement.adjustment.message
    )?;
    writeln!(file, "LifeInsuranceDeduction,{},", statement.life.total)?;
    writeln!(file, "EarthquakeInsuranceDeduction,{},", statement.earthquake.total)?;
    writeln!(file, "SocialInsuranceDeduction,{},", statement.social.total)?;
    writeln!(file, "RetirementSavingsDeduction,{},", statement.retirement.total)?;
    writeln!(file, "TotalDeductions,{},", statement.total_deductions())?;

    Ok(())
}
