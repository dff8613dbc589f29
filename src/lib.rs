//! Nencho System - year-end adjustment deduction engine for Japanese payroll
//! withholding (Reiwa 7)
//!
//! This library provides:
//! - Statutory salary income and total income resolution
//! - Basic, spousal, dependent special, and income adjustment deductions
//! - Insurance premium deduction suite (life, earthquake, social, retirement savings)
//! - Declaration records, roster loading, and batch statement computation

pub mod deduction;
pub mod statement;
pub mod taxpayer;

// Re-export commonly used types
pub use deduction::{Money, DEFAULT_TARGET_YEAR};
pub use statement::{DeductionEngine, DeductionStatement};
pub use taxpayer::Declaration;
