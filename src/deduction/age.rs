//! Age determination against the December 31 reference date
//!
//! Every age-gated deduction rule is evaluated as of December 31 of the
//! target tax year, never the calendar date the calculation runs on.

use chrono::{Datelike, NaiveDate};

/// Statutory filing year the engine defaults to (Reiwa 7)
pub const DEFAULT_TARGET_YEAR: i32 = 2025;

/// Age from which a spouse counts as elderly
const ELDERLY_AGE: i32 = 70;

/// Specific dependent age window: 19 inclusive to 23 exclusive
const SPECIFIC_DEPENDENT_MIN_AGE: i32 = 19;
const SPECIFIC_DEPENDENT_MAX_AGE: i32 = 23;

/// Reference date month/day within the target year
const REFERENCE_MONTH: u32 = 12;
const REFERENCE_DAY: u32 = 31;

/// Integer age attained as of December 31 of `target_year`.
///
/// Standard not-yet-had-birthday rule. A December 31 reference never
/// precedes a birthday within the same year, but the comparison is kept
/// explicit so the rule survives a different reference date.
pub fn age_at_year_end(birth_date: NaiveDate, target_year: i32) -> i32 {
    let years = target_year - birth_date.year();
    let birthday_passed =
        (REFERENCE_MONTH, REFERENCE_DAY) >= (birth_date.month(), birth_date.day());

    if birthday_passed {
        years
    } else {
        years - 1
    }
}

/// Whether the spouse is 70 or older at year end. Missing birth date means
/// the elderly uplift simply does not apply.
pub fn is_elderly(birth_date: Option<NaiveDate>, target_year: i32) -> bool {
    match birth_date {
        Some(date) => age_at_year_end(date, target_year) >= ELDERLY_AGE,
        None => false,
    }
}

/// Whether a dependent falls in the specific dependent window (19 to under 23)
/// at year end. Missing birth date means ineligible, not an error.
pub fn is_specific_dependent_age(birth_date: Option<NaiveDate>, target_year: i32) -> bool {
    match birth_date {
        Some(date) => {
            let age = age_at_year_end(date, target_year);
            (SPECIFIC_DEPENDENT_MIN_AGE..SPECIFIC_DEPENDENT_MAX_AGE).contains(&age)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_at_year_end() {
        // Born mid-year: birthday has passed by Dec 31
        assert_eq!(age_at_year_end(date(2005, 4, 1), 2025), 20);
        // Born on the reference date itself still counts the full year
        assert_eq!(age_at_year_end(date(2005, 12, 31), 2025), 20);
        assert_eq!(age_at_year_end(date(2005, 1, 1), 2025), 20);
    }

    #[test]
    fn test_elderly_boundary() {
        // Turns 70 during the target year
        assert!(is_elderly(Some(date(1955, 12, 31)), 2025));
        assert!(is_elderly(Some(date(1954, 1, 1)), 2025));
        // Still 69 at year end
        assert!(!is_elderly(Some(date(1956, 1, 1)), 2025));
        assert!(!is_elderly(None, 2025));
    }

    #[test]
    fn test_specific_dependent_window() {
        // Age 19 at year end: first eligible year
        assert!(is_specific_dependent_age(Some(date(2006, 12, 31)), 2025));
        // Age 22: last eligible year
        assert!(is_specific_dependent_age(Some(date(2003, 1, 1)), 2025));
        // Age 23: aged out
        assert!(!is_specific_dependent_age(Some(date(2002, 12, 31)), 2025));
        // Age 18: not yet
        assert!(!is_specific_dependent_age(Some(date(2007, 1, 1)), 2025));
        assert!(!is_specific_dependent_age(None, 2025));
    }
}
