use std::str::FromStr;

use super::*;

/// # Case 1: canonical two-fraction-digit form
///
/// ## Criterias:
/// 1. `"10000.00"` parses to 1,000,000 cents
/// 2. display renders the canonical form back
#[test]
fn test_salary_parse_case1() {
    let salary = Salary::from_str("10000.00").expect("should parse");
    assert_eq!(1_000_000, salary.cents());
    assert_eq!("10000.00", salary.to_string());
}

/// # Case 2: short forms
///
/// ## Criterias:
/// 1. a missing fraction part means zero cents
/// 2. a single fraction digit counts as tens of cents
#[test]
fn test_salary_parse_case2() {
    assert_eq!(1_234_500, Salary::from_str("12345").expect("should parse").cents());
    assert_eq!(1_234_560, Salary::from_str("12345.6").expect("should parse").cents());
}

/// # Case 3: malformed amounts are rejected
#[test]
fn test_salary_parse_case3() {
    assert!(Salary::from_str("").is_err());
    assert!(Salary::from_str("12a45").is_err());
    assert!(Salary::from_str("12345.678").is_err());
    assert!(Salary::from_str("12345.x0").is_err());
}

/// # Case 4: range acceptance bounds
///
/// ## Criterias:
/// 1. 1000.00 and 10,000,000,000.00 are both inclusive
/// 2. one cent outside either bound is rejected
#[test]
fn test_salary_range_case4() {
    assert!(SALARY_MIN.in_accepted_range());
    assert!(SALARY_MAX.in_accepted_range());
    assert!(!Salary::from_cents(SALARY_MIN.cents() - 1).in_accepted_range());
    assert!(!Salary::from_cents(SALARY_MAX.cents() + 1).in_accepted_range());
}

/// # Case 5: negative amounts display with a leading sign
#[test]
fn test_salary_display_case5() {
    let salary = Salary::from_cents(-1050);
    assert_eq!("-10.50", salary.to_string());
    assert!(!salary.is_positive());
}
