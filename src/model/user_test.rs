use chrono::Duration;
use chrono::Local;

use super::*;

fn draft() -> User {
    User {
        id: None,
        name: "John-Doe".to_string(),
        age: 28,
        salary: "10000.00".parse().expect("should parse"),
        email: "john.doe@gmail.com".to_string(),
        insert_date: Local::now().date_naive(),
        department_id: None,
    }
}

/// # Case 1: a well-formed draft passes every constraint
#[test]
fn test_user_validate_case1() {
    assert!(draft().validate().is_ok());
}

/// # Case 2: name constraint
///
/// ## Criterias:
/// 1. spaces, shortness and overlength are each rejected
/// 2. the offending field is named in the violation
#[test]
fn test_user_validate_case2() {
    for bad in ["John Doe", "Jo", "x".repeat(26).as_str()] {
        let mut user = draft();
        user.name = bad.to_string();
        let err = user.validate().expect_err("should reject name");
        assert_eq!(1, err.violations.len());
        assert!(err.violations[0].starts_with("name:"));
    }
}

/// # Case 3: age bounds are 18..=65 inclusive
#[test]
fn test_user_validate_case3() {
    for (age, ok) in [(17, false), (18, true), (65, true), (66, false)] {
        let mut user = draft();
        user.age = age;
        assert_eq!(ok, user.validate().is_ok(), "age {}", age);
    }
}

/// # Case 4: salary constraint
///
/// ## Criterias:
/// 1. below-minimum and above-maximum amounts are rejected
/// 2. a negative amount reports the positivity violation only once
#[test]
fn test_user_validate_case4() {
    let mut user = draft();
    user.salary = Salary::from_cents(99_999);
    assert!(user.validate().is_err());

    user.salary = Salary::from_cents(SALARY_MAX.cents() + 1);
    assert!(user.validate().is_err());

    user.salary = Salary::from_cents(-100);
    let err = user.validate().expect_err("should reject salary");
    assert_eq!(1, err.violations.len());
    assert!(err.violations[0].starts_with("salary:"));
}

/// # Case 5: email shape
#[test]
fn test_user_validate_case5() {
    for bad in ["not-an-email", "a@b", "a b@c.com", "@c.com"] {
        let mut user = draft();
        user.email = bad.to_string();
        assert!(user.validate().is_err(), "email {}", bad);
    }
}

/// # Case 6: insert date must not lie in the past
///
/// ## Criterias:
/// 1. yesterday is rejected
/// 2. today and future dates are accepted
#[test]
fn test_user_validate_case6() {
    let mut user = draft();
    user.insert_date = Local::now().date_naive() - Duration::days(1);
    assert!(user.validate().is_err());

    user.insert_date = Local::now().date_naive() + Duration::days(365);
    assert!(user.validate().is_ok());
}

/// # Case 7: violations accumulate across fields
#[test]
fn test_user_validate_case7() {
    let mut user = draft();
    user.name = "A".to_string();
    user.age = 99;
    user.email = "broken".to_string();
    let err = user.validate().expect_err("should reject");
    assert_eq!(3, err.violations.len());
}
