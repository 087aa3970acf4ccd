use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Lowest accepted salary: 1000.00
pub const SALARY_MIN: Salary = Salary(100_000);

/// Highest accepted salary: 10,000,000,000.00
pub const SALARY_MAX: Salary = Salary(1_000_000_000_000);

/// Fixed-point monetary amount with exactly two fractional digits.
///
/// Stored as signed cents so record equality and range checks stay exact.
/// The textual form is `major.minor` with a two-digit minor part, e.g.
/// `"10000.00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salary(i64);

impl Salary {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn in_accepted_range(&self) -> bool {
        (SALARY_MIN..=SALARY_MAX).contains(self)
    }
}

impl fmt::Display for Salary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SalaryParseError {
    #[error("empty amount")]
    Empty,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("at most 2 fractional digits allowed, got {0}")]
    TooManyFractionDigits(usize),
}

impl FromStr for Salary {
    type Err = SalaryParseError;

    /// Parses `"12345.67"`, `"12345.6"` and `"12345"` forms.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SalaryParseError::Empty);
        }

        let (major_part, minor_part) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, ""),
        };

        if minor_part.len() > 2 {
            return Err(SalaryParseError::TooManyFractionDigits(minor_part.len()));
        }
        if !minor_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(SalaryParseError::InvalidAmount(s.to_string()));
        }

        let major: i64 = major_part
            .parse()
            .map_err(|_| SalaryParseError::InvalidAmount(s.to_string()))?;

        let mut minor: i64 = if minor_part.is_empty() {
            0
        } else {
            minor_part
                .parse()
                .map_err(|_| SalaryParseError::InvalidAmount(s.to_string()))?
        };
        // "12345.6" means 60 cents, not 6
        if minor_part.len() == 1 {
            minor *= 10;
        }

        let sign = if major_part.starts_with('-') { -1 } else { 1 };
        Ok(Self(major * 100 + sign * minor))
    }
}
