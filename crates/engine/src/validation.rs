//! Request validators.
//!
//! Pure functions turning raw request fields into typed values. Nothing here talks to
//! the database: a request that fails validation never reaches the store.

use chrono::NaiveDate;

use crate::{EngineError, ResultEngine};

/// Wire format accepted for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated expense ready to be inserted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub expense_name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl NewExpense {
    /// Validate the raw create fields.
    ///
    /// `today` is the reference day for the future-date check.
    pub fn validate(
        expense_name: Option<&str>,
        amount: Option<f64>,
        date: Option<&str>,
        today: NaiveDate,
    ) -> ResultEngine<Self> {
        let expense_name = require_expense_name(expense_name)?;
        let amount = require_amount(amount)?;
        let date = date
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EngineError::InvalidDate("date is required".to_string()))?;
        let date = ensure_not_future(parse_date(date)?, today)?;

        Ok(Self {
            expense_name,
            amount,
            date,
        })
    }
}

/// Validated fields of an update. A missing `date` keeps the stored one.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseChanges {
    pub expense_name: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

impl ExpenseChanges {
    pub fn validate(
        expense_name: Option<&str>,
        amount: Option<f64>,
        date: Option<&str>,
        today: NaiveDate,
    ) -> ResultEngine<Self> {
        let expense_name = require_expense_name(expense_name)?;
        let amount = require_amount(amount)?;
        let date = match date.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(ensure_not_future(parse_date(raw)?, today)?),
            None => None,
        };

        Ok(Self {
            expense_name,
            amount,
            date,
        })
    }
}

/// Parse a `YYYY-MM-DD` naive date.
pub fn parse_date(raw: &str) -> ResultEngine<NaiveDate> {
    let invalid = || EngineError::InvalidDate("invalid date format, use YYYY-MM-DD".to_string());
    // chrono tolerates padding spaces and signed years, the wire format does not
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

/// Reject dates strictly after `today`.
pub fn ensure_not_future(date: NaiveDate, today: NaiveDate) -> ResultEngine<NaiveDate> {
    if date > today {
        return Err(EngineError::InvalidDate(format!(
            "date {date} is in the future"
        )));
    }
    Ok(date)
}

pub fn require_expense_name(value: Option<&str>) -> ResultEngine<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(
            "expense_name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn require_amount(value: Option<f64>) -> ResultEngine<f64> {
    match value {
        None => Err(EngineError::InvalidAmount("amount is required".to_string())),
        Some(amount) if !amount.is_finite() || amount <= 0.0 => Err(EngineError::InvalidAmount(
            "amount must be greater than 0".to_string(),
        )),
        Some(amount) => Ok(amount),
    }
}

/// Check that a path id is present.
pub fn require_id(raw: &str) -> ResultEngine<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidId("ID cannot be empty".to_string()));
    }
    Ok(trimmed)
}

/// Parse a path id made of ASCII digits only.
///
/// A well-formed id too large for the `id` column cannot name a row, so it is
/// reported as `KeyNotFound` rather than `InvalidId`.
pub fn parse_id(raw: &str) -> ResultEngine<i32> {
    let raw = require_id(raw)?;
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::InvalidId(format!("invalid id '{raw}'")));
    }
    raw.parse::<i32>()
        .map_err(|_| EngineError::KeyNotFound("Expense not found".to_string()))
}
