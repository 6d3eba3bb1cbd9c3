// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A strictly positive salary amount held in minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SalaryAmount {
    cents: i64,
}

impl SalaryAmount {
    /// Builds an amount from a decimal value in major units, rounding to cents.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSalaryAmount` if the value is not finite,
    /// is not greater than zero, or does not fit in cents.
    pub fn from_major(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() {
            return Err(DomainError::InvalidSalaryAmount(String::from(
                "Amount must be a finite number",
            )));
        }
        let cents: i64 = (amount * 100.0).round().to_i64().ok_or_else(|| {
            DomainError::InvalidSalaryAmount(format!("Amount {amount} is out of range"))
        })?;
        Self::from_cents(cents)
    }

    /// Builds an amount from minor units.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSalaryAmount` if `cents` is not positive.
    pub fn from_cents(cents: i64) -> Result<Self, DomainError> {
        if cents <= 0 {
            return Err(DomainError::InvalidSalaryAmount(String::from(
                "Amount must be greater than zero",
            )));
        }
        Ok(Self { cents })
    }

    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// The amount in major units, for display and JSON responses.
    #[must_use]
    pub fn as_major(&self) -> f64 {
        self.cents.to_f64().unwrap_or_default() / 100.0
    }
}

impl std::fmt::Display for SalaryAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

/// One row of an employee's salary ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryEntry {
    pub id: i64,
    pub amount: SalaryAmount,
    pub effective_date: Date,
    pub recorded_at: OffsetDateTime,
}

/// Resolves the current salary from a ledger.
///
/// The current entry has the latest effective date. Ties go to the most
/// recently recorded entry, then to the highest id.
#[must_use]
pub fn current_salary(entries: &[SalaryEntry]) -> Option<&SalaryEntry> {
    entries
        .iter()
        .max_by_key(|e| (e.effective_date, e.recorded_at, e.id))
}
