// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest amount or balance magnitude accepted anywhere, in whole currency
/// units (10^15).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("content must not be empty")]
    EmptyContent,
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),
    #[error("amount '{0}' is not a whole number within the limit")]
    InvalidAmount(String),
    #[error("amount {0} exceeds the limit of {max}", max = MAX_AMOUNT)]
    AmountTooLarge(i64),
    #[error("daily budget cannot be negative, got {0}")]
    NegativeDailyCost(i64),
    #[error("unknown transaction type '{0}', expected income or expense")]
    UnknownKind(String),
    #[error("unknown source '{0}', expected cash or bank")]
    UnknownSource(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    #[serde(alias = "Thu", alias = "income")]
    Income,
    #[serde(alias = "Chi", alias = "expense")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.to_lowercase().as_str() {
            "income" | "in" | "thu" => Ok(TransactionKind::Income),
            "expense" | "out" | "chi" => Ok(TransactionKind::Expense),
            _ => Err(ValidationError::UnknownKind(t.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentSource {
    #[serde(alias = "Tiền mặt", alias = "cash")]
    Cash,
    #[serde(alias = "Tài khoản", alias = "bank")]
    Bank,
}

impl PaymentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentSource::Cash => "CASH",
            PaymentSource::Bank => "BANK",
        }
    }
}

impl fmt::Display for PaymentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.to_lowercase().as_str() {
            "cash" | "tiền mặt" => Ok(PaymentSource::Cash),
            "bank" | "tài khoản" => Ok(PaymentSource::Bank),
            _ => Err(ValidationError::UnknownSource(t.to_string())),
        }
    }
}

/// A recorded income or expense. Edits replace the whole record, keeping `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub source: PaymentSource,
    pub amount: i64,
}

impl Transaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.content, self.amount)
    }
}

/// A transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub content: String,
    pub kind: TransactionKind,
    pub source: PaymentSource,
    pub amount: i64,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.content, self.amount)
    }

    pub fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            date: self.date,
            content: self.content.trim().to_string(),
            kind: self.kind,
            source: self.source,
            amount: self.amount,
        }
    }
}

fn check_fields(content: &str, amount: i64) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    if amount <= 0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(amount));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub initial_cash: i64,
    pub initial_bank: i64,
    /// Zero disables budget tracking.
    pub daily_cost: i64,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for v in [self.initial_cash, self.initial_bank, self.daily_cost] {
            if v.unsigned_abs() > MAX_AMOUNT as u64 {
                return Err(ValidationError::AmountTooLarge(v));
            }
        }
        if self.daily_cost < 0 {
            return Err(ValidationError::NegativeDailyCost(self.daily_cost));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    pub current_cash: i64,
    pub current_bank: i64,
    pub total: i64,
    pub survival_days: i64,
    pub total_income: i64,
    pub total_expense: i64,
    pub today_expense: i64,
    pub cumulative_saving: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyFlow {
    pub date: NaiveDate,
    pub income: i64,
    pub expense: i64,
}
