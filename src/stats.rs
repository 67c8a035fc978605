// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived financial statistics.
//!
//! Everything here is a pure function of the transaction log, the user's
//! settings and the calendar date passed in as `today`. Nothing is cached, so
//! callers recompute after every change.

use crate::models::{
    DailyFlow, FinancialSnapshot, PaymentSource, Settings, Transaction, TransactionKind,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

fn sum_where<F>(transactions: &[Transaction], pred: F) -> i64
where
    F: Fn(&Transaction) -> bool,
{
    transactions
        .iter()
        .filter(|t| pred(t))
        .fold(0i64, |acc, t| acc.saturating_add(t.amount))
}

fn bucket(transactions: &[Transaction], kind: TransactionKind, source: PaymentSource) -> i64 {
    sum_where(transactions, |t| t.kind == kind && t.source == source)
}

/// Compute balances, survival projection and budget health as of `today`.
pub fn compute_snapshot(
    transactions: &[Transaction],
    settings: &Settings,
    today: NaiveDate,
) -> FinancialSnapshot {
    use PaymentSource::{Bank, Cash};
    use TransactionKind::{Expense, Income};

    // Saturating, so values beyond MAX_AMOUNT clamp rather than overflow.
    let current_cash = settings
        .initial_cash
        .saturating_add(bucket(transactions, Income, Cash))
        .saturating_sub(bucket(transactions, Expense, Cash));
    let current_bank = settings
        .initial_bank
        .saturating_add(bucket(transactions, Income, Bank))
        .saturating_sub(bucket(transactions, Expense, Bank));
    let total = current_cash.saturating_add(current_bank);

    // div_euclid floors for a positive divisor, so a deficit stays negative.
    let survival_days = if settings.daily_cost > 0 {
        total.div_euclid(settings.daily_cost)
    } else {
        0
    };

    let today_expense = sum_where(transactions, |t| t.date == today && t.kind == Expense);
    let total_income = sum_where(transactions, |t| t.kind == Income);
    let total_expense = sum_where(transactions, |t| t.kind == Expense);

    let cumulative_saving = if settings.daily_cost > 0 {
        let first = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .unwrap_or(today);
        let diff_days = (today - first).num_days().saturating_add(1).max(1);
        diff_days
            .saturating_mul(settings.daily_cost)
            .saturating_sub(total_expense)
    } else {
        0
    };

    tracing::debug!(
        transactions = transactions.len(),
        %today,
        total,
        survival_days,
        cumulative_saving,
        "computed snapshot"
    );

    FinancialSnapshot {
        current_cash,
        current_bank,
        total,
        survival_days,
        total_income,
        total_expense,
        today_expense,
        cumulative_saving,
    }
}

/// Income and expense per date for the most recent `limit` dates that have activity.
pub fn daily_flow(transactions: &[Transaction], limit: usize) -> Vec<DailyFlow> {
    let mut by_date: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    for t in transactions {
        let entry = by_date.entry(t.date).or_insert((0, 0));
        match t.kind {
            TransactionKind::Income => entry.0 = entry.0.saturating_add(t.amount),
            TransactionKind::Expense => entry.1 = entry.1.saturating_add(t.amount),
        }
    }
    let skip = by_date.len().saturating_sub(limit);
    by_date
        .into_iter()
        .skip(skip)
        .map(|(date, (income, expense))| DailyFlow {
            date,
            income,
            expense,
        })
        .collect()
}
