// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashflow::models::{
    FinancialSnapshot, MAX_AMOUNT, PaymentSource, Settings, Transaction, TransactionKind,
};
use cashflow::stats::{compute_snapshot, daily_flow};
use chrono::{Duration, NaiveDate};

use PaymentSource::{Bank, Cash};
use TransactionKind::{Expense, Income};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn tx(id: &str, date: NaiveDate, kind: TransactionKind, source: PaymentSource, amount: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        date,
        content: format!("item {}", id),
        kind,
        source,
        amount,
    }
}

fn settings(cash: i64, bank: i64, daily: i64) -> Settings {
    Settings {
        initial_cash: cash,
        initial_bank: bank,
        daily_cost: daily,
    }
}

#[test]
fn empty_log_reports_initial_balances() {
    let s = compute_snapshot(&[], &settings(1000, 500, 0), today());
    assert_eq!(
        s,
        FinancialSnapshot {
            current_cash: 1000,
            current_bank: 500,
            total: 1500,
            survival_days: 0,
            total_income: 0,
            total_expense: 0,
            today_expense: 0,
            cumulative_saving: 0,
        }
    );
}

#[test]
fn single_income_today() {
    let log = vec![tx("1", today(), Income, Bank, 200)];
    let s = compute_snapshot(&log, &settings(0, 0, 50), today());
    assert_eq!(s.current_cash, 0);
    assert_eq!(s.current_bank, 200);
    assert_eq!(s.total, 200);
    assert_eq!(s.survival_days, 4);
    assert_eq!(s.total_income, 200);
    assert_eq!(s.total_expense, 0);
    assert_eq!(s.today_expense, 0);
    // one budget day, nothing spent
    assert_eq!(s.cumulative_saving, 50);
}

#[test]
fn saving_window_spans_from_first_transaction_inclusive() {
    let log = vec![
        tx("1", today() - Duration::days(2), Expense, Cash, 30),
        tx("2", today(), Expense, Bank, 30),
    ];
    let s = compute_snapshot(&log, &settings(0, 0, 50), today());
    // 3 days * 50 - 60
    assert_eq!(s.cumulative_saving, 90);
    assert_eq!(s.today_expense, 30);
    assert_eq!(s.total_expense, 60);
}

#[test]
fn survival_days_floor_toward_negative_infinity() {
    let s = compute_snapshot(&[], &settings(-120, 0, 50), today());
    assert_eq!(s.total, -120);
    assert_eq!(s.survival_days, -3);

    let log = vec![tx("1", today(), Expense, Cash, 60)];
    let s = compute_snapshot(&log, &settings(0, 0, 50), today());
    assert_eq!(s.survival_days, -2);

    let s = compute_snapshot(&[], &settings(-10, 0, 50), today());
    assert!(s.survival_days <= 0);
    assert_eq!(s.survival_days, -1);
}

#[test]
fn zero_daily_cost_disables_budget_metrics() {
    let log = vec![
        tx("1", today() - Duration::days(30), Expense, Cash, 500),
        tx("2", today(), Income, Bank, 900),
    ];
    let s = compute_snapshot(&log, &settings(100, 100, 0), today());
    assert_eq!(s.survival_days, 0);
    assert_eq!(s.cumulative_saving, 0);
    assert_eq!(s.total, 600);
}

#[test]
fn total_is_exact_sum_of_buckets() {
    let log = vec![
        tx("1", today() - Duration::days(4), Income, Cash, 1_250_000),
        tx("2", today() - Duration::days(3), Expense, Bank, 70_001),
        tx("3", today() - Duration::days(1), Income, Bank, 3),
        tx("4", today(), Expense, Cash, 999_999),
    ];
    let s = compute_snapshot(&log, &settings(7, -13, 80_000), today());
    assert_eq!(s.current_cash, 7 + 1_250_000 - 999_999);
    assert_eq!(s.current_bank, -13 - 70_001 + 3);
    assert_eq!(s.total, s.current_cash + s.current_bank);
    assert_eq!(s.total_income, 1_250_003);
    assert_eq!(s.total_expense, 1_070_000);
}

#[test]
fn todays_cash_expense_moves_cash_and_today_total() {
    let base = vec![
        tx("1", today() - Duration::days(1), Income, Cash, 400),
        tx("2", today(), Expense, Bank, 25),
    ];
    let cfg = settings(100, 200, 40);
    let before = compute_snapshot(&base, &cfg, today());

    let mut with_expense = base.clone();
    with_expense.push(tx("3", today(), Expense, Cash, 75));
    let after = compute_snapshot(&with_expense, &cfg, today());

    assert_eq!(after.current_cash, before.current_cash - 75);
    assert_eq!(after.today_expense, before.today_expense + 75);
    assert_eq!(after.current_bank, before.current_bank);
    assert_eq!(after.total_income, before.total_income);
}

#[test]
fn repeated_computation_is_identical() {
    let log = vec![
        tx("1", today() - Duration::days(10), Expense, Cash, 12),
        tx("2", today(), Income, Bank, 34),
    ];
    let cfg = settings(5, 6, 7);
    let a = compute_snapshot(&log, &cfg, today());
    let b = compute_snapshot(&log, &cfg, today());
    assert_eq!(a, b);
}

#[test]
fn future_dated_history_still_counts_one_budget_day() {
    let log = vec![tx("1", today() + Duration::days(5), Expense, Cash, 10)];
    let s = compute_snapshot(&log, &settings(0, 0, 50), today());
    assert_eq!(s.cumulative_saving, 40);
    assert_eq!(s.today_expense, 0);
}

#[test]
fn removing_earliest_transaction_shrinks_saving_window() {
    let log = vec![
        tx("old", today() - Duration::days(9), Income, Cash, 1000),
        tx("new", today(), Expense, Cash, 20),
    ];
    let cfg = settings(0, 0, 10);
    let full = compute_snapshot(&log, &cfg, today());
    assert_eq!(full.cumulative_saving, 10 * 10 - 20);

    let trimmed = compute_snapshot(&log[1..], &cfg, today());
    assert_eq!(trimmed.cumulative_saving, 10 - 20);
}

#[test]
fn daily_flow_keeps_most_recent_dates() {
    let d = |n: i64| today() - Duration::days(n);
    let log = vec![
        tx("1", d(0), Expense, Cash, 10),
        tx("2", d(0), Income, Bank, 100),
        tx("3", d(0), Expense, Bank, 5),
        tx("4", d(3), Expense, Cash, 7),
        tx("5", d(8), Income, Cash, 50),
    ];
    let flow = daily_flow(&log, 2);
    assert_eq!(flow.len(), 2);
    assert_eq!(flow[0].date, d(3));
    assert_eq!((flow[0].income, flow[0].expense), (0, 7));
    assert_eq!(flow[1].date, d(0));
    assert_eq!((flow[1].income, flow[1].expense), (100, 15));

    assert_eq!(daily_flow(&log, 7).len(), 3);
    assert!(daily_flow(&[], 7).is_empty());
}

#[test]
fn amounts_at_the_limit_add_up_exactly() {
    let log: Vec<Transaction> = (0..5)
        .map(|i| tx(&i.to_string(), today(), Income, Bank, MAX_AMOUNT))
        .collect();
    let cfg = settings(MAX_AMOUNT, MAX_AMOUNT, MAX_AMOUNT);
    let s = compute_snapshot(&log, &cfg, today());
    assert_eq!(s.current_bank, 6 * MAX_AMOUNT);
    assert_eq!(s.total, 7 * MAX_AMOUNT);
    assert_eq!(s.survival_days, 7);
    assert_eq!(s.cumulative_saving, MAX_AMOUNT);
}

#[test]
fn out_of_range_values_saturate_instead_of_overflowing() {
    let log = vec![
        tx("1", today(), Income, Cash, i64::MAX),
        tx("2", today(), Income, Cash, i64::MAX),
        tx("3", today() - Duration::days(2), Expense, Bank, i64::MAX),
    ];
    let s = compute_snapshot(&log, &settings(0, 0, i64::MAX / 2), today());
    assert_eq!(s.total_income, i64::MAX);
    assert_eq!(s.current_cash, i64::MAX);
    assert_eq!(s.current_bank, -i64::MAX);
    assert_eq!(s.total, 0);
    assert_eq!(s.survival_days, 0);
    // 3 days * (MAX / 2) clamps to MAX before the expense is taken off
    assert_eq!(s.cumulative_saving, 0);

    let flow = daily_flow(&log, 7);
    assert_eq!(flow[1].income, i64::MAX);
}
