// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::FinancialSnapshot;
use crate::stats::{compute_snapshot, daily_flow};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, opt_arg, parse_date, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("daily", sub)) => daily(conn, user, sub),
        _ => show(conn, user, m),
    }
}

/// Load the user's data and compute the snapshot as of `as_of`.
pub fn snapshot_for(conn: &Connection, user: &str, as_of: NaiveDate) -> Result<FinancialSnapshot> {
    let transactions = store::list_transactions(conn, user)?;
    let settings = store::get_settings(conn, user)?;
    Ok(compute_snapshot(&transactions, &settings, as_of))
}

fn show(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    let as_of = match opt_arg(m, "date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let s = snapshot_for(conn, user, as_of)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Cash".into(), fmt_money(s.current_cash)],
        vec!["Bank".into(), fmt_money(s.current_bank)],
        vec!["Total".into(), fmt_money(s.total)],
        vec!["Survival days".into(), s.survival_days.to_string()],
        vec!["Total income".into(), fmt_money(s.total_income)],
        vec!["Total expense".into(), fmt_money(s.total_expense)],
        vec![format!("Spent on {}", as_of), fmt_money(s.today_expense)],
        vec!["Cumulative saving".into(), fmt_money(s.cumulative_saving)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    if s.survival_days < 0 || s.total < 0 {
        println!("Warning: balances are in deficit");
    }
    Ok(())
}

fn daily(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let days = sub.get_one::<usize>("days").copied().unwrap_or(7);
    let transactions = store::list_transactions(conn, user)?;
    let data = daily_flow(&transactions, days);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|d| {
                vec![
                    d.date.to_string(),
                    fmt_money(d.income),
                    fmt_money(d.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Income", "Expense"], rows));
    }
    Ok(())
}
