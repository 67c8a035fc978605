// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewTransaction, PaymentSource, Transaction, TransactionKind};
use crate::store;
use crate::utils::{arg, fmt_money, maybe_print_json, opt_arg, parse_amount, parse_date, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, user, sub)?,
        Some(("list", sub)) => list(conn, user, sub)?,
        Some(("edit", sub)) => edit(conn, user, sub)?,
        Some(("rm", sub)) => {
            let id = arg(sub, "id")?;
            store::delete_transaction(conn, user, id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let content = arg(sub, "content")?.to_string();
    let amount = parse_amount(arg(sub, "amount")?)?;
    let kind: TransactionKind = arg(sub, "kind")?.parse()?;
    let source: PaymentSource = match opt_arg(sub, "source") {
        Some(s) => s.parse()?,
        None => PaymentSource::Cash,
    };
    let date = match opt_arg(sub, "date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    let t = store::insert_transaction(
        conn,
        user,
        NewTransaction {
            date,
            content,
            kind,
            source,
            amount,
        },
    )?;
    println!(
        "Recorded {} {} on {} for '{}' ({}) [{}]",
        t.kind,
        fmt_money(t.amount),
        t.date,
        t.content,
        t.source,
        t.id
    );
    Ok(())
}

fn edit(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id")?;
    let mut t = store::find_transaction(conn, user, id)?;
    if let Some(c) = opt_arg(sub, "content") {
        t.content = c.to_string();
    }
    if let Some(a) = opt_arg(sub, "amount") {
        t.amount = parse_amount(a)?;
    }
    if let Some(k) = opt_arg(sub, "kind") {
        t.kind = k.parse()?;
    }
    if let Some(s) = opt_arg(sub, "source") {
        t.source = s.parse()?;
    }
    if let Some(d) = opt_arg(sub, "date") {
        t.date = parse_date(d)?;
    }
    store::update_transaction(conn, user, &t)?;
    println!("Updated transaction {}", t.id);
    Ok(())
}

fn list(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, user, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.content.clone(),
                    t.kind.to_string(),
                    t.source.to_string(),
                    fmt_money(t.amount),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Content", "Type", "Source", "Amount", "ID"], rows)
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let mut data = store::list_transactions(conn, user)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
