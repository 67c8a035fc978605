// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_money, maybe_print_json, opt_arg, parse_balance, pretty_table};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = store::get_settings(conn, user)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                let rows = vec![
                    vec!["Initial cash".to_string(), fmt_money(s.initial_cash)],
                    vec!["Initial bank".to_string(), fmt_money(s.initial_bank)],
                    vec!["Daily budget".to_string(), fmt_money(s.daily_cost)],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => set(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let mut s = store::get_settings(conn, user)?;
    let cash = opt_arg(sub, "cash").map(parse_balance).transpose()?;
    let bank = opt_arg(sub, "bank").map(parse_balance).transpose()?;
    let daily = opt_arg(sub, "daily").map(parse_balance).transpose()?;
    if cash.is_none() && bank.is_none() && daily.is_none() {
        bail!("Nothing to set, pass --cash, --bank or --daily");
    }
    if let Some(d) = daily {
        if d < 0 {
            bail!("Daily budget cannot be negative");
        }
        s.daily_cost = d;
    }
    if let Some(c) = cash {
        s.initial_cash = c;
    }
    if let Some(b) = bank {
        s.initial_bank = b;
    }
    store::save_settings(conn, user, &s)?;
    tracing::info!(user, ?s, "settings updated");
    println!(
        "Settings: cash {}, bank {}, daily budget {}",
        fmt_money(s.initial_cash),
        fmt_money(s.initial_bank),
        fmt_money(s.daily_cost)
    );
    Ok(())
}
