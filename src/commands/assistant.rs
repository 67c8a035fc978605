// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::assistant::{ExtractionService, GeminiClient, system_prompt};
use crate::commands::stats::snapshot_for;
use crate::models::Transaction;
use crate::store;
use crate::utils::{arg, fmt_money, get_ai_active, today};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ask", sub)) => {
            let message = arg(sub, "message")?;
            let client = GeminiClient::from_env()?;
            let (reply, added) = ask(conn, user, &client, message, today())?;
            if !reply.is_empty() {
                println!("{}", reply);
            }
            if let Some(t) = added {
                println!(
                    "Recorded {} {} on {} for '{}' ({})",
                    t.kind,
                    fmt_money(t.amount),
                    t.date,
                    t.content,
                    t.source
                );
            }
        }
        _ => {}
    }
    Ok(())
}

/// Send `message` to the assistant and store the transaction it extracted, if any.
pub fn ask(
    conn: &Connection,
    user: &str,
    service: &dyn ExtractionService,
    message: &str,
    today: NaiveDate,
) -> Result<(String, Option<Transaction>)> {
    if !get_ai_active(conn)? {
        tracing::warn!(user, "assistant is disabled");
        bail!("The assistant is currently disabled (enable it with `config ai --on`)");
    }
    let snapshot = snapshot_for(conn, user, today)?;
    let extraction = service.extract(&system_prompt(&snapshot), message)?;
    let added = match extraction.call {
        Some(call) => {
            let new = call.into_new_transaction(today)?;
            Some(store::insert_transaction(conn, user, new)?)
        }
        None => None,
    };
    Ok((extraction.reply, added))
}
