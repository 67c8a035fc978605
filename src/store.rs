// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user persistence of transactions, settings and sync state.
//!
//! Rows are decoded strictly: a stored transaction that would not pass entry
//! validation is reported as an error instead of being fed to the statistics.

use crate::models::{NewTransaction, Settings, Transaction, ValidationError};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

struct RawRow {
    id: String,
    date: String,
    content: String,
    kind: String,
    source: String,
    amount: i64,
}

impl RawRow {
    fn decode(self) -> Result<Transaction, ValidationError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(self.date.clone()))?;
        let t = Transaction {
            id: self.id,
            date,
            content: self.content,
            kind: self.kind.parse()?,
            source: self.source.parse()?,
            amount: self.amount,
        };
        t.validate()?;
        Ok(t)
    }
}

fn read_raw(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: r.get(0)?,
        date: r.get(1)?,
        content: r.get(2)?,
        kind: r.get(3)?,
        source: r.get(4)?,
        amount: r.get(5)?,
    })
}

/// All transactions of `user`, newest date first, later entries first within a day.
pub fn list_transactions(conn: &Connection, user: &str) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, content, kind, source, amount FROM transactions
         WHERE user_id=?1 ORDER BY date DESC, seq DESC",
    )?;
    let rows = stmt.query_map(params![user], read_raw)?;
    let mut out = Vec::new();
    for row in rows {
        let raw = row?;
        let id = raw.id.clone();
        let t = raw
            .decode()
            .with_context(|| format!("Corrupt transaction '{}' for user '{}'", id, user))?;
        out.push(t);
    }
    tracing::debug!(user, count = out.len(), "loaded transactions");
    Ok(out)
}

pub fn find_transaction(conn: &Connection, user: &str, id: &str) -> Result<Transaction> {
    let raw = conn
        .query_row(
            "SELECT id, date, content, kind, source, amount FROM transactions
             WHERE user_id=?1 AND id=?2",
            params![user, id],
            read_raw,
        )
        .optional()?
        .with_context(|| format!("Transaction '{}' not found", id))?;
    Ok(raw
        .decode()
        .with_context(|| format!("Corrupt transaction '{}' for user '{}'", id, user))?)
}

pub fn insert_transaction(conn: &Connection, user: &str, new: NewTransaction) -> Result<Transaction> {
    new.validate()?;
    let t = new.with_id(Uuid::new_v4().to_string());
    write_transaction(conn, user, &t)?;
    tracing::info!(user, id = %t.id, amount = t.amount, kind = %t.kind, "transaction added");
    Ok(t)
}

fn write_transaction(conn: &Connection, user: &str, t: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, user_id, date, content, kind, source, amount)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            t.id,
            user,
            t.date.to_string(),
            t.content,
            t.kind.as_str(),
            t.source.as_str(),
            t.amount
        ],
    )
    .with_context(|| format!("Insert transaction '{}'", t.id))?;
    Ok(())
}

/// Overwrite every field of an existing transaction except its id.
pub fn update_transaction(conn: &Connection, user: &str, t: &Transaction) -> Result<()> {
    t.validate()?;
    let changed = conn.execute(
        "UPDATE transactions SET date=?1, content=?2, kind=?3, source=?4, amount=?5
         WHERE id=?6 AND user_id=?7",
        params![
            t.date.to_string(),
            t.content.trim(),
            t.kind.as_str(),
            t.source.as_str(),
            t.amount,
            t.id,
            user
        ],
    )?;
    if changed == 0 {
        bail!("Transaction '{}' not found", t.id);
    }
    tracing::info!(user, id = %t.id, "transaction updated");
    Ok(())
}

pub fn delete_transaction(conn: &Connection, user: &str, id: &str) -> Result<()> {
    let changed = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, user],
    )?;
    if changed == 0 {
        bail!("Transaction '{}' not found", id);
    }
    tracing::info!(user, id, "transaction deleted");
    Ok(())
}

/// Replace the whole transaction log of `user`. Ids are kept as given.
pub fn replace_transactions(conn: &Connection, user: &str, items: &[Transaction]) -> Result<()> {
    for t in items {
        t.validate()
            .with_context(|| format!("Invalid transaction '{}'", t.id))?;
    }
    conn.execute("DELETE FROM transactions WHERE user_id=?1", params![user])?;
    // Oldest first, so insertion order matches the listing order.
    for t in items.iter().rev() {
        write_transaction(conn, user, t)?;
    }
    Ok(())
}

/// Settings for `user`; a zeroed row is created on first use.
pub fn get_settings(conn: &Connection, user: &str) -> Result<Settings> {
    let s = conn
        .query_row(
            "SELECT initial_cash, initial_bank, daily_cost FROM settings WHERE user_id=?1",
            params![user],
            |r| {
                Ok(Settings {
                    initial_cash: r.get(0)?,
                    initial_bank: r.get(1)?,
                    daily_cost: r.get(2)?,
                })
            },
        )
        .optional()?;
    match s {
        Some(s) => {
            s.validate()
                .with_context(|| format!("Corrupt settings for user '{}'", user))?;
            Ok(s)
        }
        None => {
            let s = Settings::default();
            save_settings(conn, user, &s)?;
            tracing::debug!(user, "created default settings");
            Ok(s)
        }
    }
}

pub fn save_settings(conn: &Connection, user: &str, s: &Settings) -> Result<()> {
    s.validate()?;
    conn.execute(
        "INSERT INTO settings(user_id, initial_cash, initial_bank, daily_cost) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id) DO UPDATE SET
            initial_cash=excluded.initial_cash,
            initial_bank=excluded.initial_bank,
            daily_cost=excluded.daily_cost,
            updated_at=datetime('now')",
        params![user, s.initial_cash, s.initial_bank, s.daily_cost],
    )?;
    Ok(())
}

pub fn record_sync(conn: &Connection, user: &str, at: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO sync_state(user_id, last_sync) VALUES (?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET last_sync=excluded.last_sync",
        params![user, at],
    )?;
    Ok(())
}

pub fn last_sync(conn: &Connection, user: &str) -> Result<Option<String>> {
    let v = conn
        .query_row(
            "SELECT last_sync FROM sync_state WHERE user_id=?1",
            params![user],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

/// Remove everything stored for `user`. Returns the number of deleted transactions.
pub fn reset_user(conn: &Connection, user: &str) -> Result<usize> {
    let n = conn.execute("DELETE FROM transactions WHERE user_id=?1", params![user])?;
    conn.execute("DELETE FROM settings WHERE user_id=?1", params![user])?;
    conn.execute("DELETE FROM sync_state WHERE user_id=?1", params![user])?;
    tracing::info!(user, transactions = n, "user data reset");
    Ok(n)
}

/// Rows that `list_transactions` would reject, as (user, id, problem).
pub fn validation_issues(conn: &Connection) -> Result<Vec<(String, String, String)>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, content, kind, source, amount, user_id FROM transactions ORDER BY seq",
    )?;
    let mut cur = stmt.query([])?;
    let mut issues = Vec::new();
    while let Some(r) = cur.next()? {
        let user: String = r.get(6)?;
        let id: String = r.get(0)?;
        // A column of the wrong SQLite type is an issue too, not a scan failure.
        let problem = match read_raw(r) {
            Ok(raw) => raw.decode().err().map(|e| e.to_string()),
            Err(e) => Some(e.to_string()),
        };
        if let Some(p) = problem {
            issues.push((user, id, p));
        }
    }
    Ok(issues)
}
