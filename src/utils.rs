// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::MAX_AMOUNT;
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};

const UA: &str = concat!(
    "cashflow/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/cashflow)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// The caller's local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parse a positive whole amount. Group separators and currency marks are
/// ignored, so "1.500.000", "1,500,000" and "1 500 000đ" are all 1500000.
/// Values above [`MAX_AMOUNT`] are rejected.
pub fn parse_amount(s: &str) -> Result<i64> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Err(anyhow!("Invalid amount '{}', expected a positive number", s.trim()));
    }
    bounded(digits, s)
}

fn bounded(digits: &str, input: &str) -> Result<i64> {
    let v = digits
        .parse::<i64>()
        .ok()
        .filter(|v| *v <= MAX_AMOUNT);
    match v {
        Some(v) => Ok(v),
        None => bail!(
            "Amount '{}' is too large, the limit is {}",
            input.trim(),
            fmt_money(MAX_AMOUNT)
        ),
    }
}

/// Like [`parse_amount`] but allows zero and a leading minus sign.
pub fn parse_balance(s: &str) -> Result<i64> {
    let t = s.trim();
    let (neg, rest) = match t.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, t),
    };
    let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(anyhow!("Invalid amount '{}'", t));
    }
    let v = match digits.trim_start_matches('0') {
        "" => 0,
        d => bounded(d, t)?,
    };
    Ok(if neg { -v } else { v })
}

/// Format with '.' thousands separators, e.g. -1234567 -> "-1.234.567".
pub fn fmt_money(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if v < 0 {
        out.insert(0, '-');
    }
    out
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// A required string argument, trimmed.
pub fn arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .with_context(|| format!("Missing required argument --{}", name))
}

pub fn opt_arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Installation-wide flags
pub fn get_ai_active(conn: &Connection) -> Result<bool> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM app_config WHERE key='ai_active'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.map(|s| s == "true").unwrap_or(true))
}

pub fn set_ai_active(conn: &Connection, active: bool) -> Result<()> {
    conn.execute(
        "INSERT INTO app_config(key, value) VALUES('ai_active', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![if active { "true" } else { "false" }],
    )?;
    Ok(())
}
