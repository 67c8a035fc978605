// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Portable sync packages: one user's transactions and settings bundled as
//! base64-encoded JSON, for moving data between machines.
//!
//! Import replaces the user's data wholesale (last write wins).

use crate::models::{Settings, Transaction};
use crate::store;
use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageUser {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPackage {
    pub user: Option<PackageUser>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub settings: Option<Settings>,
    pub timestamp: Option<String>,
}

pub fn encode(pkg: &SyncPackage) -> Result<String> {
    let json = serde_json::to_vec(pkg)?;
    Ok(STANDARD.encode(json))
}

pub fn decode(code: &str) -> Result<SyncPackage> {
    let compact: String = code.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .context("Sync code is not valid base64")?;
    let pkg: SyncPackage =
        serde_json::from_slice(&bytes).context("Sync code does not contain a valid package")?;
    Ok(pkg)
}

/// Bundle `user`'s data and record the export as a sync.
pub fn export_package(conn: &Connection, user: &str, now: DateTime<Utc>) -> Result<String> {
    let transactions = store::list_transactions(conn, user)?;
    let settings = store::get_settings(conn, user)?;
    let timestamp = now.to_rfc3339();
    let pkg = SyncPackage {
        user: Some(PackageUser {
            username: user.to_string(),
        }),
        transactions,
        settings: Some(settings),
        timestamp: Some(timestamp.clone()),
    };
    let code = encode(&pkg)?;
    store::record_sync(conn, user, &timestamp)?;
    tracing::info!(user, transactions = pkg.transactions.len(), "exported sync package");
    Ok(code)
}

/// Apply a package and return the username it belonged to. Nothing is written
/// unless the whole package is valid.
pub fn import_package(conn: &mut Connection, code: &str, now: DateTime<Utc>) -> Result<String> {
    let pkg = decode(code)?;
    let username = match pkg.user {
        Some(ref u) if !u.username.trim().is_empty() => u.username.trim().to_string(),
        _ => bail!("Sync package has no username"),
    };

    let tx = conn.transaction()?;
    store::replace_transactions(&tx, &username, &pkg.transactions)?;
    if let Some(ref s) = pkg.settings {
        store::save_settings(&tx, &username, s)?;
    }
    store::record_sync(&tx, &username, &now.to_rfc3339())?;
    tx.commit()?;

    tracing::info!(
        user = %username,
        transactions = pkg.transactions.len(),
        "imported sync package"
    );
    Ok(username)
}
