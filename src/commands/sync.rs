// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::sync::{export_package, import_package};
use crate::utils::opt_arg;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("export", sub)) => {
            let code = export_package(conn, user, Utc::now())?;
            if let Some(out) = opt_arg(sub, "out") {
                std::fs::write(out, &code).with_context(|| format!("Write {}", out))?;
                println!("Sync code for '{}' written to {}", user, out);
            } else {
                println!("{}", code);
            }
        }
        Some(("import", sub)) => {
            let code = match opt_arg(sub, "file") {
                Some(path) => {
                    std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?
                }
                None => opt_arg(sub, "code").unwrap_or_default().to_string(),
            };
            let username = import_package(conn, &code, Utc::now())?;
            println!("Imported data for '{}'", username);
        }
        Some(("status", _)) => match store::last_sync(conn, user)? {
            Some(at) => println!("Last sync for '{}': {}", user, at),
            None => println!("'{}' has never been synced", user),
        },
        _ => {}
    }
    Ok(())
}
