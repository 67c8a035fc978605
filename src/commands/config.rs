// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_ai_active, pretty_table, set_ai_active};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ai", sub)) => {
            let active = sub.get_flag("on");
            set_ai_active(conn, active)?;
            tracing::info!(active, "assistant switch changed");
            println!("Assistant {}", if active { "enabled" } else { "disabled" });
        }
        Some(("show", _)) => {
            let rows = vec![vec!["ai_active".to_string(), get_ai_active(conn)?.to_string()]];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
