// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use cashflow::{cli, commands, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cashflow=warn".into()),
        )
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let user = matches
        .get_one::<String>("user")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "default".to_string());
    let db_override = matches.get_one::<String>("db").map(PathBuf::from);
    let (mut conn, path) = db::open_or_init(db_override.as_deref())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, &user, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, &user, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&conn, &user, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&mut conn, &user, sub)?,
        Some(("assistant", sub)) => commands::assistant::handle(&conn, &user, sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&conn, &user, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
