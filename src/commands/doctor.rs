// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows: Vec<Vec<String>> = store::validation_issues(conn)?
        .into_iter()
        .map(|(user, id, problem)| vec![user, id, problem])
        .collect();

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["User", "Transaction", "Issue"], rows));
    }
    Ok(())
}
