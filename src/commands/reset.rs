// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        bail!("Refusing to delete data of '{}' without --yes", user);
    }
    let n = store::reset_user(conn, user)?;
    println!("Deleted {} transactions and the settings of '{}'", n, user);
    Ok(())
}
