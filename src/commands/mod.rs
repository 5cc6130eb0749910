// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod debts;
pub mod doctor;
pub mod exporter;
pub mod goals;
pub mod reports;
pub mod settings;
pub mod transactions;

use anyhow::Result;
use rusqlite::Connection;

/// Routes a parsed command line to its handler. Returns `false` when no
/// known subcommand was given.
pub fn dispatch(conn: &Connection, matches: &clap::ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        Some(("category", sub)) => categories::handle(conn, sub)?,
        Some(("income", sub)) => transactions::handle_income(conn, sub)?,
        Some(("expense", sub)) => transactions::handle_expense(conn, sub)?,
        Some(("debt", sub)) => debts::handle(conn, sub)?,
        Some(("report", sub)) => reports::handle(conn, sub)?,
        Some(("budget", sub)) => budgets::handle(conn, sub)?,
        Some(("goal", sub)) => goals::handle(conn, sub)?,
        Some(("export", sub)) => exporter::handle(conn, sub)?,
        Some(("config", sub)) => settings::handle(conn, sub)?,
        Some(("doctor", _)) => doctor::handle(conn)?,
        _ => return Ok(false),
    }
    Ok(true)
}
