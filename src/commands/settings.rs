// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Config};
use crate::db;
use crate::utils::pretty_table;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-currency", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().trim();
            if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(anyhow!("Invalid currency code '{}'", ccy));
            }
            config::set_currency(conn, ccy)?;
            println!("Currency set to {}", ccy.to_uppercase());
        }
        Some(("show", _)) => {
            let cfg = Config::load(conn, db::db_path()?)?;
            println!(
                "{}",
                pretty_table(
                    &["Setting", "Value"],
                    vec![
                        vec!["database".into(), cfg.db_path.display().to_string()],
                        vec!["currency".into(), cfg.currency],
                        vec!["budget_target".into(), cfg.budget_target.to_string()],
                    ],
                )
            );
        }
        _ => {}
    }
    Ok(())
}
