// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::reports::load_report;
use crate::utils::range_from_args;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => export_report(conn, sub),
        _ => Ok(()),
    }
}

fn export_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let range = range_from_args(sub)?;
    let report = load_report(conn, &range, None)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["month", "income", "expense", "debt_payments", "balance"])?;
            for m in &report.monthly {
                wtr.write_record([
                    m.month.clone(),
                    m.income.to_string(),
                    m.expense.to_string(),
                    m.debt_payments.to_string(),
                    m.balance.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&report)?)?;
        }
    }
    tracing::info!(path = out, format = %fmt, months = report.monthly.len(), "report exported");
    println!("Exported report to {}", out);
    Ok(())
}
