// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const DEFAULT_CURRENCY: &str = "BRL";
pub const DEFAULT_BUDGET_TARGET: Decimal = dec!(5000);
pub const DEFAULT_REPORT_MONTHS: u32 = 12;

/// Runtime settings: where the data lives plus the user preferences kept in
/// the `settings` table.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub currency: String,
    pub budget_target: Decimal,
}

impl Config {
    pub fn load(conn: &Connection, db_path: PathBuf) -> Result<Self> {
        Ok(Self {
            db_path,
            currency: currency(conn)?,
            budget_target: budget_target(conn)?,
        })
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    tracing::info!(key, value, "setting updated");
    Ok(())
}

pub fn currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "currency")?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set_setting(conn, "currency", &ccy.trim().to_uppercase())
}

pub fn budget_target(conn: &Connection) -> Result<Decimal> {
    match get_setting(conn, "budget_target")? {
        Some(s) => s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid budget target '{}' in settings", s)),
        None => Ok(DEFAULT_BUDGET_TARGET),
    }
}

pub fn set_budget_target(conn: &Connection, amount: Decimal) -> Result<()> {
    set_setting(conn, "budget_target", &amount.to_string())
}
