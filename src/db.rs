// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Finsight", "finsight"));

pub const DB_ENV: &str = "FINSIGHT_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(DB_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p.trim()));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("finsight.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        parent_id TEXT,
        active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(name, kind)
    );

    CREATE TABLE IF NOT EXISTS incomes(
        id TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        gross TEXT NOT NULL,
        deductions TEXT NOT NULL DEFAULT '0',
        net TEXT NOT NULL,
        category_id TEXT,
        kind TEXT NOT NULL DEFAULT '',
        note TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_incomes_date ON incomes(date);

    CREATE TABLE IF NOT EXISTS expenses(
        id TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        category_id TEXT,
        kind TEXT NOT NULL DEFAULT '',
        note TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

    CREATE TABLE IF NOT EXISTS debts(
        id TEXT PRIMARY KEY,
        institution TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('card','financing','payroll_deduction')),
        contracted_amount TEXT NOT NULL,
        installment_amount TEXT NOT NULL,
        total_installments INTEGER NOT NULL,
        monthly_interest TEXT NOT NULL DEFAULT '0',
        status TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','settled')),
        note TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- no FK on debt_id: doctor reports payments left behind by removed debts
    CREATE TABLE IF NOT EXISTS debt_payments(
        id TEXT PRIMARY KEY,
        debt_id TEXT NOT NULL,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'on_time' CHECK(status IN ('on_time','late')),
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_debt_payments_date ON debt_payments(date);

    CREATE TABLE IF NOT EXISTS budget_shares(
        category TEXT PRIMARY KEY,
        ideal_percent TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS goals(
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        target_amount TEXT NOT NULL,
        current_amount TEXT NOT NULL DEFAULT '0',
        deadline TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'in_progress' CHECK(status IN ('in_progress','achieved')),
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}
