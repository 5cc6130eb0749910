// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::config::DEFAULT_REPORT_MONTHS;
use crate::models::{CategoryKind, DateRange};

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Entry amounts are never negative; only derived balances are.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(anyhow!("Amount '{}' must not be negative", s.trim()));
    }
    Ok(d)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_category(conn: &Connection, name: &str, kind: CategoryKind) -> Result<String> {
    let mut stmt =
        conn.prepare("SELECT id FROM categories WHERE name=?1 AND kind=?2 AND active=1")?;
    let id: String = stmt
        .query_row(params![name.trim(), kind.as_str()], |r| r.get(0))
        .with_context(|| format!("{} category '{}' not found", kind, name.trim()))?;
    Ok(id)
}

pub fn debt_exists(conn: &Connection, id: &str) -> Result<bool> {
    let found: Option<i32> = conn
        .query_row("SELECT 1 FROM debts WHERE id=?1", params![id], |r| r.get(0))
        .optional()?;
    Ok(found.is_some())
}

/// Reads `--from`/`--to`, defaulting to the last 12 months ending on `--to`
/// (or today).
pub fn range_from_args(sub: &clap::ArgMatches) -> Result<DateRange> {
    range_with_default(sub, |end| {
        DateRange::last_months(end, DEFAULT_REPORT_MONTHS)
    })
}

/// Like [`range_from_args`], but a missing `--from` means the start of the
/// month `--to` falls in. Budget targets are monthly.
pub fn month_range_from_args(sub: &clap::ArgMatches) -> Result<DateRange> {
    range_with_default(sub, DateRange::month_to_date)
}

fn range_with_default(
    sub: &clap::ArgMatches,
    default: impl FnOnce(NaiveDate) -> DateRange,
) -> Result<DateRange> {
    let end = match sub.get_one::<String>("to") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    match sub.get_one::<String>("from") {
        Some(s) => Ok(DateRange::new(parse_date(s)?, end)?),
        None => Ok(default(end)),
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
