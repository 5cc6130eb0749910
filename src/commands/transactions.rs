// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CategoryKind;
use crate::queries;
use crate::utils::{
    id_for_category, maybe_print_json, parse_amount, parse_date, pretty_table, range_from_args,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle_income(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add_income(conn, sub)?,
        Some(("list", sub)) => list_income(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn handle_expense(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add_expense(conn, sub)?,
        Some(("list", sub)) => list_expense(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn category_arg(
    conn: &Connection,
    sub: &clap::ArgMatches,
    kind: CategoryKind,
) -> Result<Option<String>> {
    match sub.get_one::<String>("category") {
        Some(c) => Ok(Some(id_for_category(conn, c, kind)?)),
        None => Ok(None),
    }
}

fn text_arg(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn add_income(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let gross = parse_amount(sub.get_one::<String>("gross").unwrap())?;
    let deductions = match sub.get_one::<String>("deductions") {
        Some(d) => parse_amount(d)?,
        None => Decimal::ZERO,
    };
    if deductions > gross {
        return Err(anyhow!(
            "Deductions {} exceed gross amount {}",
            deductions,
            gross
        ));
    }
    let category_id = category_arg(conn, sub, CategoryKind::Income)?;
    let kind = text_arg(sub, "kind").unwrap_or_default();
    let note = text_arg(sub, "note");
    queries::insert_income(
        conn,
        date,
        gross,
        deductions,
        category_id.as_deref(),
        &kind,
        note.as_deref(),
    )?;
    println!("Recorded income {} (net) on {}", gross - deductions, date);
    Ok(())
}

fn add_expense(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category_id = category_arg(conn, sub, CategoryKind::Expense)?;
    let kind = text_arg(sub, "kind").unwrap_or_default();
    let note = text_arg(sub, "note");
    queries::insert_expense(
        conn,
        date,
        amount,
        category_id.as_deref(),
        &kind,
        note.as_deref(),
    )?;
    println!("Recorded expense {} on {}", amount, date);
    Ok(())
}

#[derive(Serialize)]
pub struct EntryRow {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub kind: String,
    pub note: String,
}

pub fn income_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<EntryRow>> {
    let range = range_from_args(sub)?;
    let category_id = category_arg(conn, sub, CategoryKind::Income)?;
    let names = category_names(conn, CategoryKind::Income)?;
    Ok(queries::list_incomes(conn, &range, category_id.as_deref())?
        .into_iter()
        .map(|e| EntryRow {
            date: e.date.to_string(),
            amount: format!("{:.2}", e.net),
            category: e
                .category_id
                .as_ref()
                .and_then(|id| names.iter().find(|(cid, _)| cid == id))
                .map(|(_, n)| n.clone())
                .unwrap_or_default(),
            kind: e.kind,
            note: e.note.unwrap_or_default(),
        })
        .collect())
}

pub fn expense_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<EntryRow>> {
    let range = range_from_args(sub)?;
    let category_id = category_arg(conn, sub, CategoryKind::Expense)?;
    Ok(queries::list_expenses(conn, &range, category_id.as_deref())?
        .into_iter()
        .map(|e| EntryRow {
            date: e.date.to_string(),
            amount: format!("{:.2}", e.amount),
            category: e.category_label.unwrap_or_default(),
            kind: e.kind,
            note: e.note.unwrap_or_default(),
        })
        .collect())
}

fn category_names(conn: &Connection, kind: CategoryKind) -> Result<Vec<(String, String)>> {
    Ok(queries::list_categories(conn, Some(kind), true)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

fn print_rows(sub: &clap::ArgMatches, data: Vec<EntryRow>) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| vec![r.date, r.amount, r.category, r.kind, r.note])
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Amount", "Category", "Type", "Note"], rows)
        );
    }
    Ok(())
}

fn list_income(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = income_rows(conn, sub)?;
    print_rows(sub, data)
}

fn list_expense(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = expense_rows(conn, sub)?;
    print_rows(sub, data)
}
