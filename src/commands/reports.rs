// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::rollup::label_from_entry;
use crate::analytics::{Report, build_report};
use crate::config;
use crate::models::{CategoryKind, DateRange, DebtStatus};
use crate::queries;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, range_from_args};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("top", sub)) => top(conn, sub)?,
        Some(("totals", sub)) => totals(conn, sub)?,
        Some(("full", sub)) => full(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn category_id(conn: &Connection, name: &str, kind: CategoryKind) -> Result<Option<String>> {
    let id: Option<String> = conn
        .query_row(
            "SELECT id FROM categories WHERE name=?1 AND kind=?2",
            params![name.trim(), kind.as_str()],
            |r| r.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Fetches the rows for `range` and folds them into a report.
///
/// A category filter applies to income and expenses by name; a side without a
/// category of that name contributes nothing. Debt payments and active debts
/// are never category filtered.
pub fn load_report(conn: &Connection, range: &DateRange, category: Option<&str>) -> Result<Report> {
    let (income, expenses) = match category {
        None => (
            queries::list_incomes(conn, range, None)?,
            queries::list_expenses(conn, range, None)?,
        ),
        Some(name) => {
            let inc_id = category_id(conn, name, CategoryKind::Income)?;
            let exp_id = category_id(conn, name, CategoryKind::Expense)?;
            if inc_id.is_none() && exp_id.is_none() {
                return Err(anyhow!("Category '{}' not found", name.trim()));
            }
            let income = match inc_id {
                Some(id) => queries::list_incomes(conn, range, Some(&id))?,
                None => Vec::new(),
            };
            let expenses = match exp_id {
                Some(id) => queries::list_expenses(conn, range, Some(&id))?,
                None => Vec::new(),
            };
            (income, expenses)
        }
    };
    let payments = queries::list_debt_payments(conn, Some(range), None)?;
    let debts = queries::list_debts(conn, Some(DebtStatus::Active))?;
    Ok(build_report(
        &income,
        &expenses,
        &payments,
        &debts,
        label_from_entry,
    ))
}

fn report_for(conn: &Connection, sub: &clap::ArgMatches) -> Result<Report> {
    let range = range_from_args(sub)?;
    let category = sub.get_one::<String>("category").map(|s| s.as_str());
    load_report(conn, &range, category)
}

pub fn monthly_rows(report: &Report) -> Vec<Vec<String>> {
    report
        .monthly
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                format!("{:.2}", m.income),
                format!("{:.2}", m.expense),
                format!("{:.2}", m.debt_payments),
                format!("{:.2}", m.balance),
            ]
        })
        .collect()
}

const MONTHLY_HEADERS: [&str; 5] = ["Month", "Income", "Expense", "Debt payments", "Balance"];

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let report = report_for(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report.monthly)? {
        println!("{}", pretty_table(&MONTHLY_HEADERS, monthly_rows(&report)));
    }
    Ok(())
}

fn top_rows(report: &Report) -> Vec<Vec<String>> {
    report
        .top_categories
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                format!("{:.2}", c.amount),
                format!("{:.1}%", c.percentage),
            ]
        })
        .collect()
}

fn top(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let report = report_for(conn, sub)?;
    if !maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &report.top_categories,
    )? {
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Share"], top_rows(&report))
        );
    }
    Ok(())
}

fn totals_rows(report: &Report, ccy: &str) -> Vec<Vec<String>> {
    let t = &report.totals;
    vec![
        vec!["Income".into(), fmt_money(&t.total_income, ccy)],
        vec!["Expenses".into(), fmt_money(&t.operating_expense, ccy)],
        vec!["Debt payments".into(), fmt_money(&t.total_debt_payments, ccy)],
        vec![
            "Total outflow (expenses + debt payments)".into(),
            fmt_money(&t.total_expense, ccy),
        ],
        vec!["Net balance".into(), fmt_money(&t.net_balance, ccy)],
        vec![
            "Outstanding principal (active debts)".into(),
            fmt_money(&t.outstanding_principal, ccy),
        ],
    ]
}

fn totals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let report = report_for(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report.totals)? {
        let ccy = config::currency(conn)?;
        println!(
            "{}",
            pretty_table(&["Total", "Amount"], totals_rows(&report, &ccy))
        );
    }
    Ok(())
}

fn full(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let report = report_for(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let ccy = config::currency(conn)?;
        println!("{}", pretty_table(&MONTHLY_HEADERS, monthly_rows(&report)));
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Share"], top_rows(&report))
        );
        println!(
            "{}",
            pretty_table(&["Total", "Amount"], totals_rows(&report, &ccy))
        );
    }
    Ok(())
}
