// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed reads and writes against the SQLite store. Every row leaves this
//! module as a validated record; amounts are kept as TEXT and parsed as
//! exact decimals.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;

use crate::analytics::budget::{BudgetShare, default_shares};
use crate::models::{
    Category, CategoryKind, DateRange, Debt, DebtPayment, DebtStatus, ExpenseEntry, Goal,
    IncomeEntry, PaymentStatus,
};
use crate::utils::new_id;

fn dec_at(r: &Row, idx: usize, what: &str) -> Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' in store", what, s))
}

fn date_at(r: &Row, idx: usize) -> Result<NaiveDate> {
    let s: String = r.get(idx)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .with_context(|| format!("Invalid stored date '{}'", s))
}

// Categories

fn category_from_row(r: &Row) -> Result<Category> {
    let kind_s: String = r.get(2)?;
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        kind: kind_s.parse()?,
        parent_id: r.get(3)?,
        active: r.get(4)?,
    })
}

/// Looks a category up by name whether or not it is still active.
pub fn find_category(conn: &Connection, name: &str, kind: CategoryKind) -> Result<Option<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, parent_id, active FROM categories WHERE name=?1 AND kind=?2",
    )?;
    let mut cur = stmt.query(params![name.trim(), kind.as_str()])?;
    match cur.next()? {
        Some(r) => Ok(Some(category_from_row(r)?)),
        None => Ok(None),
    }
}

pub fn list_categories(
    conn: &Connection,
    kind: Option<CategoryKind>,
    include_inactive: bool,
) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, parent_id, active FROM categories
         WHERE (?1 IS NULL OR kind=?1) AND (?2 OR active=1)
         ORDER BY name",
    )?;
    let mut cur = stmt.query(params![kind.map(|k| k.as_str()), include_inactive])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        out.push(category_from_row(r)?);
    }
    tracing::debug!(count = out.len(), "categories fetched");
    Ok(out)
}

pub fn insert_category(
    conn: &Connection,
    name: &str,
    kind: CategoryKind,
    parent_id: Option<&str>,
) -> Result<String> {
    let id = new_id();
    conn.execute(
        "INSERT INTO categories(id, name, kind, parent_id) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, kind.as_str(), parent_id],
    )
    .with_context(|| format!("Add {} category '{}'", kind, name))?;
    tracing::info!(%id, name, %kind, "category added");
    Ok(id)
}

pub fn update_category(
    conn: &Connection,
    id: &str,
    name: &str,
    parent_id: Option<&str>,
) -> Result<()> {
    conn.execute(
        "UPDATE categories SET name=?1, parent_id=?2 WHERE id=?3",
        params![name, parent_id, id],
    )
    .with_context(|| format!("Update category '{}'", name))?;
    tracing::info!(%id, name, parent = ?parent_id, "category updated");
    Ok(())
}

/// Brings a deactivated category back under `parent_id`.
pub fn reactivate_category(conn: &Connection, id: &str, parent_id: Option<&str>) -> Result<()> {
    conn.execute(
        "UPDATE categories SET active=1, parent_id=?1 WHERE id=?2",
        params![parent_id, id],
    )?;
    tracing::info!(%id, "category reactivated");
    Ok(())
}

/// Soft delete: the row stays so history keeps its label.
pub fn deactivate_category(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn.execute("UPDATE categories SET active=0 WHERE id=?1", params![id])?;
    Ok(n > 0)
}

// Income and expenses

pub fn list_incomes(
    conn: &Connection,
    range: &DateRange,
    category_id: Option<&str>,
) -> Result<Vec<IncomeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, gross, deductions, net, date, category_id, kind, note FROM incomes
         WHERE date >= ?1 AND date <= ?2 AND (?3 IS NULL OR category_id=?3)
         ORDER BY date, created_at",
    )?;
    let mut cur = stmt.query(params![
        range.start.to_string(),
        range.end.to_string(),
        category_id
    ])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        out.push(IncomeEntry {
            id: r.get(0)?,
            gross: dec_at(r, 1, "gross amount")?,
            deductions: dec_at(r, 2, "deductions")?,
            net: dec_at(r, 3, "net amount")?,
            date: date_at(r, 4)?,
            category_id: r.get(5)?,
            kind: r.get(6)?,
            note: r.get(7)?,
        });
    }
    tracing::debug!(count = out.len(), start = %range.start, end = %range.end, "incomes fetched");
    Ok(out)
}

/// Stores an income with `net = gross - deductions` reconciled up front.
pub fn insert_income(
    conn: &Connection,
    date: NaiveDate,
    gross: Decimal,
    deductions: Decimal,
    category_id: Option<&str>,
    kind: &str,
    note: Option<&str>,
) -> Result<String> {
    let id = new_id();
    let net = gross - deductions;
    conn.execute(
        "INSERT INTO incomes(id, date, gross, deductions, net, category_id, kind, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            date.to_string(),
            gross.to_string(),
            deductions.to_string(),
            net.to_string(),
            category_id,
            kind,
            note
        ],
    )?;
    tracing::info!(%id, %date, %net, "income recorded");
    Ok(id)
}

pub fn list_expenses(
    conn: &Connection,
    range: &DateRange,
    category_id: Option<&str>,
) -> Result<Vec<ExpenseEntry>> {
    let mut stmt = conn.prepare(
        "SELECT e.id, e.amount, e.date, e.category_id, c.name, e.kind, e.note
         FROM expenses e LEFT JOIN categories c ON e.category_id=c.id
         WHERE e.date >= ?1 AND e.date <= ?2 AND (?3 IS NULL OR e.category_id=?3)
         ORDER BY e.date, e.created_at",
    )?;
    let mut cur = stmt.query(params![
        range.start.to_string(),
        range.end.to_string(),
        category_id
    ])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        out.push(ExpenseEntry {
            id: r.get(0)?,
            amount: dec_at(r, 1, "amount")?,
            date: date_at(r, 2)?,
            category_id: r.get(3)?,
            category_label: r.get(4)?,
            kind: r.get(5)?,
            note: r.get(6)?,
        });
    }
    tracing::debug!(count = out.len(), start = %range.start, end = %range.end, "expenses fetched");
    Ok(out)
}

pub fn insert_expense(
    conn: &Connection,
    date: NaiveDate,
    amount: Decimal,
    category_id: Option<&str>,
    kind: &str,
    note: Option<&str>,
) -> Result<String> {
    let id = new_id();
    conn.execute(
        "INSERT INTO expenses(id, date, amount, category_id, kind, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![id, date.to_string(), amount.to_string(), category_id, kind, note],
    )?;
    tracing::info!(%id, %date, %amount, "expense recorded");
    Ok(id)
}

// Debts

fn debt_from_row(r: &Row) -> Result<Debt> {
    let kind_s: String = r.get(2)?;
    let status_s: String = r.get(7)?;
    Ok(Debt {
        id: r.get(0)?,
        institution: r.get(1)?,
        kind: kind_s.parse()?,
        contracted_amount: dec_at(r, 3, "contracted amount")?,
        installment_amount: dec_at(r, 4, "installment amount")?,
        total_installments: r.get(5)?,
        monthly_interest: dec_at(r, 6, "monthly interest")?,
        status: status_s.parse()?,
        note: r.get(8)?,
    })
}

const DEBT_COLUMNS: &str = "id, institution, kind, contracted_amount, installment_amount, \
     total_installments, monthly_interest, status, note";

pub fn list_debts(conn: &Connection, status: Option<DebtStatus>) -> Result<Vec<Debt>> {
    let sql = format!(
        "SELECT {} FROM debts WHERE (?1 IS NULL OR status=?1) ORDER BY created_at DESC, id",
        DEBT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut cur = stmt.query(params![status.map(|s| s.as_str())])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        out.push(debt_from_row(r)?);
    }
    tracing::debug!(count = out.len(), "debts fetched");
    Ok(out)
}

pub fn get_debt(conn: &Connection, id: &str) -> Result<Option<Debt>> {
    let sql = format!("SELECT {} FROM debts WHERE id=?1", DEBT_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let mut cur = stmt.query(params![id])?;
    match cur.next()? {
        Some(r) => Ok(Some(debt_from_row(r)?)),
        None => Ok(None),
    }
}

pub fn insert_debt(conn: &Connection, debt: &Debt) -> Result<()> {
    conn.execute(
        "INSERT INTO debts(id, institution, kind, contracted_amount, installment_amount,
                           total_installments, monthly_interest, status, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            debt.id,
            debt.institution,
            debt.kind.as_str(),
            debt.contracted_amount.to_string(),
            debt.installment_amount.to_string(),
            debt.total_installments,
            debt.monthly_interest.to_string(),
            debt.status.as_str(),
            debt.note
        ],
    )?;
    tracing::info!(id = %debt.id, institution = %debt.institution, "debt added");
    Ok(())
}

pub fn update_debt_status(conn: &Connection, id: &str, status: DebtStatus) -> Result<()> {
    conn.execute(
        "UPDATE debts SET status=?1 WHERE id=?2",
        params![status.as_str(), id],
    )?;
    tracing::info!(%id, status = status.as_str(), "debt status changed");
    Ok(())
}

/// Removes a debt, together with its payments when `with_payments` is set.
/// Returns the number of payments deleted.
pub fn delete_debt(conn: &Connection, id: &str, with_payments: bool) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let removed = if with_payments {
        tx.execute("DELETE FROM debt_payments WHERE debt_id=?1", params![id])?
    } else {
        0
    };
    tx.execute("DELETE FROM debts WHERE id=?1", params![id])?;
    tx.commit()?;
    tracing::info!(%id, payments = removed, "debt deleted");
    Ok(removed)
}

pub fn count_debt_payments(conn: &Connection, debt_id: &str) -> Result<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM debt_payments WHERE debt_id=?1",
        params![debt_id],
        |r| r.get(0),
    )?;
    Ok(n as usize)
}

fn payment_from_row(r: &Row) -> Result<DebtPayment> {
    let status_s: String = r.get(4)?;
    Ok(DebtPayment {
        id: r.get(0)?,
        debt_id: r.get(1)?,
        amount: dec_at(r, 2, "payment amount")?,
        date: date_at(r, 3)?,
        status: status_s.parse::<PaymentStatus>()?,
    })
}

pub fn get_debt_payment(conn: &Connection, id: &str) -> Result<Option<DebtPayment>> {
    let mut stmt = conn
        .prepare("SELECT id, debt_id, amount, date, status FROM debt_payments WHERE id=?1")?;
    let mut cur = stmt.query(params![id])?;
    match cur.next()? {
        Some(r) => Ok(Some(payment_from_row(r)?)),
        None => Ok(None),
    }
}

pub fn update_debt_payment(conn: &Connection, p: &DebtPayment) -> Result<()> {
    conn.execute(
        "UPDATE debt_payments SET date=?1, amount=?2, status=?3 WHERE id=?4",
        params![p.date.to_string(), p.amount.to_string(), p.status.as_str(), p.id],
    )?;
    tracing::info!(id = %p.id, amount = %p.amount, "debt payment updated");
    Ok(())
}

pub fn delete_debt_payment(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM debt_payments WHERE id=?1", params![id])?;
    if n > 0 {
        tracing::info!(%id, "debt payment deleted");
    }
    Ok(n > 0)
}

pub fn list_debt_payments(
    conn: &Connection,
    range: Option<&DateRange>,
    debt_id: Option<&str>,
) -> Result<Vec<DebtPayment>> {
    let (start, end) = match range {
        Some(r) => (Some(r.start.to_string()), Some(r.end.to_string())),
        None => (None, None),
    };
    let mut stmt = conn.prepare(
        "SELECT id, debt_id, amount, date, status FROM debt_payments
         WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)
           AND (?3 IS NULL OR debt_id=?3)
         ORDER BY date, created_at",
    )?;
    let mut cur = stmt.query(params![start, end, debt_id])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        out.push(payment_from_row(r)?);
    }
    tracing::debug!(count = out.len(), "debt payments fetched");
    Ok(out)
}

pub fn insert_debt_payment(
    conn: &Connection,
    debt_id: &str,
    date: NaiveDate,
    amount: Decimal,
    status: PaymentStatus,
) -> Result<String> {
    let id = new_id();
    conn.execute(
        "INSERT INTO debt_payments(id, debt_id, date, amount, status) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, debt_id, date.to_string(), amount.to_string(), status.as_str()],
    )?;
    tracing::info!(%id, %debt_id, %amount, "debt payment recorded");
    Ok(id)
}

// Budget shares

/// Stored shares, or the built-in split when none were configured.
pub fn list_budget_shares(conn: &Connection) -> Result<Vec<BudgetShare>> {
    let mut stmt =
        conn.prepare("SELECT category, ideal_percent FROM budget_shares ORDER BY category")?;
    let mut cur = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        out.push(BudgetShare {
            category: r.get(0)?,
            ideal_percent: dec_at(r, 1, "ideal percent")?,
        });
    }
    if out.is_empty() {
        return Ok(default_shares());
    }
    Ok(out)
}

pub fn upsert_budget_share(conn: &Connection, category: &str, percent: Decimal) -> Result<()> {
    conn.execute(
        "INSERT INTO budget_shares(category, ideal_percent) VALUES (?1, ?2)
         ON CONFLICT(category) DO UPDATE SET ideal_percent=excluded.ideal_percent",
        params![category, percent.to_string()],
    )?;
    Ok(())
}

// Goals

fn goal_from_row(r: &Row) -> Result<Goal> {
    let status_s: String = r.get(5)?;
    Ok(Goal {
        id: r.get(0)?,
        title: r.get(1)?,
        target_amount: dec_at(r, 2, "goal target")?,
        current_amount: dec_at(r, 3, "goal amount")?,
        deadline: date_at(r, 4)?,
        status: status_s.parse()?,
    })
}

pub fn list_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, target_amount, current_amount, deadline, status FROM goals
         ORDER BY deadline, title",
    )?;
    let mut cur = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        out.push(goal_from_row(r)?);
    }
    Ok(out)
}

pub fn get_goal(conn: &Connection, id: &str) -> Result<Option<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, target_amount, current_amount, deadline, status FROM goals
         WHERE id=?1",
    )?;
    let mut cur = stmt.query(params![id])?;
    match cur.next()? {
        Some(r) => Ok(Some(goal_from_row(r)?)),
        None => Ok(None),
    }
}

pub fn insert_goal(conn: &Connection, goal: &Goal) -> Result<()> {
    conn.execute(
        "INSERT INTO goals(id, title, target_amount, current_amount, deadline, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            goal.id,
            goal.title,
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.deadline.to_string(),
            goal.status.as_str()
        ],
    )?;
    tracing::info!(id = %goal.id, title = %goal.title, "goal added");
    Ok(())
}

pub fn update_goal_progress(conn: &Connection, goal: &Goal) -> Result<()> {
    conn.execute(
        "UPDATE goals SET current_amount=?1, status=?2 WHERE id=?3",
        params![
            goal.current_amount.to_string(),
            goal.status.as_str(),
            goal.id
        ],
    )?;
    Ok(())
}
