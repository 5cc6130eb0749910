// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use finsight::models::{
    Category, CategoryKind, Debt, DebtKind, DebtPayment, DebtStatus, ExpenseEntry, IncomeEntry,
    PaymentStatus,
};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn cat(id: &str, name: &str, parent: Option<&str>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        kind: CategoryKind::Expense,
        parent_id: parent.map(|p| p.to_string()),
        active: true,
    }
}

pub fn income(net: Decimal, on: &str) -> IncomeEntry {
    IncomeEntry {
        id: format!("inc-{}", on),
        gross: net,
        deductions: Decimal::ZERO,
        net,
        date: date(on),
        category_id: None,
        kind: "salary".into(),
        note: None,
    }
}

pub fn expense(amount: Decimal, on: &str, label: Option<&str>) -> ExpenseEntry {
    ExpenseEntry {
        id: format!("exp-{}", on),
        amount,
        date: date(on),
        category_id: None,
        category_label: label.map(|l| l.to_string()),
        kind: String::new(),
        note: None,
    }
}

pub fn payment(amount: Decimal, on: &str) -> DebtPayment {
    DebtPayment {
        id: format!("pay-{}", on),
        debt_id: "debt-1".into(),
        amount,
        date: date(on),
        status: PaymentStatus::OnTime,
    }
}

pub fn debt(id: &str, contracted: Decimal, installment: Decimal, status: DebtStatus) -> Debt {
    Debt {
        id: id.to_string(),
        institution: "Banco".into(),
        kind: DebtKind::Financing,
        contracted_amount: contracted,
        installment_amount: installment,
        total_installments: 12,
        monthly_interest: Decimal::ZERO,
        status,
        note: None,
    }
}

pub fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    finsight::db::init_schema(&conn).unwrap();
    conn
}

/// Runs `finsight <args>` against `conn` through the real CLI parser.
pub fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["finsight"];
    full.extend_from_slice(args);
    let matches = finsight::cli::build_cli().try_get_matches_from(full)?;
    assert!(finsight::commands::dispatch(conn, &matches)?);
    Ok(())
}
