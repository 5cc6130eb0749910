// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::summarize_debts;
use crate::config;
use crate::models::{Debt, DebtKind, DebtStatus, PaymentStatus};
use crate::queries;
use crate::utils::{fmt_money, maybe_print_json, new_id, parse_amount, parse_date, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("settle", sub)) => settle(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        Some(("payments", sub)) => payments(conn, sub)?,
        Some(("payment-edit", sub)) => payment_edit(conn, sub)?,
        Some(("payment-delete", sub)) => {
            let id = sub.get_one::<String>("payment").unwrap().trim();
            if !queries::delete_debt_payment(conn, id)? {
                return Err(anyhow!("Payment '{}' not found", id));
            }
            println!("Deleted payment {}", id);
        }
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let institution = sub.get_one::<String>("institution").unwrap().trim();
    let kind: DebtKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let contracted = parse_amount(sub.get_one::<String>("contracted").unwrap())?;
    let installment = parse_amount(sub.get_one::<String>("installment").unwrap())?;
    let installments = *sub.get_one::<u32>("installments").unwrap();
    let interest = match sub.get_one::<String>("interest") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };
    let debt = Debt {
        id: new_id(),
        institution: institution.to_string(),
        kind,
        contracted_amount: contracted,
        installment_amount: installment,
        total_installments: installments,
        monthly_interest: interest,
        status: DebtStatus::Active,
        note: sub.get_one::<String>("note").map(|s| s.trim().to_string()),
    };
    queries::insert_debt(conn, &debt)?;
    println!(
        "Added {} debt at {} ({} x {}) id={}",
        kind.label(),
        institution,
        installments,
        installment,
        debt.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let status = sub.get_flag("active").then_some(DebtStatus::Active);
    let debts = queries::list_debts(conn, status)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &debts)? {
        let rows = debts
            .into_iter()
            .map(|d| {
                vec![
                    d.id,
                    d.institution,
                    d.kind.label().to_string(),
                    format!("{:.2}", d.contracted_amount),
                    format!("{:.2}", d.installment_amount),
                    d.total_installments.to_string(),
                    d.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Institution",
                    "Type",
                    "Contracted",
                    "Installment",
                    "Installments",
                    "Status"
                ],
                rows
            )
        );
    }
    Ok(())
}

fn settle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut debt = queries::get_debt(conn, id)?.ok_or_else(|| anyhow!("Debt '{}' not found", id))?;
    if !debt.settle() {
        return Err(anyhow!("Debt '{}' is already settled", id));
    }
    queries::update_debt_status(conn, &debt.id, debt.status)?;
    println!("Debt at {} marked as settled", debt.institution);
    Ok(())
}

fn pay(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let status = if sub.get_flag("late") {
        PaymentStatus::Late
    } else {
        PaymentStatus::OnTime
    };
    let debt = queries::get_debt(conn, id)?.ok_or_else(|| anyhow!("Debt '{}' not found", id))?;
    if !debt.is_active() {
        tracing::warn!(%id, "payment recorded against a settled debt");
    }
    queries::insert_debt_payment(conn, &debt.id, date, amount, status)?;
    println!("Recorded payment of {} to {} on {}", amount, debt.institution, date);
    Ok(())
}

/// Payments keep a debt alive unless `--with-payments` removes them too.
fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let debt = queries::get_debt(conn, id)?.ok_or_else(|| anyhow!("Debt '{}' not found", id))?;
    let with_payments = sub.get_flag("with-payments");
    let n = queries::count_debt_payments(conn, &debt.id)?;
    if n > 0 && !with_payments {
        return Err(anyhow!(
            "Debt at {} has {} recorded payment(s); pass --with-payments to delete them too",
            debt.institution,
            n
        ));
    }
    let removed = queries::delete_debt(conn, &debt.id, with_payments)?;
    println!(
        "Deleted debt at {} ({} payment(s) removed)",
        debt.institution, removed
    );
    Ok(())
}

fn payment_edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("payment").unwrap().trim();
    let mut p = queries::get_debt_payment(conn, id)?
        .ok_or_else(|| anyhow!("Payment '{}' not found", id))?;
    if let Some(d) = sub.get_one::<String>("date") {
        p.date = parse_date(d)?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        p.amount = parse_amount(a)?;
    }
    if sub.get_flag("late") {
        p.status = PaymentStatus::Late;
    } else if sub.get_flag("on-time") {
        p.status = PaymentStatus::OnTime;
    }
    queries::update_debt_payment(conn, &p)?;
    println!(
        "Payment {}: {} on {} ({})",
        p.id,
        p.amount,
        p.date,
        p.status.as_str()
    );
    Ok(())
}

fn payments(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let debt_id = sub.get_one::<String>("id").map(|s| s.trim());
    let data = queries::list_debt_payments(conn, None, debt_id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    p.debt_id,
                    format!("{:.2}", p.amount),
                    p.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Debt", "Amount", "Status"], rows)
        );
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let debts = queries::list_debts(conn, None)?;
    let s = summarize_debts(&debts);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let ccy = config::currency(conn)?;
        println!(
            "{}",
            pretty_table(
                &["Active debts", "Total contracted", "Monthly obligation"],
                vec![vec![
                    s.count.to_string(),
                    fmt_money(&s.total_contracted, &ccy),
                    fmt_money(&s.total_monthly_obligation, &ccy),
                ]],
            )
        );
    }
    Ok(())
}
