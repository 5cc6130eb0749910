// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::Datelike;
use common::{conn, date, run};
use finsight::analytics::budget::BudgetStatus;
use finsight::commands::budgets::compute_plan;
use finsight::commands::categories::flat_categories;
use finsight::commands::doctor::find_issues;
use finsight::commands::exporter;
use finsight::error::ReportError;
use finsight::models::{CategoryKind, PaymentStatus};
use finsight::utils::{month_range_from_args, range_from_args, today};
use finsight::{config, queries};
use rusqlite::params;
use rust_decimal_macros::dec;
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn category_tree_through_cli() {
    let conn = conn();
    run(&conn, &["category", "add", "--name", "Transporte", "--kind", "expense"]).unwrap();
    run(
        &conn,
        &["category", "add", "--name", "Carro", "--kind", "expense", "--parent", " Transporte "],
    )
    .unwrap();
    run(&conn, &["category", "add", "--name", "Bônus", "--kind", "income"]).unwrap();

    let flat = flat_categories(&conn, Some(CategoryKind::Expense)).unwrap();
    let names: Vec<&str> = flat.iter().map(|f| f.qualified_name.as_str()).collect();
    assert_eq!(names, ["Transporte", "Transporte > Carro"]);
    assert_eq!(flat[1].depth, 1);
}

#[test]
fn deactivated_parent_promotes_child() {
    let conn = conn();
    run(&conn, &["category", "add", "--name", "Casa", "--kind", "expense"]).unwrap();
    run(
        &conn,
        &["category", "add", "--name", "Luz", "--kind", "expense", "--parent", "Casa"],
    )
    .unwrap();
    run(&conn, &["category", "deactivate", "--name", "Casa", "--kind", "expense"]).unwrap();

    let flat = flat_categories(&conn, None).unwrap();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].qualified_name, "Luz");
    assert_eq!(flat[0].depth, 0);

    let issues = find_issues(&conn).unwrap();
    assert_eq!(issues, vec![vec!["category_orphan".to_string(), "Luz".to_string()]]);
}

#[test]
fn doctor_flags_cycles_and_dangling_payments() {
    let conn = conn();
    conn.execute(
        "INSERT INTO categories(id, name, kind, parent_id) VALUES ('a','A','expense','b'), ('b','B','expense','a')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO debt_payments(id, debt_id, date, amount) VALUES ('p1','gone','2024-01-05','10')",
        [],
    )
    .unwrap();

    assert!(flat_categories(&conn, None).is_err());
    let kinds: Vec<String> = find_issues(&conn)
        .unwrap()
        .into_iter()
        .map(|r| r[0].clone())
        .collect();
    assert_eq!(kinds, ["category_cycle", "category_cycle", "payment_missing_debt"]);
}

#[test]
fn budget_share_and_target_are_stored() {
    let conn = conn();
    assert_eq!(queries::list_budget_shares(&conn).unwrap().len(), 7);
    run(&conn, &["budget", "set-target", "--amount", "8000"]).unwrap();
    run(&conn, &["budget", "set-share", "--category", "Moradia", "--percent", "35"]).unwrap();
    assert_eq!(config::budget_target(&conn).unwrap(), dec!(8000));
    let shares = queries::list_budget_shares(&conn).unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].ideal_percent, dec!(35));
    assert!(run(&conn, &["budget", "set-share", "--category", "X", "--percent", "120"]).is_err());
}

#[test]
fn goal_contribution_updates_status() {
    let conn = conn();
    run(
        &conn,
        &["goal", "add", "--title", "Viagem", "--target", "1000", "--deadline", "2024-12-31"],
    )
    .unwrap();
    let id: String = conn
        .query_row("SELECT id FROM goals", [], |r| r.get(0))
        .unwrap();
    run(&conn, &["goal", "contribute", "--id", id.as_str(), "--amount", "1000"]).unwrap();
    let status: String = conn
        .query_row("SELECT status FROM goals WHERE id=?1", params![id], |r| r.get(0))
        .unwrap();
    assert_eq!(status, "achieved");
}

#[test]
fn currency_setting_is_normalized() {
    let conn = conn();
    assert_eq!(config::currency(&conn).unwrap(), "BRL");
    run(&conn, &["config", "set-currency", "--currency", " usd "]).unwrap();
    assert_eq!(config::currency(&conn).unwrap(), "USD");
    assert!(run(&conn, &["config", "set-currency", "--currency", "dollars"]).is_err());
}

fn seed_for_export(conn: &rusqlite::Connection) {
    run(conn, &["income", "add", "--date", "2024-01-15", "--gross", "5000"]).unwrap();
    run(conn, &["expense", "add", "--date", "2024-02-03", "--amount", "800"]).unwrap();
}

#[test]
fn export_report_writes_csv() {
    let conn = conn();
    seed_for_export(&conn);
    let dir = tempdir().unwrap();
    let out = dir.path().join("report.csv");
    let out_str = out.to_string_lossy().into_owned();
    run(
        &conn,
        &[
            "export", "report", "--format", "csv", "--out", out_str.as_str(), "--from", "2024-01-01",
            "--to", "2024-12-31",
        ],
    )
    .unwrap();
    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "month,income,expense,debt_payments,balance",
            "2024-01,5000,0,0,5000",
            "2024-02,0,800,0,-800",
        ]
    );
}

#[test]
fn export_report_writes_json() {
    let conn = conn();
    seed_for_export(&conn);
    let dir = tempdir().unwrap();
    let out = dir.path().join("report.json");
    let out_str = out.to_string_lossy().into_owned();
    run(
        &conn,
        &[
            "export", "report", "--format", "json", "--out", out_str.as_str(), "--from", "2024-01-01",
            "--to", "2024-12-31",
        ],
    )
    .unwrap();
    let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed["monthly"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["monthly"][0]["month"], "2024-01");
    assert_eq!(parsed["top_categories"][0]["category"], "Uncategorized");
}

#[test]
fn export_rejects_unknown_format() {
    let conn = conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("report.xml");
    let out_str = out.to_string_lossy().into_owned();
    let m = finsight::cli::build_cli().get_matches_from([
        "finsight", "export", "report", "--format", "xml", "--out", out_str.as_str(),
    ]);
    let Some(("export", export_m)) = m.subcommand() else {
        panic!("no export subcommand");
    };
    assert!(exporter::handle(&conn, export_m).is_err());
    assert!(!out.exists());
}

fn budget_status_matches(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["finsight", "budget", "status"];
    full.extend_from_slice(args);
    let m = finsight::cli::build_cli().get_matches_from(full);
    let Some(("budget", budget)) = m.subcommand() else {
        panic!("no budget subcommand");
    };
    let Some(("status", status)) = budget.subcommand() else {
        panic!("no status subcommand");
    };
    status.clone()
}

#[test]
fn budget_status_defaults_to_the_current_month() {
    let conn = conn();
    run(&conn, &["category", "add", "--name", "Moradia", "--kind", "expense"]).unwrap();
    for on in ["2024-01-10", "2024-02-10", "2024-03-10", "2024-04-10"] {
        run(
            &conn,
            &["expense", "add", "--date", on, "--amount", "1200", "--category", "Moradia"],
        )
        .unwrap();
    }

    let sub = budget_status_matches(&["--to", "2024-04-20"]);
    let month = month_range_from_args(&sub).unwrap();
    assert_eq!((month.start, month.end), (date("2024-04-01"), date("2024-04-20")));

    let plan = compute_plan(&conn, &month).unwrap();
    let moradia = plan.lines.iter().find(|l| l.category == "Moradia").unwrap();
    assert_eq!(moradia.target, dec!(1500));
    assert_eq!(moradia.spent, dec!(1200));
    assert_eq!(moradia.status, BudgetStatus::Warning);

    // a yearly window against a monthly target overshoots
    let year = compute_plan(&conn, &range_from_args(&sub).unwrap()).unwrap();
    let moradia = year.lines.iter().find(|l| l.category == "Moradia").unwrap();
    assert_eq!(moradia.status, BudgetStatus::Over);

    let bare = month_range_from_args(&budget_status_matches(&[])).unwrap();
    assert_eq!(bare.end, today());
    assert_eq!(bare.start, today().with_day(1).unwrap());
    assert!(run(&conn, &["budget", "status", "--to", "2024-04-20"]).is_ok());
}

#[test]
fn category_edit_renames_and_moves() {
    let conn = conn();
    for name in ["Casa", "Contas", "Luz"] {
        run(&conn, &["category", "add", "--name", name, "--kind", "expense"]).unwrap();
    }
    run(
        &conn,
        &["category", "edit", "--name", "Luz", "--kind", "expense", "--parent", "Contas", "--rename", "Energia"],
    )
    .unwrap();
    run(
        &conn,
        &["category", "edit", "--name", "Contas", "--kind", "expense", "--parent", "Casa"],
    )
    .unwrap();
    let names: Vec<String> = flat_categories(&conn, None)
        .unwrap()
        .into_iter()
        .map(|f| f.qualified_name)
        .collect();
    assert_eq!(names, ["Casa", "Casa > Contas", "Casa > Contas > Energia"]);

    // Casa under its own grandchild would close a loop
    let err = run(
        &conn,
        &["category", "edit", "--name", "Casa", "--kind", "expense", "--parent", "Energia"],
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReportError>(),
        Some(ReportError::CycleDetected { .. })
    ));
    assert!(run(&conn, &["category", "edit", "--name", "Casa", "--kind", "expense", "--parent", "Casa"]).is_err());
    assert!(run(&conn, &["category", "edit", "--name", "Casa", "--kind", "expense", "--rename", "Contas"]).is_err());

    run(&conn, &["category", "edit", "--name", "Energia", "--kind", "expense", "--no-parent"]).unwrap();
    let flat = flat_categories(&conn, None).unwrap();
    let energia = flat.iter().find(|f| f.category.name == "Energia").unwrap();
    assert_eq!(energia.depth, 0);
    assert!(find_issues(&conn).unwrap().is_empty());
}

#[test]
fn re_adding_a_deactivated_category_reactivates_it() {
    let conn = conn();
    run(&conn, &["category", "add", "--name", "Lazer", "--kind", "expense"]).unwrap();
    run(&conn, &["category", "deactivate", "--name", "Lazer", "--kind", "expense"]).unwrap();
    assert!(flat_categories(&conn, None).unwrap().is_empty());

    run(&conn, &["category", "add", "--name", "Lazer", "--kind", "expense"]).unwrap();
    let flat = flat_categories(&conn, None).unwrap();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].category.name, "Lazer");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let err = run(&conn, &["category", "add", "--name", "Lazer", "--kind", "expense"]).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

fn add_card_debt(conn: &rusqlite::Connection) -> String {
    run(
        conn,
        &[
            "debt", "add", "--institution", "Banco Y", "--kind", "card", "--contracted", "3000",
            "--installment", "300", "--installments", "10",
        ],
    )
    .unwrap();
    conn.query_row("SELECT id FROM debts", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn debt_delete_guards_recorded_payments() {
    let conn = conn();
    let id = add_card_debt(&conn);
    run(&conn, &["debt", "pay", "--id", id.as_str(), "--date", "2024-03-05", "--amount", "300"]).unwrap();

    assert!(run(&conn, &["debt", "delete", "--id", id.as_str()]).is_err());
    assert!(queries::get_debt(&conn, &id).unwrap().is_some());

    run(&conn, &["debt", "delete", "--id", id.as_str(), "--with-payments"]).unwrap();
    assert!(queries::get_debt(&conn, &id).unwrap().is_none());
    assert!(queries::list_debt_payments(&conn, None, None).unwrap().is_empty());
    assert!(find_issues(&conn).unwrap().is_empty());
    assert!(run(&conn, &["debt", "delete", "--id", id.as_str()]).is_err());
}

#[test]
fn debt_payment_can_be_edited_and_deleted() {
    let conn = conn();
    let id = add_card_debt(&conn);
    run(&conn, &["debt", "pay", "--id", id.as_str(), "--date", "2024-03-05", "--amount", "300"]).unwrap();
    let pid = queries::list_debt_payments(&conn, None, Some(id.as_str())).unwrap()[0].id.clone();

    run(
        &conn,
        &["debt", "payment-edit", "--payment", pid.as_str(), "--amount", "320", "--date", "2024-03-12", "--late"],
    )
    .unwrap();
    let p = queries::get_debt_payment(&conn, &pid).unwrap().unwrap();
    assert_eq!(p.amount, dec!(320));
    assert_eq!(p.date, date("2024-03-12"));
    assert_eq!(p.status, PaymentStatus::Late);
    assert!(run(&conn, &["debt", "payment-edit", "--payment", pid.as_str(), "--amount=-1"]).is_err());

    run(&conn, &["debt", "payment-delete", "--payment", pid.as_str()]).unwrap();
    assert!(queries::get_debt_payment(&conn, &pid).unwrap().is_none());
    assert!(run(&conn, &["debt", "payment-delete", "--payment", pid.as_str()]).is_err());
    run(&conn, &["debt", "delete", "--id", id.as_str()]).unwrap();
}

#[test]
fn corrupt_budget_target_only_affects_budget_commands() {
    let conn = conn();
    config::set_setting(&conn, "budget_target", "not-a-number").unwrap();
    run(&conn, &["category", "add", "--name", "Lazer", "--kind", "expense"]).unwrap();
    run(&conn, &["report", "totals", "--from", "2024-01-01", "--to", "2024-01-31"]).unwrap();
    assert!(run(&conn, &["budget", "status"]).is_err());
}
