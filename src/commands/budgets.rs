// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::budget::{BudgetPlan, plan_budget};
use crate::analytics::rollup::label_from_entry;
use crate::config;
use crate::models::DateRange;
use crate::queries;
use crate::utils::{
    fmt_money, maybe_print_json, month_range_from_args, parse_amount, pretty_table, today,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal_macros::dec;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-target", sub)) => {
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            config::set_budget_target(conn, amount)?;
            println!("Budget target set to {}", amount);
        }
        Some(("set-share", sub)) => {
            let cat = sub.get_one::<String>("category").unwrap().trim();
            let percent = parse_amount(sub.get_one::<String>("percent").unwrap())?;
            if percent > dec!(100) {
                return Err(anyhow!("Share {}% is above 100%", percent));
            }
            queries::upsert_budget_share(conn, cat, percent)?;
            println!("Ideal share for {} set to {}%", cat, percent);
        }
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn compute_plan(conn: &Connection, range: &DateRange) -> Result<BudgetPlan> {
    let target = config::budget_target(conn)?;
    let shares = queries::list_budget_shares(conn)?;
    let expenses = queries::list_expenses(conn, range, None)?;
    Ok(plan_budget(target, &shares, &expenses, label_from_entry))
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let range = month_range_from_args(sub)?;
    let plan = compute_plan(conn, &range)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &plan)? {
        return Ok(());
    }
    let ccy = config::currency(conn)?;
    if range.contains(today()) {
        println!("Budget for this month ({} to {})", range.start, range.end);
    } else {
        println!("Budget for {} to {}", range.start, range.end);
    }
    let rows = plan
        .lines
        .iter()
        .map(|l| {
            vec![
                l.category.clone(),
                format!("{}%", l.ideal_percent),
                format!("{:.2}", l.target),
                format!("{:.2}", l.spent),
                format!("{:.0}%", l.percent_used),
                l.status.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Ideal", "Target", "Spent", "Used", "Status"],
            rows
        )
    );
    println!(
        "Target {} | spent {} | remaining {} | {:.1}% used ({})",
        fmt_money(&plan.global_target, &ccy),
        fmt_money(&plan.spent, &ccy),
        fmt_money(&plan.remaining, &ccy),
        plan.percent_used,
        plan.status.as_str()
    );
    for line in plan.over_budget() {
        println!(
            "Over budget: {} +{:.1}%",
            line.category,
            line.percent_used - 100.0
        );
    }
    Ok(())
}
