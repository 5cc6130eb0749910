// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::goals::{contribute, goal_progress};
use crate::models::{Goal, GoalStatus};
use crate::queries;
use crate::utils::{maybe_print_json, new_id, parse_amount, parse_date, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let title = sub.get_one::<String>("title").unwrap().trim().to_string();
            let target = parse_amount(sub.get_one::<String>("target").unwrap())?;
            if target.is_zero() {
                return Err(anyhow!("Goal target must be greater than zero"));
            }
            let deadline = parse_date(sub.get_one::<String>("deadline").unwrap())?;
            let goal = Goal {
                id: new_id(),
                title,
                target_amount: target,
                current_amount: Decimal::ZERO,
                deadline,
                status: GoalStatus::InProgress,
            };
            queries::insert_goal(conn, &goal)?;
            println!("Added goal '{}' id={}", goal.title, goal.id);
        }
        Some(("contribute", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            let mut goal =
                queries::get_goal(conn, id)?.ok_or_else(|| anyhow!("Goal '{}' not found", id))?;
            contribute(&mut goal, amount);
            queries::update_goal_progress(conn, &goal)?;
            println!(
                "{}: {:.2} / {:.2} ({:.0}%)",
                goal.title,
                goal.current_amount,
                goal.target_amount,
                goal_progress(goal.current_amount, goal.target_amount)
            );
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    #[serde(flatten)]
    goal: Goal,
    progress: f64,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<GoalRow> = queries::list_goals(conn)?
        .into_iter()
        .map(|goal| GoalRow {
            progress: goal_progress(goal.current_amount, goal.target_amount),
            goal,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.goal.id,
                    r.goal.title,
                    format!("{:.2}", r.goal.current_amount),
                    format!("{:.2}", r.goal.target_amount),
                    format!("{:.0}%", r.progress),
                    r.goal.deadline.to_string(),
                    r.goal.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Goal", "Saved", "Target", "Progress", "Deadline", "Status"],
                rows
            )
        );
    }
    Ok(())
}
