// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::analytics::category_tree::cyclic_category_ids;
use crate::queries;
use crate::utils::{debt_exists, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Parent cycles among active categories
    let active = queries::list_categories(conn, None, false)?;
    for id in cyclic_category_ids(&active) {
        let name = active
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        tracing::warn!(%id, %name, "category parent cycle");
        rows.push(vec!["category_cycle".into(), name]);
    }

    // 2) Active categories whose parent is inactive or gone; shown as roots
    let active_ids: HashSet<&str> = active.iter().map(|c| c.id.as_str()).collect();
    for c in &active {
        if let Some(pid) = c.parent_id.as_deref() {
            if !active_ids.contains(pid) {
                tracing::warn!(id = %c.id, parent = pid, "orphan category promoted to root");
                rows.push(vec!["category_orphan".into(), c.name.clone()]);
            }
        }
    }

    // 3) Payments pointing at debts that no longer exist
    for p in queries::list_debt_payments(conn, None, None)? {
        if !debt_exists(conn, &p.debt_id)? {
            tracing::warn!(payment = %p.id, debt = %p.debt_id, "payment for missing debt");
            rows.push(vec![
                "payment_missing_debt".into(),
                format!("{} {}", p.date, p.debt_id),
            ]);
        }
    }

    Ok(rows)
}
