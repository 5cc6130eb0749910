// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::models::{CategoryRollupEntry, ExpenseEntry};

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const TOP_CATEGORIES: usize = 5;

/// Resolver that reads the label the store joined onto the entry.
pub fn label_from_entry(entry: &ExpenseEntry) -> Option<String> {
    entry.category_label.clone()
}

/// `100 * part / total`, or `0` for a zero total. Quotients outside the
/// `Decimal` range fall back to `f64` arithmetic instead of overflowing.
pub fn share_of(part: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    match part.checked_div(total).and_then(|q| q.checked_mul(dec!(100))) {
        Some(pct) => pct.to_f64().unwrap_or(0.0),
        None => match (part.to_f64(), total.to_f64()) {
            (Some(p), Some(t)) if t != 0.0 => p / t * 100.0,
            _ => 0.0,
        },
    }
}

/// Expense totals per category label, largest first. Equal amounts keep the
/// order in which their labels first appeared.
pub fn rollup_categories<F>(expenses: &[ExpenseEntry], resolve: F) -> Vec<CategoryRollupEntry>
where
    F: Fn(&ExpenseEntry) -> Option<String>,
{
    let mut order: Vec<(String, Decimal)> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    for e in expenses {
        let label = resolve(e)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        match slot.get(&label) {
            Some(&i) => order[i].1 += e.amount,
            None => {
                slot.insert(label.clone(), order.len());
                order.push((label, e.amount));
            }
        }
    }

    let total: Decimal = order.iter().map(|(_, amt)| *amt).sum();
    // stable sort keeps first-seen order for ties
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .map(|(category, amount)| CategoryRollupEntry {
            percentage: share_of(amount, total),
            category,
            amount,
        })
        .collect()
}

/// [`rollup_categories`] truncated to the top [`TOP_CATEGORIES`].
pub fn rollup_top_categories<F>(expenses: &[ExpenseEntry], resolve: F) -> Vec<CategoryRollupEntry>
where
    F: Fn(&ExpenseEntry) -> Option<String>,
{
    let mut all = rollup_categories(expenses, resolve);
    all.truncate(TOP_CATEGORIES);
    all
}
