// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over already-fetched rows. Nothing in here touches the
//! database or logs; inputs are never mutated.

pub mod budget;
pub mod category_tree;
pub mod debts;
pub mod goals;
pub mod monthly;
pub mod rollup;
pub mod totals;

use serde::Serialize;

use crate::models::{
    CategoryRollupEntry, Debt, DebtPayment, ExpenseEntry, IncomeEntry, MonthlyAggregate,
    ReportTotals,
};

pub use category_tree::{build_category_tree, category_tree_flat, flatten_category_tree};
pub use debts::summarize_debts;
pub use monthly::{aggregate_monthly, merge_monthly};
pub use rollup::{rollup_categories, rollup_top_categories};
pub use totals::compute_report_totals;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub monthly: Vec<MonthlyAggregate>,
    pub top_categories: Vec<CategoryRollupEntry>,
    pub totals: ReportTotals,
}

pub fn build_report<F>(
    income: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    payments: &[DebtPayment],
    debts: &[Debt],
    resolve: F,
) -> Report
where
    F: Fn(&ExpenseEntry) -> Option<String>,
{
    Report {
        monthly: aggregate_monthly(income, expenses, payments),
        top_categories: rollup_top_categories(expenses, resolve),
        totals: compute_report_totals(income, expenses, payments, debts),
    }
}
