// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{DebtPayment, ExpenseEntry, IncomeEntry, MonthlyAggregate};

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Folds income (net), expense and debt-payment entries into one aggregate per
/// `YYYY-MM`, ascending. Only months touched by some entry appear.
pub fn aggregate_monthly(
    income: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    payments: &[DebtPayment],
) -> Vec<MonthlyAggregate> {
    let mut map: BTreeMap<String, MonthlyAggregate> = BTreeMap::new();

    for e in income {
        let m = month_key(e.date);
        map.entry(m.clone())
            .or_insert_with(|| MonthlyAggregate::empty(m))
            .income += e.net;
    }
    for e in expenses {
        let m = month_key(e.date);
        map.entry(m.clone())
            .or_insert_with(|| MonthlyAggregate::empty(m))
            .expense += e.amount;
    }
    for p in payments {
        let m = month_key(p.date);
        map.entry(m.clone())
            .or_insert_with(|| MonthlyAggregate::empty(m))
            .debt_payments += p.amount;
    }

    map.into_values()
        .map(|mut agg| {
            agg.recompute_balance();
            agg
        })
        .collect()
}

/// Month-wise sum of two aggregate lists, e.g. computed over disjoint ranges.
pub fn merge_monthly(a: &[MonthlyAggregate], b: &[MonthlyAggregate]) -> Vec<MonthlyAggregate> {
    let mut map: BTreeMap<String, MonthlyAggregate> = BTreeMap::new();
    for agg in a.iter().chain(b) {
        let entry = map
            .entry(agg.month.clone())
            .or_insert_with(|| MonthlyAggregate::empty(agg.month.clone()));
        entry.income += agg.income;
        entry.expense += agg.expense;
        entry.debt_payments += agg.debt_payments;
    }
    map.into_values()
        .map(|mut agg| {
            agg.recompute_balance();
            agg
        })
        .collect()
}
