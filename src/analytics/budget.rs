// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget planning: a global spending target split across categories by an
//! ideal percentage, compared with what was actually spent.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::rollup::share_of;
use crate::models::ExpenseEntry;

pub const WARNING_PERCENT: f64 = 80.0;
pub const OVER_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetShare {
    pub category: String,
    pub ideal_percent: Decimal,
}

pub fn default_shares() -> Vec<BudgetShare> {
    [
        ("Alimentação", dec!(15)),
        ("Lazer", dec!(5)),
        ("Moradia", dec!(30)),
        ("Educação", dec!(5)),
        ("Transporte", dec!(15)),
        ("Saúde", dec!(10)),
        ("Outros", dec!(20)),
    ]
    .into_iter()
    .map(|(category, ideal_percent)| BudgetShare {
        category: category.to_string(),
        ideal_percent,
    })
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn from_percent(percent_used: f64) -> Self {
        if percent_used >= OVER_PERCENT {
            BudgetStatus::Over
        } else if percent_used >= WARNING_PERCENT {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "on track",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Over => "over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub ideal_percent: Decimal,
    pub target: Decimal,
    pub spent: Decimal,
    pub percent_used: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub global_target: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: f64,
    pub status: BudgetStatus,
    pub lines: Vec<BudgetLine>,
}

impl BudgetPlan {
    /// Lines past 100% of their target, worst first.
    pub fn over_budget(&self) -> Vec<&BudgetLine> {
        let mut over: Vec<&BudgetLine> = self
            .lines
            .iter()
            .filter(|l| l.percent_used > OVER_PERCENT)
            .collect();
        over.sort_by(|a, b| b.percent_used.total_cmp(&a.percent_used));
        over
    }
}

pub fn plan_budget<F>(
    global_target: Decimal,
    shares: &[BudgetShare],
    expenses: &[ExpenseEntry],
    resolve: F,
) -> BudgetPlan
where
    F: Fn(&ExpenseEntry) -> Option<String>,
{
    let labelled: Vec<(Option<String>, Decimal)> =
        expenses.iter().map(|e| (resolve(e), e.amount)).collect();

    let lines = shares
        .iter()
        .map(|share| {
            let target = global_target * share.ideal_percent / dec!(100);
            let spent: Decimal = labelled
                .iter()
                .filter(|(label, _)| label.as_deref() == Some(share.category.as_str()))
                .map(|(_, amt)| *amt)
                .sum();
            let percent_used = share_of(spent, target);
            BudgetLine {
                category: share.category.clone(),
                ideal_percent: share.ideal_percent,
                target,
                spent,
                percent_used,
                status: BudgetStatus::from_percent(percent_used),
            }
        })
        .collect();

    let spent: Decimal = labelled.iter().map(|(_, amt)| *amt).sum();
    let percent_used = share_of(spent, global_target);
    BudgetPlan {
        global_target,
        spent,
        remaining: global_target - spent,
        percent_used,
        status: BudgetStatus::from_percent(percent_used),
        lines,
    }
}
