// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Debt, DebtSummary};

pub fn summarize_debts(debts: &[Debt]) -> DebtSummary {
    debts
        .iter()
        .filter(|d| d.is_active())
        .fold(DebtSummary::default(), |mut acc, d| {
            acc.count += 1;
            acc.total_contracted += d.contracted_amount;
            acc.total_monthly_obligation += d.installment_amount;
            acc
        })
}
