// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{Debt, DebtPayment, ExpenseEntry, IncomeEntry, ReportTotals};

/// Scalar totals for a report window.
///
/// Debt payments are folded into `total_expense` while the monthly breakdown
/// keeps them in their own column, so `net_balance` subtracts them once.
/// Settled debts in `debts` are skipped.
pub fn compute_report_totals(
    income: &[IncomeEntry],
    expenses: &[ExpenseEntry],
    payments: &[DebtPayment],
    debts: &[Debt],
) -> ReportTotals {
    let total_income: Decimal = income.iter().map(|e| e.net).sum();
    let operating_expense: Decimal = expenses.iter().map(|e| e.amount).sum();
    let total_debt_payments: Decimal = payments.iter().map(|p| p.amount).sum();
    let total_expense = operating_expense + total_debt_payments;
    // TODO: subtract recorded payments once installments are tracked per debt
    let outstanding_principal: Decimal = debts
        .iter()
        .filter(|d| d.is_active())
        .map(|d| d.contracted_amount)
        .sum();

    ReportTotals {
        total_income,
        operating_expense,
        total_debt_payments,
        total_expense,
        net_balance: total_income - total_expense,
        outstanding_principal,
    }
}
