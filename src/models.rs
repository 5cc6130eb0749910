// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }
}

impl FromStr for CategoryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(anyhow!("Invalid category kind '{}' (use income|expense)", other)),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: CategoryKind,
    pub parent_id: Option<String>,
    pub active: bool,
}

/// A category with its children, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatCategory {
    pub category: Category,
    pub depth: usize,
    pub qualified_name: String, // "Parent > Child"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: String,
    pub gross: Decimal,
    pub deductions: Decimal,
    pub net: Decimal, // reconciled by the store, never recomputed here
    pub date: NaiveDate,
    pub category_id: Option<String>,
    pub kind: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Option<String>,
    pub category_label: Option<String>,
    pub kind: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    OnTime,
    Late,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::OnTime => "on_time",
            PaymentStatus::Late => "late",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "on_time" => Ok(PaymentStatus::OnTime),
            "late" => Ok(PaymentStatus::Late),
            other => Err(anyhow!("Invalid payment status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtPayment {
    pub id: String,
    pub debt_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    Card,
    Financing,
    PayrollDeduction,
}

impl DebtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtKind::Card => "card",
            DebtKind::Financing => "financing",
            DebtKind::PayrollDeduction => "payroll_deduction",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DebtKind::Card => "Credit card",
            DebtKind::Financing => "Financing",
            DebtKind::PayrollDeduction => "Payroll deduction",
        }
    }
}

impl FromStr for DebtKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(DebtKind::Card),
            "financing" => Ok(DebtKind::Financing),
            "payroll" | "payroll_deduction" => Ok(DebtKind::PayrollDeduction),
            other => Err(anyhow!(
                "Invalid debt kind '{}' (use card|financing|payroll)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    Active,
    Settled,
}

impl DebtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtStatus::Active => "active",
            DebtStatus::Settled => "settled",
        }
    }
}

impl FromStr for DebtStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(DebtStatus::Active),
            "settled" => Ok(DebtStatus::Settled),
            other => Err(anyhow!("Invalid debt status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub institution: String,
    pub kind: DebtKind,
    pub contracted_amount: Decimal,
    pub installment_amount: Decimal,
    pub total_installments: u32,
    pub monthly_interest: Decimal,
    pub status: DebtStatus,
    pub note: Option<String>,
}

impl Debt {
    pub fn is_active(&self) -> bool {
        self.status == DebtStatus::Active
    }

    /// Moves an active debt to settled. Returns `false` if it was already settled;
    /// there is no way back to active.
    pub fn settle(&mut self) -> bool {
        if self.is_active() {
            self.status = DebtStatus::Settled;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expense: Decimal,
    pub debt_payments: Decimal,
    pub balance: Decimal,
}

impl MonthlyAggregate {
    pub fn empty(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            debt_payments: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    pub fn recompute_balance(&mut self) {
        self.balance = self.income - self.expense - self.debt_payments;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRollupEntry {
    pub category: String,
    pub amount: Decimal,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub total_income: Decimal,
    pub operating_expense: Decimal,
    pub total_debt_payments: Decimal,
    /// Operating expense plus debt payments.
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    /// Contracted principal of active debts, not reduced by payments.
    pub outstanding_principal: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub count: usize,
    pub total_contracted: Decimal,
    pub total_monthly_obligation: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    InProgress,
    Achieved,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Achieved => "achieved",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in_progress" => Ok(GoalStatus::InProgress),
            "achieved" => Ok(GoalStatus::Achieved),
            other => Err(anyhow!("Invalid goal status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub status: GoalStatus,
}

/// Inclusive calendar-date window used to filter every report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window of `months` calendar months ending on `end`.
    pub fn last_months(end: NaiveDate, months: u32) -> Self {
        let start = end
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// From the first day of `end`'s month through `end`.
    pub fn month_to_date(end: NaiveDate) -> Self {
        Self {
            start: end.with_day(1).unwrap_or(end),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
