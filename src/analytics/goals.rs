// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use super::rollup::share_of;
use crate::models::{Goal, GoalStatus};

/// Percent of `target` reached, capped at 100.
pub fn goal_progress(current: Decimal, target: Decimal) -> f64 {
    if target <= Decimal::ZERO {
        return 0.0;
    }
    share_of(current, target).min(100.0)
}

/// Adds `amount` to the goal and marks it achieved once the target is met.
pub fn contribute(goal: &mut Goal, amount: Decimal) {
    goal.current_amount += amount;
    if goal.current_amount >= goal.target_amount {
        goal.status = GoalStatus::Achieved;
    }
}
