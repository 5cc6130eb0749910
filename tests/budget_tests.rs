// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{date, expense};
use finsight::analytics::budget::{BudgetShare, BudgetStatus, default_shares, plan_budget};
use finsight::analytics::goals::{contribute, goal_progress};
use finsight::analytics::rollup::{label_from_entry, share_of};
use finsight::models::{Goal, GoalStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn default_shares_cover_the_whole_target() {
    let total: Decimal = default_shares().iter().map(|s| s.ideal_percent).sum();
    assert_eq!(total, dec!(100));
}

#[test]
fn plan_splits_target_and_flags_status() {
    let shares = vec![
        BudgetShare {
            category: "Moradia".into(),
            ideal_percent: dec!(30),
        },
        BudgetShare {
            category: "Lazer".into(),
            ideal_percent: dec!(5),
        },
        BudgetShare {
            category: "Saúde".into(),
            ideal_percent: dec!(10),
        },
    ];
    let exp = vec![
        expense(dec!(1300), "2024-01-05", Some("Moradia")),
        expense(dec!(300), "2024-01-06", Some("Lazer")),
        expense(dec!(100), "2024-01-07", Some("Saúde")),
        expense(dec!(50), "2024-01-08", None),
    ];
    let plan = plan_budget(dec!(5000), &shares, &exp, label_from_entry);

    assert_eq!(plan.lines[0].target, dec!(1500));
    assert_eq!(plan.lines[0].status, BudgetStatus::Warning);
    assert_eq!(plan.lines[1].target, dec!(250));
    assert_eq!(plan.lines[1].status, BudgetStatus::Over);
    assert!((plan.lines[1].percent_used - 120.0).abs() < 1e-9);
    assert_eq!(plan.lines[2].status, BudgetStatus::OnTrack);

    assert_eq!(plan.spent, dec!(1750));
    assert_eq!(plan.remaining, dec!(3250));
    assert!((plan.percent_used - 35.0).abs() < 1e-9);

    let over: Vec<&str> = plan.over_budget().iter().map(|l| l.category.as_str()).collect();
    assert_eq!(over, ["Lazer"]);
}

#[test]
fn zero_target_never_divides() {
    let plan = plan_budget(
        Decimal::ZERO,
        &default_shares(),
        &[expense(dec!(10), "2024-01-01", Some("Lazer"))],
        label_from_entry,
    );
    assert_eq!(plan.percent_used, 0.0);
    assert!(plan.lines.iter().all(|l| l.percent_used == 0.0));
    assert_eq!(plan.remaining, dec!(-10));
}

#[test]
fn goal_progress_is_capped() {
    assert!((goal_progress(dec!(650), dec!(1000)) - 65.0).abs() < 1e-9);
    assert_eq!(goal_progress(dec!(1500), dec!(1000)), 100.0);
    assert_eq!(goal_progress(dec!(10), Decimal::ZERO), 0.0);
}

#[test]
fn contributing_past_target_achieves_goal() {
    let mut goal = Goal {
        id: "g1".into(),
        title: "Reserva".into(),
        target_amount: dec!(1000),
        current_amount: dec!(650),
        deadline: date("2024-02-29"),
        status: GoalStatus::InProgress,
    };
    contribute(&mut goal, dec!(200));
    assert_eq!(goal.status, GoalStatus::InProgress);
    contribute(&mut goal, dec!(150));
    assert_eq!(goal.current_amount, dec!(1000));
    assert_eq!(goal.status, GoalStatus::Achieved);
}

#[test]
fn tiny_denominators_do_not_overflow() {
    let tiny = dec!(0.0000000000000000000001);
    let pct = share_of(dec!(1000000), tiny);
    assert!(pct.is_finite());
    assert!(pct > 1e29);

    assert_eq!(goal_progress(dec!(5), tiny), 100.0);

    let plan = plan_budget(
        tiny,
        &default_shares(),
        &[expense(dec!(10), "2024-01-01", Some("Lazer"))],
        label_from_entry,
    );
    assert_eq!(plan.status, BudgetStatus::Over);
    let lazer = plan.lines.iter().find(|l| l.category == "Lazer").unwrap();
    assert_eq!(lazer.status, BudgetStatus::Over);
}
