// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .help("Start date YYYY-MM-DD (default: 12 months before --to)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("End date YYYY-MM-DD, inclusive (default: today)"),
    )
}

fn month_range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .help("Start date YYYY-MM-DD (default: first day of the month of --to)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("End date YYYY-MM-DD, inclusive (default: today)"),
    )
}

fn report_args(cmd: Command) -> Command {
    json_flags(range_args(cmd)).arg(
        Arg::new("category")
            .long("category")
            .help("Only income/expense rows in this category"),
    )
}

fn opt(name: &'static str) -> Arg {
    Arg::new(name).long(name)
}

fn req(name: &'static str) -> Arg {
    Arg::new(name).long(name).required(true)
}

pub fn build_cli() -> Command {
    Command::new("finsight")
        .about("Personal finance ledger: income, expenses, debts, budgets, goals and reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("category")
                .about("Manage income/expense categories")
                .subcommand(
                    Command::new("add")
                        .arg(req("name"))
                        .arg(req("kind").help("income|expense"))
                        .arg(opt("parent").help("Parent category name (same kind)")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("Flattened category tree")
                        .arg(opt("kind").help("income|expense")),
                ))
                .subcommand(
                    Command::new("tree")
                        .about("Indented category tree")
                        .arg(opt("kind").help("income|expense")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Rename a category or move it under another parent")
                        .arg(req("name"))
                        .arg(req("kind").help("income|expense"))
                        .arg(opt("rename").help("New name"))
                        .arg(opt("parent").help("New parent category name (same kind)"))
                        .arg(
                            Arg::new("no-parent")
                                .long("no-parent")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("parent")
                                .help("Make it a top-level category"),
                        ),
                )
                .subcommand(
                    Command::new("deactivate")
                        .arg(req("name"))
                        .arg(req("kind").help("income|expense")),
                ),
        )
        .subcommand(
            Command::new("income")
                .about("Record and list income")
                .subcommand(
                    Command::new("add")
                        .arg(req("date"))
                        .arg(req("gross"))
                        .arg(opt("deductions"))
                        .arg(opt("category"))
                        .arg(opt("kind").help("e.g. salary, freelance"))
                        .arg(opt("note")),
                )
                .subcommand(json_flags(range_args(
                    Command::new("list").arg(opt("category")),
                ))),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and list expenses")
                .subcommand(
                    Command::new("add")
                        .arg(req("date"))
                        .arg(req("amount"))
                        .arg(opt("category"))
                        .arg(opt("kind").help("e.g. fixed, variable"))
                        .arg(opt("note")),
                )
                .subcommand(json_flags(range_args(
                    Command::new("list").arg(opt("category")),
                ))),
        )
        .subcommand(
            Command::new("debt")
                .about("Track debts and their payments")
                .subcommand(
                    Command::new("add")
                        .arg(req("institution"))
                        .arg(req("kind").help("card|financing|payroll"))
                        .arg(req("contracted"))
                        .arg(req("installment"))
                        .arg(
                            Arg::new("installments")
                                .long("installments")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(opt("interest").help("Monthly interest rate, percent"))
                        .arg(opt("note")),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("active")
                            .long("active")
                            .action(ArgAction::SetTrue)
                            .help("Only active debts"),
                    ),
                ))
                .subcommand(Command::new("settle").arg(req("id")))
                .subcommand(
                    Command::new("pay")
                        .arg(req("id"))
                        .arg(req("date"))
                        .arg(req("amount"))
                        .arg(
                            Arg::new("late")
                                .long("late")
                                .action(ArgAction::SetTrue)
                                .help("Payment was made after its due date"),
                        ),
                )
                .subcommand(
                    Command::new("delete").arg(req("id")).arg(
                        Arg::new("with-payments")
                            .long("with-payments")
                            .action(ArgAction::SetTrue)
                            .help("Also delete the payments recorded for this debt"),
                    ),
                )
                .subcommand(json_flags(Command::new("payments").arg(opt("id"))))
                .subcommand(
                    Command::new("payment-edit")
                        .arg(req("payment"))
                        .arg(opt("date"))
                        .arg(opt("amount"))
                        .arg(
                            Arg::new("late")
                                .long("late")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("on-time"),
                        )
                        .arg(
                            Arg::new("on-time")
                                .long("on-time")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(Command::new("payment-delete").arg(req("payment")))
                .subcommand(json_flags(Command::new("summary"))),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly aggregates, top categories and totals")
                .subcommand(report_args(Command::new("monthly")))
                .subcommand(report_args(Command::new("top")))
                .subcommand(report_args(Command::new("totals")))
                .subcommand(report_args(Command::new("full"))),
        )
        .subcommand(
            Command::new("budget")
                .about("Plan spending against a global target")
                .subcommand(Command::new("set-target").arg(req("amount")))
                .subcommand(
                    Command::new("set-share")
                        .arg(req("category"))
                        .arg(req("percent")),
                )
                .subcommand(json_flags(month_range_args(Command::new("status")))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(req("title"))
                        .arg(req("target"))
                        .arg(req("deadline")),
                )
                .subcommand(
                    Command::new("contribute")
                        .arg(req("id"))
                        .arg(req("amount")),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("export")
                .about("Export reports")
                .subcommand(range_args(
                    Command::new("report")
                        .arg(req("format").help("csv|json"))
                        .arg(req("out")),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Preferences")
                .subcommand(Command::new("set-currency").arg(req("currency")))
                .subcommand(Command::new("show")),
        )
        .subcommand(Command::new("doctor").about("Check data consistency"))
}
