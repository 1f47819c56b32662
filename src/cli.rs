// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .allow_hyphen_values(true)
            .help("Amount; the sign comes from --type or the category"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .required(required)
            .help("Category key, e.g. food_groceries"),
    )
    .arg(Arg::new("title").long("title").help("Description"))
    .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
    .arg(
        Arg::new("type")
            .long("type")
            .value_parser(["income", "expense"]),
    )
    .arg(Arg::new("receipt").long("receipt").help("Receipt image URI"))
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .version(crate_version!())
        .about("Personal finance tracker: transactions, budgets, categories, reports")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the data file (default: platform data dir)"),
        )
        .subcommand(
            Command::new("init")
                .about("Create the data file")
                .arg(
                    Arg::new("demo")
                        .long("demo")
                        .action(ArgAction::SetTrue)
                        .help("Seed sample transactions and budgets"),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(tx_fields(Command::new("add"), true))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("category_prefix")
                                .long("category-prefix")
                                .help("Only categories starting with this key"),
                        )
                        .arg(
                            Arg::new("filter")
                                .long("filter")
                                .value_parser(["all", "income", "expenses"])
                                .default_value("all"),
                        )
                        .arg(Arg::new("search").long("search").default_value(""))
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .value_parser(["date-desc", "date-asc", "amount-desc", "amount-asc"])
                                .default_value("date-desc"),
                        ),
                ))
                .subcommand(tx_fields(
                    Command::new("edit").arg(Arg::new("id").long("id").required(true)),
                    false,
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("budget")
                .about("Budgets")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_parser(["weekly", "monthly", "yearly"])
                                .default_value("monthly"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("category").long("category").required(true)))
                .subcommand(json_flags(Command::new("status"))),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(Command::new("add").arg(Arg::new("name").long("name").required(true)))
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("report")
                .about("Reports")
                .subcommand(json_flags(Command::new("overview")))
                .subcommand(json_flags(Command::new("compare")))
                .subcommand(json_flags(
                    Command::new("spending")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (default: this month)")),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Settings")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Back up data")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("json")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore data from a backup")
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("json")
                                .help("csv|json"),
                        ),
                ),
        )
}
