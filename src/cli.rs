// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, value_parser};

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
        Arg::new("content")
            .long("content")
            .required(required)
            .help("What the money was for"),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .help("Whole amount; separators like 1.500.000 are fine"),
    )
    .arg(
        Arg::new("kind")
            .long("kind")
            .required(required)
            .help("income | expense"),
    )
    .arg(
        Arg::new("source")
            .long("source")
            .help("cash | bank, new transactions default to cash"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD, defaults to today"),
    )
}

pub fn build_cli() -> Command {
    Command::new("cashflow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track cash and bank balances, survival days and daily-budget savings")
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .env("CASHFLOW_USER")
                .default_value("default")
                .help("Whose data to work on"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("CASHFLOW_DB")
                .help("SQLite file to use instead of the platform data dir"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(tx_fields(
                    Command::new("add").about("Record a transaction"),
                    true,
                ))
                .subcommand(json_flags(
                    Command::new("list").about("List transactions, newest first").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(
                    tx_fields(Command::new("edit").about("Overwrite fields of a transaction"), false)
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Starting balances and daily budget")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("cash")
                                .long("cash")
                                .allow_hyphen_values(true)
                                .help("Initial cash balance"),
                        )
                        .arg(
                            Arg::new("bank")
                                .long("bank")
                                .allow_hyphen_values(true)
                                .help("Initial bank balance"),
                        )
                        .arg(
                            Arg::new("daily")
                                .long("daily")
                                .help("Daily spending budget, 0 disables tracking"),
                        ),
                ),
        )
        .subcommand(
            json_flags(
                Command::new("stats")
                    .about("Balances, survival days and budget health")
                    .arg(
                        Arg::new("date")
                            .long("date")
                            .help("Evaluate as of this date instead of today"),
                    ),
            )
            .subcommand(json_flags(
                Command::new("daily")
                    .about("Income and expense per day")
                    .arg(
                        Arg::new("days")
                            .long("days")
                            .value_parser(value_parser!(usize))
                            .default_value("7"),
                    ),
            )),
        )
        .subcommand(
            Command::new("sync")
                .about("Move data between machines")
                .subcommand(
                    Command::new("export")
                        .about("Print a sync code for the current user")
                        .arg(Arg::new("out").long("out").help("Write the code to a file")),
                )
                .subcommand(
                    Command::new("import")
                        .about("Replace a user's data with a sync code")
                        .arg(Arg::new("code").long("code"))
                        .arg(Arg::new("file").long("file"))
                        .group(
                            ArgGroup::new("input")
                                .args(["code", "file"])
                                .required(true),
                        ),
                )
                .subcommand(Command::new("status").about("Show when data was last synced")),
        )
        .subcommand(
            Command::new("assistant")
                .about("Chat with the finance assistant")
                .subcommand(
                    Command::new("ask")
                        .arg(Arg::new("message").long("message").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Installation-wide switches")
                .subcommand(
                    Command::new("ai")
                        .about("Enable or disable the assistant")
                        .arg(Arg::new("on").long("on").action(ArgAction::SetTrue))
                        .arg(Arg::new("off").long("off").action(ArgAction::SetTrue))
                        .group(ArgGroup::new("state").args(["on", "off"]).required(true)),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all data of the current user")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the reset"),
                ),
        )
        .subcommand(Command::new("doctor").about("Find stored rows that fail validation"))
}
