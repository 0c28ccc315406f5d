// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

/// Process arguments.
pub fn build_cli() -> Command {
    Command::new("securefin")
        .version(clap::crate_version!())
        .about("Hash-linked personal ledger with OTP login, savings goals and risk-gated transfers")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("JSON config file (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .value_name("FILTER")
                .help("Log filter, e.g. info or securefin=debug (overrides RUST_LOG)"),
        )
        .arg(
            Arg::new("log_json")
                .long("log-json")
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .arg(
            Arg::new("script")
                .long("script")
                .value_name("FILE")
                .help("Run shell commands from FILE instead of stdin"),
        )
}

fn amount_arg() -> Arg {
    Arg::new("amount").long("amount").required(true)
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

/// Grammar of one shell line.
pub fn build_shell() -> Command {
    Command::new("securefin")
        .no_binary_name(true)
        .disable_version_flag(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("mode")
                .about("Switch between login and registration (discards any OTP)")
                .arg(
                    Arg::new("mode")
                        .required(true)
                        .value_parser(["login", "register"]),
                ),
        )
        .subcommand(
            Command::new("otp")
                .about("Request a one-time code for a mobile number")
                .arg(Arg::new("mobile").long("mobile").required(true))
                .arg(Arg::new("name").long("name").help("Full name (registration only)")),
        )
        .subcommand(
            Command::new("verify")
                .about("Verify the one-time code")
                .arg(Arg::new("code").long("code").required(true)),
        )
        .subcommand(Command::new("change-number").about("Go back to mobile entry"))
        .subcommand(Command::new("logout"))
        .subcommand(
            Command::new("income")
                .about("Record income")
                .arg(amount_arg())
                .arg(Arg::new("category").long("category").default_value("Salary"))
                .arg(Arg::new("desc").long("desc")),
        )
        .subcommand(
            Command::new("expense")
                .about("Record an expense")
                .arg(amount_arg())
                .arg(Arg::new("category").long("category").default_value("Other"))
                .arg(Arg::new("desc").long("desc")),
        )
        .subcommand(
            Command::new("transfer")
                .about("Send money to a recipient ID / UPI")
                .arg(Arg::new("to").long("to").required(true))
                .arg(amount_arg())
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Proceed despite a high-risk warning"),
                ),
        )
        .subcommand(Command::new("balance"))
        .subcommand(
            Command::new("chain")
                .about("Inspect the ledger")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list").arg(json_flag()).arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )
                .subcommand(Command::new("verify")),
        )
        .subcommand(
            Command::new("goals")
                .subcommand_required(true)
                .subcommand(Command::new("list").arg(json_flag()))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("🎯")),
                ),
        )
        .subcommand(
            Command::new("report")
                .subcommand_required(true)
                .subcommand(Command::new("summary").arg(json_flag())),
        )
        .subcommand(Command::new("advice").about("Ask the advisor about your spending"))
        .subcommand(
            Command::new("export")
                .about("Write every block of the ledger to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(Command::new("quit").alias("exit"))
}
