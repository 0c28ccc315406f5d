// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::app::SecureFin;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(app: &SecureFin, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("summary", sub)) = m.subcommand() {
        summary(app, sub)?;
    }
    Ok(())
}

fn summary(app: &SecureFin, sub: &clap::ArgMatches) -> Result<()> {
    let s = app.summary()?;
    if maybe_print_json(sub.get_flag("json"), &s)? {
        return Ok(());
    }
    println!("Hello, {}", s.name);
    println!(
        "{}",
        pretty_table(
            &["Current Balance", "Total Income", "Total Spent", "Blocks", "Chain"],
            vec![vec![
                fmt_money(&s.balance),
                format!("+{}", fmt_money(&s.total_income)),
                format!("-{}", fmt_money(&s.total_spent)),
                s.blocks.to_string(),
                if s.chain_valid { "valid" } else { "BROKEN" }.to_string(),
            ]],
        )
    );
    if s.expense_by_category.is_empty() {
        println!("No expense data yet.");
    } else {
        let rows = s
            .expense_by_category
            .iter()
            .map(|(cat, amt)| vec![cat.to_string(), fmt_money(amt)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

pub fn advice(app: &SecureFin) -> Result<()> {
    println!("{}", app.advice()?);
    Ok(())
}
