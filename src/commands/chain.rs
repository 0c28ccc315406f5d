// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::app::SecureFin;
use crate::utils::{fmt_money, fmt_timestamp, maybe_print_json, pretty_table, short_hash};

pub fn handle(app: &SecureFin, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(app, sub)?,
        Some(("verify", _)) => verify(app)?,
        _ => {}
    }
    Ok(())
}

fn list(app: &SecureFin, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    let blocks: Vec<_> = app.blocks()?.iter().rev().take(limit).collect();
    if maybe_print_json(sub.get_flag("json"), &blocks)? {
        return Ok(());
    }
    let rows = blocks
        .iter()
        .map(|b| {
            vec![
                format!("#{}", b.index),
                fmt_timestamp(b.timestamp),
                b.data.r#type.to_string(),
                fmt_money(&b.data.amount),
                b.data.description.clone(),
                short_hash(&b.hash),
                short_hash(&b.previous_hash),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Block", "Time", "Type", "Amount", "Description", "Hash", "Prev Hash"],
            rows
        )
    );
    let status = if app.chain_valid()? { "valid" } else { "BROKEN" };
    println!("Chain: {}", status);
    Ok(())
}

fn verify(app: &SecureFin) -> Result<()> {
    app.verify_chain()?;
    println!("Chain valid ({} blocks)", app.blocks()?.len());
    Ok(())
}
