// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::required;
use crate::app::SecureFin;
use crate::goals::progress_percent;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(app: &mut SecureFin, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(app, sub)?,
        Some(("add", sub)) => add(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(app: &SecureFin, sub: &clap::ArgMatches) -> Result<()> {
    let goals = app.goals()?;
    if maybe_print_json(sub.get_flag("json"), &goals)? {
        return Ok(());
    }
    let rows = goals
        .iter()
        .map(|g| {
            let pct = progress_percent(g);
            vec![
                format!("{} {}", g.icon, g.name),
                fmt_money(&g.current_amount),
                fmt_money(&g.target_amount),
                if pct >= 100 {
                    "100% DONE".to_string()
                } else {
                    format!("{}%", pct)
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Goal", "Saved", "Target", "Progress"], rows)
    );
    println!("Tip: 5% of every Income is automatically saved to your first goal.");
    Ok(())
}

fn add(app: &mut SecureFin, sub: &clap::ArgMatches) -> Result<()> {
    let name = required(sub, "name")?;
    let target = parse_decimal(required(sub, "target")?)?;
    let icon = required(sub, "icon")?;
    let goal = app.add_goal(name, icon, target)?;
    println!(
        "Added goal {} {} (target {})",
        goal.icon,
        goal.name,
        fmt_money(&goal.target_amount)
    );
    Ok(())
}
