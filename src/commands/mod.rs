// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod chain;
pub mod exporter;
pub mod goals;
pub mod reports;
pub mod transactions;

use anyhow::{Context, Result};

use crate::app::SecureFin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn dispatch(app: &mut SecureFin, matches: &clap::ArgMatches) -> Result<Flow> {
    match matches.subcommand() {
        Some(("mode", sub)) => auth::switch_mode(app, sub)?,
        Some(("otp", sub)) => auth::request_code(app, sub)?,
        Some(("verify", sub)) => auth::verify_code(app, sub)?,
        Some(("change-number", _)) => auth::change_number(app),
        Some(("logout", _)) => auth::logout(app),
        Some((kind @ ("income" | "expense" | "transfer"), sub)) => {
            transactions::handle(app, kind, sub)?
        }
        Some(("balance", _)) => transactions::balance(app)?,
        Some(("chain", sub)) => chain::handle(app, sub)?,
        Some(("goals", sub)) => goals::handle(app, sub)?,
        Some(("report", sub)) => reports::handle(app, sub)?,
        Some(("advice", _)) => reports::advice(app)?,
        Some(("export", sub)) => exporter::handle(app, sub)?,
        Some(("quit", _)) => return Ok(Flow::Quit),
        _ => {}
    }
    Ok(Flow::Continue)
}

/// Value of a required argument; clap has already enforced presence.
pub(crate) fn required<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(|s| s.trim())
        .with_context(|| format!("Missing --{}", id))
}
