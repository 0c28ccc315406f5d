// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::required;
use crate::app::SecureFin;
use crate::models::{Category, TransactionRequest, TransactionType};
use crate::processor::SubmitOutcome;
use crate::utils::{fmt_money, parse_decimal, short_hash};

pub fn handle(app: &mut SecureFin, kind: &str, sub: &clap::ArgMatches) -> Result<()> {
    let request = build_request(kind, sub)?;
    match app.submit(&request)? {
        SubmitOutcome::Committed(receipt) => {
            println!(
                "Block #{} mined: {} {} ({})",
                receipt.block.index,
                receipt.block.data.r#type,
                fmt_money(&receipt.block.data.amount),
                receipt.block.data.description
            );
            println!("Hash: {}", short_hash(&receipt.block.hash));
            println!("Balance: {}", fmt_money(&receipt.account.balance));
        }
        SubmitOutcome::RequiresConfirmation(assessment) => {
            println!(
                "Warning: {} Fraud Risk Detected!\nReason: {}\nRe-run with --yes to proceed.",
                assessment.risk_level, assessment.reason
            );
        }
    }
    Ok(())
}

pub fn build_request(kind: &str, sub: &clap::ArgMatches) -> Result<TransactionRequest> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let request = match kind {
        "transfer" => {
            let mut req = TransactionRequest::transfer(amount, required(sub, "to")?);
            req.acknowledge_risk = sub.get_flag("yes");
            req
        }
        _ => {
            let category: Category = required(sub, "category")?.parse()?;
            let r#type = if kind == "income" {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            TransactionRequest {
                r#type,
                category,
                amount,
                description: sub.get_one::<String>("desc").cloned(),
                receiver: None,
                acknowledge_risk: false,
            }
        }
    };
    Ok(request)
}

pub fn balance(app: &SecureFin) -> Result<()> {
    let account = app.account()?;
    println!("{}: {}", account.name, fmt_money(&account.balance));
    Ok(())
}
