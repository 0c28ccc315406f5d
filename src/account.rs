// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};
use crate::models::{Account, Transaction, TransactionType};

/// Returns the account as it looks after `tx`. The input is left untouched;
/// committing the result is up to the caller.
pub fn apply_transaction(account: &Account, tx: &Transaction) -> Result<Account> {
    let balance = match tx.r#type {
        TransactionType::Income => account
            .balance
            .checked_add(tx.amount)
            .ok_or_else(|| LedgerError::validation("Amount too large"))?,
        TransactionType::Expense | TransactionType::Transfer => {
            ensure_funds(account, tx.amount)?;
            account.balance - tx.amount
        }
    };
    Ok(Account {
        balance,
        ..account.clone()
    })
}

pub fn ensure_funds(account: &Account, amount: Decimal) -> Result<()> {
    if amount > account.balance {
        return Err(LedgerError::InsufficientFunds {
            requested: amount,
            available: account.balance,
        });
    }
    Ok(())
}
