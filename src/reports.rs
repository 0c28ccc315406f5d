// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::goals::progress_percent;
use crate::models::{Category, TransactionType};
use crate::processor::Wallet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub name: String,
    pub icon: String,
    pub current: Decimal,
    pub target: Decimal,
    pub percent: u32,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub name: String,
    pub balance: Decimal,
    pub total_income: Decimal,
    /// Expenses only; outgoing transfers are not counted as spending.
    pub total_spent: Decimal,
    pub expense_by_category: Vec<(Category, Decimal)>,
    pub goals: Vec<GoalProgress>,
    pub blocks: usize,
    pub chain_valid: bool,
}

pub fn summarize(wallet: &Wallet) -> Summary {
    let mut total_income = Decimal::ZERO;
    let mut total_spent = Decimal::ZERO;
    let mut by_cat: BTreeMap<Category, Decimal> = BTreeMap::new();
    for tx in wallet.ledger.transactions() {
        match tx.r#type {
            TransactionType::Income => {
                total_income = total_income.saturating_add(tx.amount);
            }
            TransactionType::Expense => {
                total_spent = total_spent.saturating_add(tx.amount);
                let slot = by_cat.entry(tx.category).or_insert(Decimal::ZERO);
                *slot = slot.saturating_add(tx.amount);
            }
            TransactionType::Transfer => {}
        }
    }

    let goals = wallet
        .goals
        .iter()
        .map(|g| {
            let percent = progress_percent(g);
            GoalProgress {
                name: g.name.clone(),
                icon: g.icon.clone(),
                current: g.current_amount,
                target: g.target_amount,
                percent,
                done: percent >= 100,
            }
        })
        .collect();

    Summary {
        name: wallet.account.name.clone(),
        balance: wallet.account.balance,
        total_income,
        total_spent,
        expense_by_category: by_cat.into_iter().filter(|(_, v)| !v.is_zero()).collect(),
        goals,
        blocks: wallet.ledger.len(),
        chain_valid: wallet.ledger.verify(),
    }
}
