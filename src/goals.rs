// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{LedgerError, Result};
use crate::models::SavingsGoal;

/// Share of every income that is moved into the first unfinished goal (5%).
pub const AUTO_SAVE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

pub fn is_funded(goal: &SavingsGoal) -> bool {
    goal.current_amount >= goal.target_amount
}

/// Adds 5% of `income` to the first goal, in list order, that has not reached
/// its target. The contribution is not capped, so the goal may overshoot.
pub fn auto_allocate(goals: &[SavingsGoal], income: Decimal) -> Result<Vec<SavingsGoal>> {
    let mut out = goals.to_vec();
    if let Some(goal) = out.iter_mut().find(|g| !is_funded(g)) {
        goal.current_amount = income
            .checked_mul(AUTO_SAVE_RATE)
            .and_then(|share| goal.current_amount.checked_add(share))
            .ok_or_else(|| LedgerError::validation("Amount too large"))?;
    }
    Ok(out)
}

/// Display progress, rounded and capped at 100.
pub fn progress_percent(goal: &SavingsGoal) -> u32 {
    if goal.target_amount <= Decimal::ZERO {
        return 100;
    }
    // A ratio too large to represent is past 100 anyway.
    let pct = match goal
        .current_amount
        .checked_div(goal.target_amount)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(p) => p.round(),
        None => return 100,
    };
    pct.min(Decimal::ONE_HUNDRED)
        .max(Decimal::ZERO)
        .to_u32()
        .unwrap_or(0)
}
