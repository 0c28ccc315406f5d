// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::account::{apply_transaction, ensure_funds};
use crate::advisor::{FraudRiskService, assess_or_unknown};
use crate::error::{LedgerError, Result};
use crate::goals::auto_allocate;
use crate::ledger::Ledger;
use crate::models::{
    Account, Block, Category, RiskAssessment, SavingsGoal, Transaction, TransactionRequest,
    TransactionType,
};

/// One account together with its chain and goals.
#[derive(Debug, Clone, Serialize)]
pub struct Wallet {
    pub account: Account,
    pub ledger: Ledger,
    pub goals: Vec<SavingsGoal>,
}

impl Wallet {
    /// New account whose chain starts with a genesis block holding `opening_balance`.
    pub fn open(
        mobile: &str,
        name: &str,
        language: &str,
        opening_balance: Decimal,
        goals: Vec<SavingsGoal>,
    ) -> Result<Self> {
        let mut ledger = Ledger::default();
        ledger.genesis(mobile, opening_balance)?;
        Ok(Self {
            account: Account {
                id: mobile.to_string(),
                name: name.to_string(),
                balance: opening_balance,
                language: language.to_string(),
            },
            ledger,
            goals,
        })
    }
}

/// Every wallet known to this process, keyed by mobile number.
#[derive(Debug, Default)]
pub struct Book {
    wallets: BTreeMap<String, Wallet>,
}

impl Book {
    pub fn insert(&mut self, wallet: Wallet) -> Result<()> {
        let id = wallet.account.id.clone();
        if self.wallets.contains_key(&id) {
            return Err(LedgerError::AccountExists(id));
        }
        self.wallets.insert(id, wallet);
        Ok(())
    }

    pub fn contains(&self, mobile: &str) -> bool {
        self.wallets.contains_key(mobile)
    }

    pub fn get(&self, mobile: &str) -> Result<&Wallet> {
        self.wallets
            .get(mobile)
            .ok_or_else(|| LedgerError::AccountNotFound(mobile.to_string()))
    }

    fn get_mut(&mut self, mobile: &str) -> Result<&mut Wallet> {
        self.wallets
            .get_mut(mobile)
            .ok_or_else(|| LedgerError::AccountNotFound(mobile.to_string()))
    }

    /// Mutable goal list; goals are the one piece of wallet state that is
    /// edited outside `submit`.
    pub(crate) fn goals_mut(&mut self, mobile: &str) -> Result<&mut Vec<SavingsGoal>> {
        Ok(&mut self.get_mut(mobile)?.goals)
    }

}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub block: Block,
    pub account: Account,
    pub goals: Vec<SavingsGoal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SubmitOutcome {
    Committed(Receipt),
    /// Nothing was written; re-submit with `acknowledge_risk` to go ahead.
    RequiresConfirmation(RiskAssessment),
}

// A wallet's next state, computed in full before anything is written.
struct Staged {
    tx: Transaction,
    account: Account,
    goals: Vec<SavingsGoal>,
}

pub struct TransactionProcessor {
    risk_threshold: Decimal,
    risk: Box<dyn FraudRiskService>,
}

impl TransactionProcessor {
    pub fn new(risk_threshold: Decimal, risk: Box<dyn FraudRiskService>) -> Self {
        Self {
            risk_threshold,
            risk,
        }
    }

    /// Validates, gates and commits one transaction for `account_id`.
    ///
    /// Either the block, the balance and the goals are all written, or none
    /// of them are. Transfers to another wallet in `book` credit it in the
    /// same commit.
    pub fn submit(
        &self,
        book: &mut Book,
        account_id: &str,
        request: &TransactionRequest,
    ) -> Result<SubmitOutcome> {
        let sender = book.get(account_id)?;
        let receiver = validate(request, account_id)?;
        sender.ledger.latest()?;

        if request.r#type != TransactionType::Income {
            if let Err(e) = ensure_funds(&sender.account, request.amount) {
                info!(account = account_id, amount = %request.amount, "rejected: insufficient funds");
                return Err(e);
            }
        }

        let now = Utc::now().timestamp_millis();
        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            timestamp: now,
            r#type: request.r#type,
            category: request.category,
            amount: request.amount,
            description: describe(request, receiver.as_deref()),
            receiver: receiver.clone(),
        };

        if let Some(assessment) = self.risk_gate(request, &tx) {
            return Ok(SubmitOutcome::RequiresConfirmation(assessment));
        }

        let staged_sender = stage(sender, tx)?;
        let staged_receiver = match receiver.as_deref() {
            Some(r) if book.contains(r) => {
                let wallet = book.get(r)?;
                wallet.ledger.latest()?;
                let credit = Transaction {
                    id: Uuid::new_v4().to_string(),
                    timestamp: now,
                    r#type: TransactionType::Income,
                    category: Category::Other,
                    amount: request.amount,
                    description: format!("Transfer from {}", account_id),
                    receiver: None,
                };
                Some((r.to_string(), stage(wallet, credit)?))
            }
            _ => None,
        };

        // Every fallible step is behind us; latest() was checked on both chains.
        let receipt = commit(book.get_mut(account_id)?, staged_sender)?;
        if let Some((id, staged)) = staged_receiver {
            commit(book.get_mut(&id)?, staged)?;
            info!(from = account_id, to = %id, "local recipient credited");
        }
        info!(
            account = account_id,
            index = receipt.block.index,
            kind = %receipt.block.data.r#type,
            amount = %receipt.block.data.amount,
            "transaction committed"
        );
        Ok(SubmitOutcome::Committed(receipt))
    }

    fn risk_gate(&self, request: &TransactionRequest, tx: &Transaction) -> Option<RiskAssessment> {
        if request.r#type != TransactionType::Transfer || request.amount <= self.risk_threshold {
            return None;
        }
        if request.acknowledge_risk {
            info!(amount = %request.amount, "risk acknowledged by caller");
            return None;
        }
        let assessment = assess_or_unknown(self.risk.as_ref(), tx);
        if assessment.risk_level.requires_confirmation() {
            warn!(
                amount = %request.amount,
                level = %assessment.risk_level,
                reason = %assessment.reason,
                "transfer held for confirmation"
            );
            return Some(assessment);
        }
        None
    }
}

/// Shape checks; returns the trimmed receiver for transfers.
fn validate(request: &TransactionRequest, account_id: &str) -> Result<Option<String>> {
    if request.amount <= Decimal::ZERO {
        return Err(LedgerError::validation("Amount must be greater than zero"));
    }
    let receiver = request
        .receiver
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    match (request.r#type, receiver) {
        (TransactionType::Transfer, None) => {
            Err(LedgerError::validation("Transfer requires a recipient"))
        }
        (TransactionType::Transfer, Some(r)) if r == account_id => {
            Err(LedgerError::validation("Cannot transfer to your own account"))
        }
        (TransactionType::Transfer, Some(r)) => Ok(Some(r.to_string())),
        (_, Some(_)) => Err(LedgerError::validation(
            "Recipient is only valid for transfers",
        )),
        (_, None) => Ok(None),
    }
}

fn describe(request: &TransactionRequest, receiver: Option<&str>) -> String {
    let given = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    match (given, receiver) {
        (Some(d), _) => d.to_string(),
        (None, Some(r)) => format!("Transfer to {}", r),
        (None, None) => request.category.to_string(),
    }
}

fn stage(wallet: &Wallet, tx: Transaction) -> Result<Staged> {
    let account = apply_transaction(&wallet.account, &tx)?;
    let goals = if tx.r#type == TransactionType::Income {
        auto_allocate(&wallet.goals, tx.amount)?
    } else {
        wallet.goals.clone()
    };
    Ok(Staged { tx, account, goals })
}

fn commit(wallet: &mut Wallet, staged: Staged) -> Result<Receipt> {
    let block = wallet.ledger.append(staged.tx)?;
    wallet.account = staged.account;
    wallet.goals = staged.goals;
    Ok(Receipt {
        block,
        account: wallet.account.clone(),
        goals: wallet.goals.clone(),
    })
}
