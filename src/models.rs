// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Mobile number the account was registered with.
    pub id: String,
    pub name: String,
    pub balance: Decimal,
    /// Locale tag handed to the advice service.
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
            TransactionType::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    Education,
    Salary,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Salary,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Salary => "Salary",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                LedgerError::Validation(format!(
                    "Unknown category '{}' (expected one of {})",
                    needle,
                    names.join(", ")
                ))
            })
    }
}

/// Ledger payload. Immutable once it has been embedded in a [`Block`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
    pub receiver: Option<String>,
}

impl Transaction {
    /// Amount as it moves the owning account's balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.r#type {
            TransactionType::Income => self.amount,
            TransactionType::Expense | TransactionType::Transfer => -self.amount,
        }
    }
}

/// What a caller hands to the processor; turned into a [`Transaction`] once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub r#type: TransactionType,
    pub category: Category,
    pub amount: Decimal,
    pub description: Option<String>,
    pub receiver: Option<String>,
    /// Set when re-submitting a transfer the risk gate flagged.
    #[serde(default)]
    pub acknowledge_risk: bool,
}

impl TransactionRequest {
    pub fn income(amount: Decimal, category: Category, description: &str) -> Self {
        Self {
            r#type: TransactionType::Income,
            category,
            amount,
            description: Some(description.to_string()),
            receiver: None,
            acknowledge_risk: false,
        }
    }

    pub fn expense(amount: Decimal, category: Category, description: &str) -> Self {
        Self {
            r#type: TransactionType::Expense,
            category,
            amount,
            description: Some(description.to_string()),
            receiver: None,
            acknowledge_risk: false,
        }
    }

    pub fn transfer(amount: Decimal, receiver: &str) -> Self {
        Self {
            r#type: TransactionType::Transfer,
            category: Category::Other,
            amount,
            description: None,
            receiver: Some(receiver.to_string()),
            acknowledge_risk: false,
        }
    }

    pub fn acknowledged(mut self) -> Self {
        self.acknowledge_risk = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    /// Milliseconds since the Unix epoch; never earlier than the previous block.
    pub timestamp: i64,
    pub data: Transaction,
    pub previous_hash: String,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub target_amount: Decimal,
    /// May exceed `target_amount`; allocation does not cap it.
    #[serde(default)]
    pub current_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// The risk service failed or timed out.
    Unknown,
}

impl RiskLevel {
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Unknown)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub reason: String,
}
