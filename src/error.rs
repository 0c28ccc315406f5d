// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors surfaced by the ledger engine and the auth session.
///
/// Everything except `EmptyLedger` and `ChainIntegrity` is recoverable by the
/// user correcting the input and trying again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid OTP. Please try again.")]
    InvalidCode,

    #[error("OTP expired. Request a new code.")]
    CodeExpired,

    #[error("Ledger has no genesis block")]
    EmptyLedger,

    #[error("Chain integrity check failed at block #{index}")]
    ChainIntegrity { index: u64 },

    #[error("No account registered for mobile {0}")]
    AccountNotFound(String),

    #[error("An account is already registered for mobile {0}")]
    AccountExists(String),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("{0}")]
    InvalidPhase(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }
}
