// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Session-lifetime state store.
//!
//! [`SecureFin`] owns the auth session and every wallet. Callers mutate it
//! only through `request_code`, `verify_code`, `submit` and the goal/session
//! helpers, and read it through borrowed snapshots.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::advisor::{
    ADVICE_EMPTY_HISTORY, AdviceService, FraudRiskService, advice_or_fallback, advice_service,
    risk_service,
};
use crate::auth::{AuthMode, AuthOutcome, AuthPhase, AuthSession, IssuedCode, OtpGenerator, RandomOtp};
use crate::config::Config;
use crate::error::{LedgerError, Result};
use crate::models::{Account, Block, SavingsGoal, Transaction, TransactionRequest};
use crate::processor::{Book, SubmitOutcome, TransactionProcessor, Wallet};
use crate::reports::{Summary, summarize};

pub struct SecureFin {
    config: Config,
    auth: AuthSession,
    book: Book,
    processor: TransactionProcessor,
    advisor: Box<dyn AdviceService>,
    active: Option<String>,
}

impl SecureFin {
    /// Collaborators come from the config; unreachable or unset endpoints
    /// fall back to offline behaviour.
    pub fn new(config: Config) -> Self {
        let advisor = advice_service(&config);
        let risk = risk_service(&config);
        Self::with_services(config, advisor, risk, Box::new(RandomOtp))
    }

    pub fn with_services(
        config: Config,
        advisor: Box<dyn AdviceService>,
        risk: Box<dyn FraudRiskService>,
        otp: Box<dyn OtpGenerator>,
    ) -> Self {
        let auth = AuthSession::new(otp, config.otp_digits, config.otp_ttl_secs);
        let processor = TransactionProcessor::new(config.risk_threshold, risk);
        Self {
            config,
            auth,
            book: Book::default(),
            processor,
            advisor,
            active: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth.mode()
    }

    pub fn auth_phase(&self) -> AuthPhase {
        self.auth.phase()
    }

    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.auth.switch_mode(mode);
    }

    pub fn change_mobile(&mut self) {
        self.auth.change_mobile();
    }

    /// Login needs a registered mobile and registration a free one; both are
    /// checked before a code is issued.
    pub fn request_code(&mut self, mobile: &str, name: Option<&str>) -> Result<IssuedCode> {
        let trimmed = mobile.trim();
        match self.auth.mode() {
            AuthMode::Login if !self.book.contains(trimmed) => {
                return Err(LedgerError::AccountNotFound(trimmed.to_string()));
            }
            AuthMode::Register if self.book.contains(trimmed) => {
                return Err(LedgerError::AccountExists(trimmed.to_string()));
            }
            _ => {}
        }
        self.auth.request_code(trimmed, name)
    }

    /// On success the session is logged in as the returned account. A new
    /// registration gets its genesis block and the configured seed goals.
    pub fn verify_code(&mut self, code: &str) -> Result<Account> {
        let mobile = match self.auth.verify_code(code)? {
            AuthOutcome::Login { mobile } => {
                self.book.get(&mobile)?;
                mobile
            }
            AuthOutcome::Register { mobile, name } => {
                let wallet = Wallet::open(
                    &mobile,
                    &name,
                    &self.config.default_locale,
                    self.config.opening_balance,
                    self.config.goals.clone(),
                )?;
                self.book.insert(wallet)?;
                info!(mobile = %mobile, "account registered");
                mobile
            }
        };
        self.active = Some(mobile.clone());
        Ok(self.book.get(&mobile)?.account.clone())
    }

    /// Drops the login and starts a fresh auth session in the same mode.
    pub fn logout(&mut self) {
        if let Some(id) = self.active.take() {
            info!(mobile = %id, "logged out");
        }
        let mode = self.auth.mode();
        self.auth.switch_mode(mode);
    }

    pub fn submit(&mut self, request: &TransactionRequest) -> Result<SubmitOutcome> {
        let id = self.active.as_deref().ok_or(LedgerError::NotAuthenticated)?;
        self.processor.submit(&mut self.book, id, request)
    }

    pub fn add_goal(&mut self, name: &str, icon: &str, target: Decimal) -> Result<SavingsGoal> {
        let id = self.active.clone().ok_or(LedgerError::NotAuthenticated)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::validation("Goal name is required"));
        }
        if target <= Decimal::ZERO {
            return Err(LedgerError::validation("Goal target must be greater than zero"));
        }
        let goal = SavingsGoal {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            target_amount: target,
            current_amount: Decimal::ZERO,
        };
        self.book.goals_mut(&id)?.push(goal.clone());
        Ok(goal)
    }

    fn wallet(&self) -> Result<&Wallet> {
        let id = self.active.as_deref().ok_or(LedgerError::NotAuthenticated)?;
        self.book.get(id)
    }

    pub fn is_logged_in(&self) -> bool {
        self.active.is_some()
    }

    pub fn account(&self) -> Result<&Account> {
        Ok(&self.wallet()?.account)
    }

    pub fn blocks(&self) -> Result<&[Block]> {
        Ok(self.wallet()?.ledger.blocks())
    }

    pub fn goals(&self) -> Result<&[SavingsGoal]> {
        Ok(&self.wallet()?.goals)
    }

    pub fn verify_chain(&self) -> Result<()> {
        self.wallet()?.ledger.verify_report()
    }

    pub fn chain_valid(&self) -> Result<bool> {
        Ok(self.wallet()?.ledger.verify())
    }

    /// Any registered wallet, logged in or not.
    pub fn wallet_of(&self, mobile: &str) -> Result<&Wallet> {
        self.book.get(mobile)
    }

    pub fn summary(&self) -> Result<Summary> {
        Ok(summarize(self.wallet()?))
    }

    /// Advice for the logged-in account; never fails once logged in.
    pub fn advice(&self) -> Result<String> {
        let wallet = self.wallet()?;
        let history: Vec<Transaction> = wallet.ledger.transactions().cloned().collect();
        if history.is_empty() {
            return Ok(ADVICE_EMPTY_HISTORY.to_string());
        }
        Ok(advice_or_fallback(
            self.advisor.as_ref(),
            &history,
            wallet.account.balance,
            &wallet.account.language,
        ))
    }
}
