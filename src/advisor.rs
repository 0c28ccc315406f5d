// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Advice and fraud-risk collaborators.
//!
//! Both are remote services with a narrow JSON contract. Callers never see
//! their failures: advice degrades to a fixed message, and a failed risk
//! check is reported as [`RiskLevel::Unknown`].

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::models::{RiskAssessment, RiskLevel, Transaction};
use crate::utils::http_client;

pub const ADVICE_FALLBACK: &str = "Keep tracking your expenses to get AI insights.";
pub const ADVICE_EMPTY_HISTORY: &str = "Add some transactions to receive personalized advice!";

#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("{0} service is not configured")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub trait AdviceService {
    fn get_advice(
        &self,
        transactions: &[Transaction],
        balance: Decimal,
        locale: &str,
    ) -> Result<String, CollaboratorError>;
}

pub trait FraudRiskService {
    fn check_risk(&self, candidate: &Transaction) -> Result<RiskAssessment, CollaboratorError>;
}

pub fn advice_or_fallback(
    service: &dyn AdviceService,
    transactions: &[Transaction],
    balance: Decimal,
    locale: &str,
) -> String {
    match service.get_advice(transactions, balance, locale) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => ADVICE_FALLBACK.to_string(),
        Err(e) => {
            warn!(error = %e, "advice unavailable, using fallback");
            ADVICE_FALLBACK.to_string()
        }
    }
}

pub fn assess_or_unknown(service: &dyn FraudRiskService, candidate: &Transaction) -> RiskAssessment {
    service.check_risk(candidate).unwrap_or_else(|e| {
        warn!(error = %e, "risk check unavailable");
        RiskAssessment {
            risk_level: RiskLevel::Unknown,
            reason: format!("Risk check unavailable ({})", e),
        }
    })
}

/// Used when no endpoint is configured; always fails so the fallbacks apply.
#[derive(Debug, Default)]
pub struct Offline;

impl AdviceService for Offline {
    fn get_advice(&self, _: &[Transaction], _: Decimal, _: &str) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::NotConfigured("advice"))
    }
}

impl FraudRiskService for Offline {
    fn check_risk(&self, _: &Transaction) -> Result<RiskAssessment, CollaboratorError> {
        Err(CollaboratorError::NotConfigured("fraud-risk"))
    }
}

#[derive(Serialize)]
struct AdviceRequest<'a> {
    transactions: &'a [Transaction],
    balance: Decimal,
    locale: &'a str,
}

#[derive(Deserialize)]
struct AdviceResponse {
    advice: String,
}

pub struct HttpAdvisor {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpAdvisor {
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url.to_string(),
        })
    }
}

impl AdviceService for HttpAdvisor {
    fn get_advice(
        &self,
        transactions: &[Transaction],
        balance: Decimal,
        locale: &str,
    ) -> Result<String, CollaboratorError> {
        let body = AdviceRequest {
            transactions,
            balance,
            locale,
        };
        let resp = self.client.post(&self.url).json(&body).send()?.error_for_status()?;
        let parsed: AdviceResponse = resp
            .json()
            .map_err(|e| CollaboratorError::Malformed(e.to_string()))?;
        Ok(parsed.advice)
    }
}

pub struct HttpRiskChecker {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpRiskChecker {
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url.to_string(),
        })
    }
}

impl FraudRiskService for HttpRiskChecker {
    fn check_risk(&self, candidate: &Transaction) -> Result<RiskAssessment, CollaboratorError> {
        let resp = self
            .client
            .post(&self.url)
            .json(candidate)
            .send()?
            .error_for_status()?;
        let parsed: RiskAssessment = resp
            .json()
            .map_err(|e| CollaboratorError::Malformed(e.to_string()))?;
        if parsed.risk_level == RiskLevel::Unknown {
            return Err(CollaboratorError::Malformed("riskLevel must be Low, Medium or High".into()));
        }
        Ok(parsed)
    }
}

/// HTTP advisor when an endpoint is configured and the client builds, else [`Offline`].
pub fn advice_service(cfg: &Config) -> Box<dyn AdviceService> {
    let timeout = Duration::from_secs(cfg.collaborator_timeout_secs);
    match cfg.advice_url.as_deref() {
        Some(url) => match HttpAdvisor::new(url, timeout) {
            Ok(svc) => Box::new(svc),
            Err(e) => {
                warn!(error = %e, "advice client unavailable");
                Box::new(Offline)
            }
        },
        None => Box::new(Offline),
    }
}

pub fn risk_service(cfg: &Config) -> Box<dyn FraudRiskService> {
    let timeout = Duration::from_secs(cfg.collaborator_timeout_secs);
    match cfg.risk_url.as_deref() {
        Some(url) => match HttpRiskChecker::new(url, timeout) {
            Ok(svc) => Box::new(svc),
            Err(e) => {
                warn!(error = %e, "risk client unavailable");
                Box::new(Offline)
            }
        },
        None => Box::new(Offline),
    }
}
