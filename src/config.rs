// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::SavingsGoal;
use crate::utils::parse_decimal;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "SecureFin", "securefin"));

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transfers strictly above this amount go through the risk service.
    pub risk_threshold: Decimal,
    /// Balance written into the genesis block of a new account.
    pub opening_balance: Decimal,
    /// 0 disables OTP expiry.
    pub otp_ttl_secs: u64,
    pub otp_digits: usize,
    pub default_locale: String,
    pub advice_url: Option<String>,
    pub risk_url: Option<String>,
    pub collaborator_timeout_secs: u64,
    /// Goals every new registration starts with, in priority order.
    pub goals: Vec<SavingsGoal>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            risk_threshold: Decimal::new(5000, 0),
            opening_balance: Decimal::ZERO,
            otp_ttl_secs: 300,
            otp_digits: 4,
            default_locale: "en".to_string(),
            advice_url: None,
            risk_url: None,
            collaborator_timeout_secs: 10,
            goals: vec![
                seed_goal("emergency-fund", "Emergency Fund", "🛡️", 10_000),
                seed_goal("new-laptop", "New Laptop", "💻", 50_000),
            ],
        }
    }
}

fn seed_goal(id: &str, name: &str, icon: &str, target: i64) -> SavingsGoal {
    SavingsGoal {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        target_amount: Decimal::new(target, 0),
        current_amount: Decimal::ZERO,
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

impl Config {
    /// Reads `explicit` if given, else the platform config file if it exists,
    /// else defaults; environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => config_path().ok().filter(|p| p.exists()),
        };
        let mut cfg = match path {
            Some(p) => {
                let raw = fs::read_to_string(&p)
                    .with_context(|| format!("Read config at {}", p.display()))?;
                debug!(path = %p.display(), "config loaded");
                serde_json::from_str::<Config>(&raw)
                    .with_context(|| format!("Parse config at {}", p.display()))?
            }
            None => Config::default(),
        };
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SECUREFIN_RISK_THRESHOLD") {
            self.risk_threshold = parse_decimal(v.trim())?;
        }
        if let Some(v) = lookup("SECUREFIN_OPENING_BALANCE") {
            self.opening_balance = parse_decimal(v.trim())?;
        }
        if let Some(v) = lookup("SECUREFIN_ADVICE_URL") {
            self.advice_url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = lookup("SECUREFIN_RISK_URL") {
            self.risk_url = Some(v).filter(|s| !s.trim().is_empty());
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.opening_balance < Decimal::ZERO {
            anyhow::bail!("opening_balance must not be negative");
        }
        if self.risk_threshold < Decimal::ZERO {
            anyhow::bail!("risk_threshold must not be negative");
        }
        if self.otp_digits == 0 {
            anyhow::bail!("otp_digits must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"risk_threshold":"2500"}"#).unwrap();
        assert_eq!(cfg.risk_threshold, Decimal::new(2500, 0));
        assert_eq!(cfg.otp_digits, 4);
        assert_eq!(cfg.goals.len(), 2);
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("SECUREFIN_RISK_THRESHOLD", " 100 "),
            ("SECUREFIN_RISK_URL", "http://localhost:9/risk"),
            ("SECUREFIN_ADVICE_URL", ""),
        ]
        .into_iter()
        .collect();
        let mut cfg = Config::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.risk_threshold, Decimal::new(100, 0));
        assert_eq!(cfg.risk_url.as_deref(), Some("http://localhost:9/risk"));
        assert!(cfg.advice_url.is_none());
    }

    #[test]
    fn negative_opening_balance_rejected() {
        let mut cfg = Config::default();
        let err = cfg
            .apply_env(|k| (k == "SECUREFIN_OPENING_BALANCE").then(|| "-5".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("opening_balance"));
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"opening_balance":"750","goals":[]}"#).unwrap();
        let cfg = Config::load(Some(path.as_path())).unwrap();
        assert!(cfg.goals.is_empty());
        assert_eq!(cfg.otp_digits, 4);
    }
}
