// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Mock OTP login/registration.
//!
//! The issued code is handed back to the caller so the shell can "deliver" it.
//! That is only acceptable because nothing here is real security: a
//! production flow must never return the code to the requester.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use rand::rngs::OsRng;
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{LedgerError, Result};

static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("static regex"));

pub const MIN_NAME_LEN: usize = 3;

/// Source of one-time codes.
pub trait OtpGenerator {
    fn generate(&mut self, digits: usize) -> String;
}

/// Draws every digit from the OS RNG, so no code can be derived from earlier ones.
#[derive(Debug, Default)]
pub struct RandomOtp;

impl OtpGenerator for RandomOtp {
    fn generate(&mut self, digits: usize) -> String {
        (0..digits)
            .map(|_| char::from(b'0' + OsRng.gen_range(0..10u8)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthPhase {
    AwaitingMobile,
    OtpIssued,
    Verified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Login { mobile: String },
    Register { mobile: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedCode {
    pub mobile: String,
    pub code: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct PendingCode {
    code: String,
    expires_at: Option<DateTime<Utc>>,
}

pub struct AuthSession {
    mode: AuthMode,
    phase: AuthPhase,
    pending_mobile: Option<String>,
    pending_name: Option<String>,
    issued: Option<PendingCode>,
    ttl: Option<Duration>,
    digits: usize,
    generator: Box<dyn OtpGenerator>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("pending_mobile", &self.pending_mobile)
            .finish_non_exhaustive()
    }
}

impl AuthSession {
    /// `ttl_secs == 0` disables expiry.
    pub fn new(generator: Box<dyn OtpGenerator>, digits: usize, ttl_secs: u64) -> Self {
        let ttl = (ttl_secs > 0).then(|| Duration::seconds(ttl_secs as i64));
        Self {
            mode: AuthMode::Login,
            phase: AuthPhase::AwaitingMobile,
            pending_mobile: None,
            pending_name: None,
            issued: None,
            ttl,
            digits: digits.max(1),
            generator,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn pending_mobile(&self) -> Option<&str> {
        self.pending_mobile.as_deref()
    }

    /// Switching modes throws away any issued code.
    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.reset();
    }

    /// "Change number": back to mobile entry, issued code discarded.
    pub fn change_mobile(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = AuthPhase::AwaitingMobile;
        self.pending_mobile = None;
        self.pending_name = None;
        self.issued = None;
    }

    /// Issues a fresh code. Any earlier code, for this or another mobile,
    /// stops being valid.
    pub fn request_code(&mut self, mobile: &str, name: Option<&str>) -> Result<IssuedCode> {
        if self.phase == AuthPhase::Verified {
            return Err(LedgerError::InvalidPhase(
                "Session already verified; log out to start over".into(),
            ));
        }
        let mobile = mobile.trim();
        if !MOBILE_RE.is_match(mobile) {
            return Err(LedgerError::validation(
                "Please enter a valid 10-digit mobile number",
            ));
        }
        let name = match self.mode {
            AuthMode::Register => {
                let n = name.map(str::trim).unwrap_or_default();
                if n.chars().count() < MIN_NAME_LEN {
                    return Err(LedgerError::validation("Please enter your full name"));
                }
                Some(n.to_string())
            }
            AuthMode::Login => None,
        };

        let code = self.generator.generate(self.digits);
        let expires_at = self.ttl.map(|ttl| Utc::now() + ttl);
        self.pending_mobile = Some(mobile.to_string());
        self.pending_name = name;
        self.issued = Some(PendingCode {
            code: code.clone(),
            expires_at,
        });
        self.phase = AuthPhase::OtpIssued;
        info!(mobile, mode = ?self.mode, "otp issued");

        Ok(IssuedCode {
            mobile: mobile.to_string(),
            code,
            expires_at,
        })
    }

    pub fn verify_code(&mut self, candidate: &str) -> Result<AuthOutcome> {
        self.verify_code_at(candidate, Utc::now())
    }

    fn verify_code_at(&mut self, candidate: &str, now: DateTime<Utc>) -> Result<AuthOutcome> {
        if self.phase != AuthPhase::OtpIssued {
            return Err(LedgerError::InvalidPhase("No OTP has been requested".into()));
        }
        let (Some(issued), Some(mobile)) = (self.issued.clone(), self.pending_mobile.clone()) else {
            self.reset();
            return Err(LedgerError::InvalidPhase("No OTP has been requested".into()));
        };
        if issued.expires_at.is_some_and(|exp| now > exp) {
            warn!(mobile = %mobile, "otp expired");
            self.reset();
            return Err(LedgerError::CodeExpired);
        }
        if issued.code != candidate {
            warn!(mobile = %mobile, "otp mismatch");
            return Err(LedgerError::InvalidCode);
        }

        self.issued = None;
        self.phase = AuthPhase::Verified;
        info!(mobile = %mobile, "otp verified");
        Ok(match (self.mode, self.pending_name.clone()) {
            (AuthMode::Register, Some(name)) => AuthOutcome::Register { mobile, name },
            _ => AuthOutcome::Login { mobile },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<&'static str>);

    impl OtpGenerator for Fixed {
        fn generate(&mut self, _digits: usize) -> String {
            self.0.remove(0).to_string()
        }
    }

    fn session(codes: Vec<&'static str>, ttl: u64) -> AuthSession {
        AuthSession::new(Box::new(Fixed(codes)), 4, ttl)
    }

    #[test]
    fn random_codes_have_requested_length() {
        let mut g = RandomOtp;
        let code = g.generate(6);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn rejects_bad_mobile_and_short_name() {
        let mut s = session(vec!["1111"], 0);
        assert!(matches!(
            s.request_code("12345", None),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            s.request_code("98765a3210", None),
            Err(LedgerError::Validation(_))
        ));
        s.switch_mode(AuthMode::Register);
        assert!(matches!(
            s.request_code("9876543210", Some("Al")),
            Err(LedgerError::Validation(_))
        ));
        assert_eq!(s.phase(), AuthPhase::AwaitingMobile);
    }

    #[test]
    fn wrong_code_keeps_session_usable() {
        let mut s = session(vec!["4821"], 0);
        s.request_code("9876543210", None).unwrap();
        assert_eq!(s.verify_code("0000").unwrap_err(), LedgerError::InvalidCode);
        assert_eq!(s.phase(), AuthPhase::OtpIssued);
        assert_eq!(
            s.verify_code("4821").unwrap(),
            AuthOutcome::Login {
                mobile: "9876543210".into()
            }
        );
        assert_eq!(s.phase(), AuthPhase::Verified);
    }

    #[test]
    fn register_outcome_carries_name() {
        let mut s = session(vec!["1234"], 0);
        s.switch_mode(AuthMode::Register);
        s.request_code("9876543210", Some("  Rahul Kumar ")).unwrap();
        assert_eq!(
            s.verify_code("1234").unwrap(),
            AuthOutcome::Register {
                mobile: "9876543210".into(),
                name: "Rahul Kumar".into()
            }
        );
    }

    #[test]
    fn new_request_replaces_old_code() {
        let mut s = session(vec!["1111", "2222"], 0);
        s.request_code("9876543210", None).unwrap();
        s.request_code("9123456780", None).unwrap();
        assert_eq!(s.verify_code("1111").unwrap_err(), LedgerError::InvalidCode);
        assert_eq!(
            s.verify_code("2222").unwrap(),
            AuthOutcome::Login {
                mobile: "9123456780".into()
            }
        );
    }

    #[test]
    fn switching_mode_discards_code() {
        let mut s = session(vec!["1111"], 0);
        s.request_code("9876543210", None).unwrap();
        assert_eq!(s.pending_mobile(), Some("9876543210"));
        s.switch_mode(AuthMode::Register);
        assert_eq!(s.phase(), AuthPhase::AwaitingMobile);
        assert_eq!(s.pending_mobile(), None);
        assert!(matches!(
            s.verify_code("1111"),
            Err(LedgerError::InvalidPhase(_))
        ));
    }

    #[test]
    fn expired_code_returns_to_mobile_entry() {
        let mut s = session(vec!["1111"], 60);
        s.request_code("9876543210", None).unwrap();
        let later = Utc::now() + Duration::seconds(120);
        assert_eq!(
            s.verify_code_at("1111", later).unwrap_err(),
            LedgerError::CodeExpired
        );
        assert_eq!(s.phase(), AuthPhase::AwaitingMobile);
    }

    #[test]
    fn code_is_single_use() {
        let mut s = session(vec!["1111"], 0);
        s.request_code("9876543210", None).unwrap();
        s.verify_code("1111").unwrap();
        assert!(matches!(
            s.verify_code("1111"),
            Err(LedgerError::InvalidPhase(_))
        ));
        assert!(s.request_code("9876543210", None).is_err());
    }
}
