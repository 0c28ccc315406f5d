// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use securefin::advisor::Offline;
use securefin::auth::{AuthMode, AuthPhase, OtpGenerator};
use securefin::config::Config;
use securefin::{LedgerError, SecureFin};

struct SeqOtp(u32);

impl OtpGenerator for SeqOtp {
    fn generate(&mut self, digits: usize) -> String {
        self.0 += 1;
        format!("{:0width$}", self.0, width = digits)
    }
}

fn setup() -> SecureFin {
    SecureFin::with_services(
        Config::default(),
        Box::new(Offline),
        Box::new(Offline),
        Box::new(SeqOtp(0)),
    )
}

#[test]
fn registration_creates_account_with_genesis() {
    let mut app = setup();
    app.switch_mode(AuthMode::Register);
    let issued = app.request_code("9876543210", Some("Rahul Kumar")).unwrap();
    assert_eq!(issued.code.len(), 4);
    assert_eq!(app.auth_phase(), AuthPhase::OtpIssued);

    let account = app.verify_code(&issued.code).unwrap();
    assert_eq!(account.id, "9876543210");
    assert_eq!(account.name, "Rahul Kumar");
    assert_eq!(account.language, "en");
    assert_eq!(account.balance, Decimal::ZERO);
    assert_eq!(app.auth_phase(), AuthPhase::Verified);
    assert!(app.is_logged_in());

    let blocks = app.blocks().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].index, 0);
    assert_eq!(app.goals().unwrap().len(), Config::default().goals.len());
}

#[test]
fn wrong_code_keeps_otp_phase() {
    let mut app = setup();
    app.switch_mode(AuthMode::Register);
    let issued = app.request_code("9876543210", Some("Rahul Kumar")).unwrap();

    assert_eq!(app.verify_code("9999").unwrap_err(), LedgerError::InvalidCode);
    assert_eq!(app.auth_phase(), AuthPhase::OtpIssued);
    assert!(!app.is_logged_in());
    assert_eq!(app.verify_code("0000").unwrap_err(), LedgerError::InvalidCode);

    app.verify_code(&issued.code).unwrap();
    assert!(app.is_logged_in());
}

#[test]
fn codes_are_bound_to_the_latest_mobile() {
    let mut app = setup();
    app.switch_mode(AuthMode::Register);
    let first = app.request_code("9876543210", Some("Rahul Kumar")).unwrap();
    let second = app.request_code("9123456780", Some("Priya Sharma")).unwrap();
    assert_ne!(first.code, second.code);

    assert_eq!(app.verify_code(&first.code).unwrap_err(), LedgerError::InvalidCode);
    let account = app.verify_code(&second.code).unwrap();
    assert_eq!(account.id, "9123456780");
    assert!(app.wallet_of("9876543210").is_err());
}

#[test]
fn login_requires_registered_mobile() {
    let mut app = setup();
    assert_eq!(app.auth_mode(), AuthMode::Login);
    assert_eq!(
        app.request_code("9876543210", None).unwrap_err(),
        LedgerError::AccountNotFound("9876543210".into())
    );
    assert_eq!(app.auth_phase(), AuthPhase::AwaitingMobile);
}

#[test]
fn duplicate_registration_rejected() {
    let mut app = setup();
    app.switch_mode(AuthMode::Register);
    let issued = app.request_code("9876543210", Some("Rahul Kumar")).unwrap();
    app.verify_code(&issued.code).unwrap();
    app.logout();
    assert_eq!(app.auth_mode(), AuthMode::Register);
    assert_eq!(
        app.request_code("9876543210", Some("Rahul K")).unwrap_err(),
        LedgerError::AccountExists("9876543210".into())
    );
}

#[test]
fn login_after_logout_restores_same_account() {
    let mut app = setup();
    app.switch_mode(AuthMode::Register);
    let issued = app.request_code("9876543210", Some("Rahul Kumar")).unwrap();
    app.verify_code(&issued.code).unwrap();
    app.logout();
    assert!(!app.is_logged_in());
    assert_eq!(app.account().unwrap_err(), LedgerError::NotAuthenticated);

    app.switch_mode(AuthMode::Login);
    let issued = app.request_code("9876543210", None).unwrap();
    let account = app.verify_code(&issued.code).unwrap();
    assert_eq!(account.name, "Rahul Kumar");
    assert_eq!(app.blocks().unwrap().len(), 1);
}

#[test]
fn change_number_discards_code() {
    let mut app = setup();
    app.switch_mode(AuthMode::Register);
    let issued = app.request_code("9876543210", Some("Rahul Kumar")).unwrap();
    app.change_mobile();
    assert_eq!(app.auth_phase(), AuthPhase::AwaitingMobile);
    assert!(matches!(
        app.verify_code(&issued.code),
        Err(LedgerError::InvalidPhase(_))
    ));
}

#[test]
fn register_validates_inputs() {
    let mut app = setup();
    app.switch_mode(AuthMode::Register);
    assert!(matches!(
        app.request_code("98765", Some("Rahul Kumar")),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        app.request_code("9876543210", None),
        Err(LedgerError::Validation(_))
    ));
}
