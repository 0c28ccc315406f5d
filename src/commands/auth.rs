// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::required;
use crate::app::SecureFin;
use crate::auth::AuthMode;
use crate::utils::fmt_money;

pub fn switch_mode(app: &mut SecureFin, sub: &clap::ArgMatches) -> Result<()> {
    let mode = match required(sub, "mode")? {
        "register" => AuthMode::Register,
        _ => AuthMode::Login,
    };
    app.switch_mode(mode);
    println!("Mode: {:?}", mode);
    Ok(())
}

pub fn request_code(app: &mut SecureFin, sub: &clap::ArgMatches) -> Result<()> {
    let mobile = required(sub, "mobile")?;
    let name = sub.get_one::<String>("name").map(|s| s.as_str());
    let issued = app.request_code(mobile, name)?;
    // Simulated SMS delivery.
    println!("Your SecureFin OTP is: {}", issued.code);
    println!("Enter OTP sent to +91 {}", issued.mobile);
    Ok(())
}

pub fn verify_code(app: &mut SecureFin, sub: &clap::ArgMatches) -> Result<()> {
    let code = required(sub, "code")?;
    let account = app.verify_code(code)?;
    println!(
        "Welcome, {}. Balance: {}",
        account.name,
        fmt_money(&account.balance)
    );
    Ok(())
}

pub fn change_number(app: &mut SecureFin) {
    app.change_mobile();
    println!("Enter a new mobile number");
}

pub fn logout(app: &mut SecureFin) {
    app.logout();
    println!("Logged out");
}
