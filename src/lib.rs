// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod account;
pub mod advisor;
pub mod app;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod goals;
pub mod hashlink;
pub mod ledger;
pub mod models;
pub mod processor;
pub mod reports;
pub mod utils;

pub use app::SecureFin;
pub use error::{LedgerError, Result};
