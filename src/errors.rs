// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected user input at the data-entry boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Budget amount must be positive, got {0}")]
    NonPositiveBudget(Decimal),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("Transaction id '{0}' already exists")]
    DuplicateTransaction(String),
    #[error("Transaction '{0}' not found")]
    UnknownTransaction(String),
    #[error("No budget for category '{0}'")]
    UnknownBudget(String),
    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),
    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidSetting { key: String, value: String },
}
