// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::aggregate::{Totals, sum_by_type};
use crate::engine::period::{start_of_month, start_of_previous_month};
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyComparison {
    pub current: Totals,
    pub previous: Totals,
}

/// Current calendar month (open-ended) against the whole previous month.
pub fn compare(all: &[Transaction], now: NaiveDateTime) -> MonthlyComparison {
    let this_month = start_of_month(now);
    let last_month = start_of_previous_month(now);
    MonthlyComparison {
        current: sum_by_type(all, Some(this_month), None),
        previous: sum_by_type(all, Some(last_month), Some(this_month)),
    }
}

/// Percentage change between two magnitudes (pass absolute values).
/// With no previous amount the change is 100 if anything happened, else 0.
/// Saturates at `Decimal::MAX` when the change is too large to represent.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        current
            .checked_sub(previous)
            .and_then(|delta| delta.checked_div(previous))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else if current > Decimal::ZERO {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
