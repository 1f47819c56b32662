// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;

/// Income and expense sums. `expenses` stays negative; take the absolute
/// value only when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl Totals {
    /// Net savings for the window.
    pub fn net(&self) -> Decimal {
        self.income + self.expenses
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            income: self.income + rhs.income,
            expenses: self.expenses + rhs.expenses,
        }
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::default(), Add::add)
    }
}

/// Sums income and expenses of records dated in `[start, end)`. A missing
/// bound leaves that side open. Zero amounts land in neither bucket.
pub fn sum_by_type<'a, I>(
    records: I,
    window_start: Option<NaiveDateTime>,
    window_end: Option<NaiveDateTime>,
) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Totals::default();
    for t in records {
        if window_start.is_some_and(|start| t.date < start) {
            continue;
        }
        if window_end.is_some_and(|end| t.date >= end) {
            continue;
        }
        if t.amount > Decimal::ZERO {
            totals.income += t.amount;
        } else if t.amount < Decimal::ZERO {
            totals.expenses += t.amount;
        }
    }
    totals
}

/// Signed sum of every record.
pub fn total_balance<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    records.into_iter().map(|t| t.amount).sum()
}
