// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::period::{WeekStart, resolve_window_start_with};
use crate::models::{Budget, CategoryKey, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    pub category: CategoryKey,
    pub spent: Decimal,
    pub limit: Decimal,
    /// Unclamped; may exceed 1.
    pub ratio: Decimal,
    pub is_over_budget: bool,
}

impl BudgetProgress {
    /// Ratio capped at 1 for progress bars. Never use it for the over-budget decision.
    pub fn display_ratio(&self) -> Decimal {
        self.ratio.min(Decimal::ONE)
    }
}

pub fn progress<'a, I>(budget: &Budget, records: I, now: NaiveDateTime) -> BudgetProgress
where
    I: IntoIterator<Item = &'a Transaction>,
{
    progress_with(budget, records, now, WeekStart::default())
}

pub fn progress_with<'a, I>(
    budget: &Budget,
    records: I,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> BudgetProgress
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let window_start = resolve_window_start_with(budget.period, now, week_start);
    let spent: Decimal = records
        .into_iter()
        .filter(|t| t.is_expense() && t.category == budget.category && t.date >= window_start)
        .map(|t| t.amount.abs())
        .sum();
    let limit = budget.amount;
    // saturates when a tiny limit would overflow the quotient
    let ratio = if limit > Decimal::ZERO {
        spent.checked_div(limit).unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };
    BudgetProgress {
        category: budget.category.clone(),
        spent,
        limit,
        ratio,
        is_over_budget: ratio > Decimal::ONE,
    }
}

/// Progress for every budget, in storage order.
pub fn progress_all(
    budgets: &[Budget],
    records: &[Transaction],
    now: NaiveDateTime,
    week_start: WeekStart,
) -> Vec<BudgetProgress> {
    budgets
        .iter()
        .map(|b| progress_with(b, records, now, week_start))
        .collect()
}
