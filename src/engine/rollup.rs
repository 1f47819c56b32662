// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expense roll-up by parent category with a collapsed "Other" tail.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::Transaction;

pub const MAX_BUCKETS: usize = 5;
pub const OTHER_BUCKET: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceKind {
    Parent,
    /// Synthetic bucket holding the groups past the cardinality limit.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupSlice {
    pub key: String,
    pub amount: Decimal, // absolute spend
    pub percentage: u32,
    pub kind: SliceKind,
}

impl RollupSlice {
    /// Category prefix to filter the transaction list with when drilling into
    /// this slice. The "Other" bucket opens the unfiltered list.
    pub fn drill_down_prefix(&self) -> Option<&str> {
        match self.kind {
            SliceKind::Parent => Some(&self.key),
            SliceKind::Other => None,
        }
    }
}

/// Groups expenses by parent category, largest first (ties by key), folding
/// everything beyond `max_buckets - 1` groups into "Other" when there are more
/// than `max_buckets` groups.
pub fn rollup<'a, I>(records: I, max_buckets: usize) -> Vec<RollupSlice>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_parent: HashMap<&str, Decimal> = HashMap::new();
    for t in records.into_iter().filter(|t| t.is_expense()) {
        *by_parent.entry(t.category.parent()).or_insert(Decimal::ZERO) += t.amount.abs();
    }
    if by_parent.is_empty() {
        return Vec::new();
    }

    let mut groups: Vec<(&str, Decimal)> = by_parent.into_iter().collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let total: Decimal = groups.iter().map(|(_, amt)| *amt).sum();

    let mut slices: Vec<RollupSlice> = Vec::with_capacity(groups.len().min(max_buckets));
    let keep = if groups.len() > max_buckets {
        max_buckets.saturating_sub(1)
    } else {
        groups.len()
    };
    for (key, amount) in groups.iter().take(keep) {
        slices.push(RollupSlice {
            key: (*key).to_string(),
            amount: *amount,
            percentage: percentage_of(*amount, total),
            kind: SliceKind::Parent,
        });
    }
    if keep < groups.len() {
        let rest: Decimal = groups[keep..].iter().map(|(_, amt)| *amt).sum();
        slices.push(RollupSlice {
            key: OTHER_BUCKET.to_string(),
            amount: rest,
            percentage: percentage_of(rest, total),
            kind: SliceKind::Other,
        });
    }
    slices
}

/// `round(amount / total * 100)`, zero when there is nothing to divide by.
pub fn percentage_of(amount: Decimal, total: Decimal) -> u32 {
    if total.is_zero() {
        return 0;
    }
    (amount / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}
