// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::InputError;
use crate::models::{Budget, BudgetPeriod, CategoryKey, Transaction};

/// In-memory transaction and budget collections. Records are appended,
/// removed or replaced whole; fields of a stored record are never patched.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Self {
        Self {
            transactions,
            budgets,
        }
    }

    pub fn find_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Newest entries go first.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<(), InputError> {
        if self.find_transaction(&tx.id).is_some() {
            return Err(InputError::DuplicateTransaction(tx.id));
        }
        debug!(id = %tx.id, amount = %tx.amount, "add transaction");
        self.transactions.insert(0, tx);
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction, InputError> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| InputError::UnknownTransaction(id.to_string()))?;
        debug!(id, "delete transaction");
        Ok(self.transactions.remove(pos))
    }

    /// Swaps in `updated` for the record with `id`; the id itself is kept.
    pub fn edit_transaction(&mut self, id: &str, updated: Transaction) -> Result<(), InputError> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| InputError::UnknownTransaction(id.to_string()))?;
        *slot = Transaction {
            id: id.to_string(),
            ..updated
        };
        debug!(id, "replace transaction");
        Ok(())
    }

    /// Upsert keyed by category.
    pub fn set_budget(
        &mut self,
        category: CategoryKey,
        amount: Decimal,
        period: BudgetPeriod,
    ) -> Result<(), InputError> {
        if amount <= Decimal::ZERO {
            return Err(InputError::NonPositiveBudget(amount));
        }
        let budget = Budget {
            category,
            amount,
            period,
        };
        match self
            .budgets
            .iter_mut()
            .find(|b| b.category == budget.category)
        {
            Some(existing) => *existing = budget,
            None => self.budgets.push(budget),
        }
        Ok(())
    }

    pub fn remove_budget(&mut self, category: &str) -> Result<Budget, InputError> {
        let pos = self
            .budgets
            .iter()
            .position(|b| b.category.as_str() == category)
            .ok_or_else(|| InputError::UnknownBudget(category.to_string()))?;
        Ok(self.budgets.remove(pos))
    }

    /// Epoch milliseconds of the local wall time `now`, bumped until unused.
    pub fn next_transaction_id(&self, now: NaiveDateTime) -> String {
        let mut candidate = Local
            .from_local_datetime(&now)
            .earliest()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_else(|| now.and_utc().timestamp_millis());
        while self.find_transaction(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}
