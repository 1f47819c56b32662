// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::period::WeekStart;

/// Separator between the parent and child part of a category key (`food_groceries`).
pub const CATEGORY_SEPARATOR: char = '_';

/// Two-level category key, parsed once from the flat `parent_child` form.
///
/// The flat string is kept so prefix filters and storage round-trip without
/// rebuilding it; `split` marks where the parent ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CategoryKey {
    raw: String,
    split: Option<usize>,
}

impl CategoryKey {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let split = raw.find(CATEGORY_SEPARATOR);
        Self { raw, split }
    }

    /// Text before the first separator, or the whole key.
    pub fn parent(&self) -> &str {
        match self.split {
            Some(i) => &self.raw[..i],
            None => &self.raw,
        }
    }

    pub fn child(&self) -> Option<&str> {
        self.split.map(|i| &self.raw[i + CATEGORY_SEPARATOR.len_utf8()..])
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.raw.starts_with(prefix)
    }
}

impl From<String> for CategoryKey {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for CategoryKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<CategoryKey> for String {
    fn from(key: CategoryKey) -> Self {
        key.raw
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    /// Applies the sign convention: income is positive, expenses negative.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            CategoryKind::Income => amount.abs(),
            CategoryKind::Expense => -amount.abs(),
        }
    }

    pub fn of_amount(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            CategoryKind::Income
        } else {
            CategoryKind::Expense
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub key: CategoryKey,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    // empty until resolved against the catalog at load time
    #[serde(default)]
    pub title: String,
    pub amount: Decimal, // positive = income, negative = expense
    pub category: CategoryKey,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image_uri: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    /// Resolves a stored label; anything unrecognised is monthly.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "weekly" => BudgetPeriod::Weekly,
            "yearly" => BudgetPeriod::Yearly,
            _ => BudgetPeriod::Monthly,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }
}

impl<'de> Deserialize<'de> for BudgetPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(BudgetPeriod::from_label)
            .unwrap_or_default())
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: CategoryKey,
    pub amount: Decimal, // limit for one period
    #[serde(default)]
    pub period: BudgetPeriod,
}

fn default_user_name() -> String {
    "Guest".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default)]
    pub profile_image_uri: Option<String>,
    #[serde(default)]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub app_lock_enabled: bool,
    #[serde(default)]
    pub biometric_lock_enabled: bool,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub week_starts_on: WeekStart,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            profile_image_uri: None,
            notifications_enabled: false,
            app_lock_enabled: false,
            biometric_lock_enabled: false,
            currency_symbol: default_currency_symbol(),
            week_starts_on: WeekStart::default(),
        }
    }
}

/// Transaction timestamps. Written as local wall time; read from that form,
/// from RFC 3339 instants (converted to local time) or from a bare date.
mod timestamp {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    fn parse(raw: &str) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}
