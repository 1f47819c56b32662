// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filter, search, sort and day-grouping for the transaction list.
//!
//! Stages always run in the same order: category prefix, type filter, text
//! search, sort, grouping. Each stage sees only what the previous one kept.

use std::collections::HashMap;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expenses,
}

impl TypeFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(TypeFilter::All),
            "income" => Some(TypeFilter::Income),
            "expenses" | "expense" => Some(TypeFilter::Expenses),
            _ => None,
        }
    }

    fn keeps(self, t: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => t.is_income(),
            TypeFilter::Expenses => t.is_expense(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date-desc" => Some(SortOrder::DateDesc),
            "date-asc" => Some(SortOrder::DateAsc),
            "amount-desc" => Some(SortOrder::AmountDesc),
            "amount-asc" => Some(SortOrder::AmountAsc),
            _ => None,
        }
    }

    /// Next order in the sort toggle cycle.
    pub fn next(self) -> Self {
        match self {
            SortOrder::DateDesc => SortOrder::DateAsc,
            SortOrder::DateAsc => SortOrder::AmountDesc,
            SortOrder::AmountDesc => SortOrder::AmountAsc,
            SortOrder::AmountAsc => SortOrder::DateDesc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::DateDesc => "Newest",
            SortOrder::DateAsc => "Oldest",
            SortOrder::AmountDesc => "Highest",
            SortOrder::AmountAsc => "Lowest",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub category_prefix: Option<String>,
    pub type_filter: TypeFilter,
    pub search_text: String,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<'a> {
    pub title: String,
    pub items: Vec<&'a Transaction>,
}

pub fn query<'a>(
    all: &'a [Transaction],
    options: &QueryOptions,
    now: NaiveDateTime,
) -> Vec<Section<'a>> {
    let needle = options.search_text.to_lowercase();
    let mut rows: Vec<&Transaction> = all
        .iter()
        .filter(|t| match options.category_prefix.as_deref() {
            Some(prefix) => t.category.starts_with(prefix),
            None => true,
        })
        .filter(|t| options.type_filter.keeps(t))
        .filter(|t| needle.is_empty() || t.title.to_lowercase().contains(&needle))
        .collect();

    // sort_by is stable, ties keep input order
    match options.sort_order {
        SortOrder::DateDesc => rows.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::DateAsc => rows.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::AmountDesc => rows.sort_by(|a, b| b.amount.cmp(&a.amount)),
        SortOrder::AmountAsc => rows.sort_by(|a, b| a.amount.cmp(&b.amount)),
    }

    group_by_day(rows, now.date())
}

fn group_by_day(rows: Vec<&Transaction>, today: NaiveDate) -> Vec<Section<'_>> {
    let mut sections: Vec<Section<'_>> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    for t in rows {
        let day = t.day();
        let slot = *index.entry(day).or_insert_with(|| {
            sections.push(Section {
                title: section_title(day, today),
                items: Vec::new(),
            });
            sections.len() - 1
        });
        sections[slot].items.push(t);
    }
    sections
}

/// "Today", "Yesterday", or the long calendar form ("Monday, October 19, 2026").
pub fn section_title(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else if today.checked_sub_days(Days::new(1)) == Some(day) {
        "Yesterday".to_string()
    } else {
        day.format("%A, %B %-d, %Y").to_string()
    }
}
