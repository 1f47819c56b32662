// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use spendwise::engine::compare::{compare, percent_change};
use spendwise::models::{CategoryKey, Transaction};

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn at(y: i32, m: u32, day: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, day)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn tx(id: &str, amount: &str, date: NaiveDateTime) -> Transaction {
    Transaction {
        id: id.to_string(),
        title: String::new(),
        amount: d(amount),
        category: CategoryKey::new(if amount.starts_with('-') { "other" } else { "salary" }),
        date,
        receipt_image_uri: None,
    }
}

#[test]
fn this_month_against_last_month() {
    let now = at(2025, 8, 20, 10, 0);
    let rows = vec![
        tx("1", "3500", at(2025, 8, 1, 9, 0)),
        tx("2", "-150", at(2025, 8, 5, 12, 0)),
        tx("3", "3400", at(2025, 7, 1, 9, 0)),
        tx("4", "-100", at(2025, 7, 12, 18, 0)),
        tx("5", "-999", at(2025, 6, 30, 23, 0)),
    ];
    let cmp = compare(&rows, now);
    assert_eq!(cmp.current.income, d("3500"));
    assert_eq!(cmp.current.expenses, d("-150"));
    assert_eq!(cmp.current.net(), d("3350"));
    assert_eq!(cmp.previous.income, d("3400"));
    assert_eq!(cmp.previous.expenses, d("-100"));
    assert_eq!(cmp.previous.net(), d("3300"));
}

#[test]
fn previous_month_covers_its_whole_last_day() {
    let now = at(2025, 8, 2, 8, 0);
    let rows = vec![
        tx("1", "-20", at(2025, 7, 31, 23, 59)),
        tx("2", "-30", at(2025, 8, 1, 0, 0)),
    ];
    let cmp = compare(&rows, now);
    assert_eq!(cmp.previous.expenses, d("-20"));
    assert_eq!(cmp.current.expenses, d("-30"));
}

#[test]
fn january_compares_with_december() {
    let now = at(2025, 1, 10, 12, 0);
    let rows = vec![
        tx("1", "1000", at(2024, 12, 15, 9, 0)),
        tx("2", "1200", at(2025, 1, 3, 9, 0)),
        tx("3", "500", at(2024, 11, 30, 9, 0)),
    ];
    let cmp = compare(&rows, now);
    assert_eq!(cmp.previous.income, d("1000"));
    assert_eq!(cmp.current.income, d("1200"));
}

#[test]
fn percent_change_rules() {
    assert_eq!(percent_change(d("150"), d("100")), d("50"));
    assert_eq!(percent_change(d("50"), d("100")), d("-50"));
    assert_eq!(percent_change(d("100"), Decimal::ZERO), d("100"));
    assert_eq!(percent_change(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn percent_change_saturates_on_tiny_previous() {
    assert_eq!(percent_change(d("100000000"), Decimal::new(1, 22)), Decimal::MAX);
    assert_eq!(percent_change(Decimal::ZERO, Decimal::new(1, 22)), d("-100"));
}
