// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use spendwise::engine::rollup::{MAX_BUCKETS, OTHER_BUCKET, SliceKind, percentage_of, rollup};
use spendwise::models::{CategoryKey, Transaction};

fn when() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn tx(id: &str, category: &str, amount: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        title: String::new(),
        amount: Decimal::from(amount),
        category: CategoryKey::new(category),
        date: when(),
        receipt_image_uri: None,
    }
}

#[test]
fn groups_children_under_parent() {
    let rows = vec![
        tx("1", "food_groceries", -60),
        tx("2", "food_restaurants", -40),
        tx("3", "transport_gas", -50),
        tx("4", "salary", 3000),
    ];
    let slices = rollup(&rows, MAX_BUCKETS);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].key, "food");
    assert_eq!(slices[0].amount, Decimal::from(100));
    assert_eq!(slices[0].percentage, 67);
    assert_eq!(slices[1].key, "transport");
    assert_eq!(slices[1].percentage, 33);
    assert!(slices.iter().all(|s| s.kind == SliceKind::Parent));
}

#[test]
fn folds_tail_into_other() {
    let rows = vec![
        tx("1", "housing_rent", -500),
        tx("2", "food_groceries", -400),
        tx("3", "transport_gas", -300),
        tx("4", "utils_water", -200),
        tx("5", "ent_movies", -100),
        tx("6", "gift_bday", -50),
    ];
    let slices = rollup(&rows, MAX_BUCKETS);
    assert_eq!(slices.len(), 5);
    let keys: Vec<&str> = slices.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["housing", "food", "transport", "utils", OTHER_BUCKET]);
    let other = &slices[4];
    assert_eq!(other.kind, SliceKind::Other);
    assert_eq!(other.amount, Decimal::from(150));
    assert_eq!(other.drill_down_prefix(), None);
    assert_eq!(slices[0].drill_down_prefix(), Some("housing"));

    let percentages: Vec<u32> = slices.iter().map(|s| s.percentage).collect();
    assert_eq!(percentages, vec![32, 26, 19, 13, 10]);
}

#[test]
fn total_is_conserved() {
    let rows = vec![
        tx("1", "a_x", -7),
        tx("2", "b_x", -11),
        tx("3", "c", -13),
        tx("4", "d_y", -17),
        tx("5", "e_z", -19),
        tx("6", "f", -23),
        tx("7", "g_q", -29),
        tx("8", "a_y", -3),
        tx("9", "salary", 1000),
    ];
    let expenses: Decimal = rows
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount.abs())
        .sum();
    for max in 1..=8 {
        let slices = rollup(&rows, max);
        assert!(slices.len() <= max);
        let total: Decimal = slices.iter().map(|s| s.amount).sum();
        assert_eq!(total, expenses);
        let pct: u32 = slices.iter().map(|s| s.percentage).sum();
        assert!((98..=102).contains(&pct), "max={} pct={}", max, pct);
    }
}

#[test]
fn exactly_max_groups_has_no_other() {
    let rows: Vec<Transaction> = ["a", "b", "c", "d", "e"]
        .iter()
        .enumerate()
        .map(|(i, k)| tx(&i.to_string(), k, -10 - i as i64))
        .collect();
    let slices = rollup(&rows, MAX_BUCKETS);
    assert_eq!(slices.len(), 5);
    assert!(slices.iter().all(|s| s.kind == SliceKind::Parent));
}

#[test]
fn equal_amounts_order_by_key() {
    let rows = vec![
        tx("1", "zoo", -100),
        tx("2", "ant_x", -100),
        tx("3", "mid", -100),
    ];
    let keys: Vec<String> = rollup(&rows, MAX_BUCKETS).into_iter().map(|s| s.key).collect();
    assert_eq!(keys, vec!["ant", "mid", "zoo"]);
}

#[test]
fn no_expenses_no_slices() {
    let rows = vec![tx("1", "salary", 3000), tx("2", "other", 0)];
    assert!(rollup(&rows, MAX_BUCKETS).is_empty());
    let none: Vec<Transaction> = Vec::new();
    assert!(rollup(&none, MAX_BUCKETS).is_empty());
}

#[test]
fn percentage_rounds_half_away_from_zero() {
    assert_eq!(percentage_of(Decimal::from(1), Decimal::from(8)), 13); // 12.5
    assert_eq!(percentage_of(Decimal::from(1), Decimal::from(3)), 33);
    assert_eq!(percentage_of(Decimal::from(5), Decimal::ZERO), 0);
}
