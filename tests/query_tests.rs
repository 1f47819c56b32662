// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use spendwise::engine::query::{QueryOptions, SortOrder, TypeFilter, query, section_title};
use spendwise::models::{CategoryKey, Transaction};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn now() -> NaiveDateTime {
    at(20, 18)
}

fn tx(id: &str, title: &str, category: &str, amount: i64, date: NaiveDateTime) -> Transaction {
    Transaction {
        id: id.to_string(),
        title: title.to_string(),
        amount: Decimal::from(amount),
        category: CategoryKey::new(category),
        date,
        receipt_image_uri: None,
    }
}

fn ledger() -> Vec<Transaction> {
    vec![
        tx("1", "Fresh Foods Market", "food_groceries", -65, at(20, 9)),
        tx("2", "Acme Corp", "salary", 3500, at(20, 8)),
        tx("3", "Morning Coffee", "food_restaurants", -4, at(19, 7)),
        tx("4", "City Power", "utils_electricity", -89, at(18, 12)),
        tx("5", "Coffee Beans", "food_groceries", -12, at(18, 15)),
        tx("6", "Gas", "transport_gas", -40, at(10, 11)),
    ]
}

fn ids(sections: &[spendwise::engine::query::Section<'_>]) -> Vec<String> {
    sections
        .iter()
        .flat_map(|s| s.items.iter().map(|t| t.id.clone()))
        .collect()
}

#[test]
fn groups_by_day_with_relative_titles() {
    let all = ledger();
    let sections = query(&all, &QueryOptions::default(), now());
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Today",
            "Yesterday",
            "Monday, August 18, 2025",
            "Sunday, August 10, 2025"
        ]
    );
    assert_eq!(ids(&sections), vec!["1", "2", "3", "5", "4", "6"]);
}

#[test]
fn today_section_follows_sort_order() {
    let all = ledger();
    let newest = query(&all, &QueryOptions::default(), now());
    let today: Vec<&str> = newest[0].items.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(today, vec!["1", "2"]);

    let opts = QueryOptions {
        sort_order: SortOrder::DateAsc,
        ..Default::default()
    };
    let oldest = query(&all, &opts, now());
    assert_eq!(oldest.last().unwrap().title, "Today");
    let today: Vec<&str> = oldest
        .last()
        .unwrap()
        .items
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(today, vec!["2", "1"]);
}

#[test]
fn search_is_case_insensitive_under_every_sort() {
    let all = ledger();
    let mut order = SortOrder::default();
    for _ in 0..4 {
        let opts = QueryOptions {
            search_text: "COFFEE".to_string(),
            sort_order: order,
            ..Default::default()
        };
        let mut found = ids(&query(&all, &opts, now()));
        found.sort();
        assert_eq!(found, vec!["3", "5"]);
        order = order.next();
    }
    assert_eq!(order, SortOrder::DateDesc);
}

#[test]
fn search_matches_exact_substring() {
    let all = ledger();
    let leading_space = QueryOptions {
        search_text: " coffee".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&query(&all, &leading_space, now())), vec!["3"]);

    let spaces = QueryOptions {
        search_text: "   ".to_string(),
        ..Default::default()
    };
    assert!(query(&all, &spaces, now()).is_empty());

    let one_space = QueryOptions {
        search_text: " ".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&query(&all, &one_space, now())), vec!["1", "2", "3", "5", "4"]);
}

#[test]
fn prefix_and_type_filters_combine() {
    let all = ledger();
    let opts = QueryOptions {
        category_prefix: Some("food".to_string()),
        type_filter: TypeFilter::Expenses,
        ..Default::default()
    };
    assert_eq!(ids(&query(&all, &opts, now())), vec!["1", "3", "5"]);

    let income = QueryOptions {
        type_filter: TypeFilter::Income,
        ..Default::default()
    };
    assert_eq!(ids(&query(&all, &income, now())), vec!["2"]);

    let none = QueryOptions {
        category_prefix: Some("food".to_string()),
        type_filter: TypeFilter::Income,
        ..Default::default()
    };
    assert!(query(&all, &none, now()).is_empty());
}

#[test]
fn amount_sort_merges_days_into_first_seen_sections() {
    let all = ledger();
    let opts = QueryOptions {
        sort_order: SortOrder::AmountAsc,
        ..Default::default()
    };
    let sections = query(&all, &opts, now());
    // -89 (18th), -65 (20th), -40 (10th), -12 (18th), -4 (19th), 3500 (20th)
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Monday, August 18, 2025",
            "Today",
            "Sunday, August 10, 2025",
            "Yesterday"
        ]
    );
    assert_eq!(ids(&sections), vec!["4", "5", "1", "2", "6", "3"]);
}

#[test]
fn amount_sort_is_stable_for_ties() {
    let all = vec![
        tx("a", "One", "other", -10, at(3, 1)),
        tx("b", "Two", "other", -10, at(5, 1)),
        tx("c", "Three", "other", -10, at(4, 1)),
    ];
    let opts = QueryOptions {
        sort_order: SortOrder::AmountDesc,
        ..Default::default()
    };
    assert_eq!(ids(&query(&all, &opts, now())), vec!["a", "b", "c"]);
}

#[test]
fn sections_cover_every_match_once() {
    let all = ledger();
    let opts = QueryOptions {
        category_prefix: Some("f".to_string()),
        sort_order: SortOrder::AmountDesc,
        ..Default::default()
    };
    let sections = query(&all, &opts, now());
    let mut seen = ids(&sections);
    seen.sort();
    assert_eq!(seen, vec!["1", "3", "5"]);
    assert!(sections.iter().all(|s| !s.items.is_empty()));
    let days: std::collections::HashSet<_> = sections.iter().map(|s| s.items[0].day()).collect();
    assert_eq!(days.len(), sections.len());
}

#[test]
fn query_is_idempotent() {
    let all = ledger();
    let opts = QueryOptions {
        search_text: "o".to_string(),
        sort_order: SortOrder::AmountDesc,
        ..Default::default()
    };
    assert_eq!(query(&all, &opts, now()), query(&all, &opts, now()));
}

#[test]
fn empty_input_has_no_sections() {
    let all: Vec<Transaction> = Vec::new();
    assert!(query(&all, &QueryOptions::default(), now()).is_empty());
}

#[test]
fn section_titles_across_month_boundary() {
    let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    let yesterday = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
    assert_eq!(section_title(yesterday, today), "Yesterday");
    assert_eq!(
        section_title(NaiveDate::from_ymd_opt(2025, 8, 30).unwrap(), today),
        "Saturday, August 30, 2025"
    );
}

#[test]
fn sort_labels_and_parsing() {
    assert_eq!(SortOrder::parse("amount-asc"), Some(SortOrder::AmountAsc));
    assert_eq!(SortOrder::parse("sideways"), None);
    assert_eq!(SortOrder::DateDesc.label(), "Newest");
    assert_eq!(SortOrder::AmountAsc.label(), "Lowest");
    assert_eq!(TypeFilter::parse("Expenses"), Some(TypeFilter::Expenses));
}
