// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use clap::ArgMatches;
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendwise::commands::transactions;
use spendwise::{cli, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 20)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

/// Matches of the innermost subcommand.
fn leaf(args: &[&str]) -> ArgMatches {
    let mut m = cli::build_cli().get_matches_from(args);
    while let Some((_, sub)) = m.subcommand() {
        m = sub.clone();
    }
    m
}

#[test]
fn add_signs_amount_from_category() {
    let conn = setup();
    let expense = transactions::add(
        &conn,
        &leaf(&["spendwise", "tx", "add", "--amount", "12.50", "--category", "food_restaurants"]),
        now(),
    )
    .unwrap();
    assert_eq!(expense.amount, "-12.50".parse::<Decimal>().unwrap());
    assert_eq!(expense.title, "Food: Restaurants");
    assert_eq!(expense.date, now());

    let income = transactions::add(
        &conn,
        &leaf(&[
            "spendwise", "tx", "add", "--amount", "-3500", "--category", "salary", "--title",
            "Acme Corp", "--date", "2025-08-01",
        ]),
        now(),
    )
    .unwrap();
    assert_eq!(income.amount, Decimal::from(3500));
    assert_eq!(income.date.date(), NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    assert_ne!(income.id, expense.id);

    let catalog = db::load_catalog(&conn).unwrap();
    let ledger = db::load_ledger(&conn, &catalog).unwrap();
    assert_eq!(ledger.transactions[0].id, income.id);
    assert_eq!(ledger.transactions.len(), 2);
}

#[test]
fn explicit_type_overrides_category_kind() {
    let conn = setup();
    let refund = transactions::add(
        &conn,
        &leaf(&[
            "spendwise", "tx", "add", "--amount", "20", "--category", "food_groceries", "--type",
            "income", "--title", "Refund",
        ]),
        now(),
    )
    .unwrap();
    assert_eq!(refund.amount, Decimal::from(20));

    let custom = transactions::add(
        &conn,
        &leaf(&["spendwise", "tx", "add", "--amount", "9", "--category", "pets_vet"]),
        now(),
    )
    .unwrap();
    assert_eq!(custom.amount, Decimal::from(-9));
    assert_eq!(custom.title, "Pets_vet");
}

#[test]
fn invalid_amount_is_rejected() {
    let conn = setup();
    let res = transactions::add(
        &conn,
        &leaf(&["spendwise", "tx", "add", "--amount", "abc", "--category", "other"]),
        now(),
    );
    assert!(res.is_err());
    let catalog = db::load_catalog(&conn).unwrap();
    assert!(db::load_ledger(&conn, &catalog).unwrap().transactions.is_empty());
}

#[test]
fn edit_keeps_sign_unless_type_given() {
    let conn = setup();
    let t = transactions::add(
        &conn,
        &leaf(&["spendwise", "tx", "add", "--amount", "30", "--category", "transport_gas"]),
        now(),
    )
    .unwrap();

    let edited = transactions::edit(
        &conn,
        &leaf(&["spendwise", "tx", "edit", "--id", t.id.as_str(), "--amount", "45", "--title", "Fuel"]),
        now(),
    )
    .unwrap();
    assert_eq!(edited.id, t.id);
    assert_eq!(edited.amount, Decimal::from(-45));
    assert_eq!(edited.title, "Fuel");
    assert_eq!(edited.category, t.category);

    let flipped = transactions::edit(
        &conn,
        &leaf(&["spendwise", "tx", "edit", "--id", t.id.as_str(), "--type", "income"]),
        now(),
    )
    .unwrap();
    assert_eq!(flipped.amount, Decimal::from(45));

    let missing = transactions::edit(
        &conn,
        &leaf(&["spendwise", "tx", "edit", "--id", "nope", "--amount", "1"]),
        now(),
    );
    assert!(missing.is_err());
}

#[test]
fn remove_deletes_by_id() {
    let conn = setup();
    let t = transactions::add(
        &conn,
        &leaf(&["spendwise", "tx", "add", "--amount", "5", "--category", "other"]),
        now(),
    )
    .unwrap();
    let removed = transactions::remove(&conn, &leaf(&["spendwise", "tx", "rm", "--id", t.id.as_str()])).unwrap();
    assert_eq!(removed.id, t.id);
    assert!(transactions::remove(&conn, &leaf(&["spendwise", "tx", "rm", "--id", t.id.as_str()])).is_err());
}

#[test]
fn list_groups_and_formats_sections() {
    let conn = setup();
    db::seed_demo(&conn, now()).unwrap();

    let sections = transactions::query_sections(&conn, &leaf(&["spendwise", "tx", "list"]), now()).unwrap();
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles[0], "Today");
    assert_eq!(titles[1], "Yesterday");
    let amounts: Vec<&str> = sections[0].items.iter().map(|r| r.amount.as_str()).collect();
    assert!(amounts.contains(&"+$3500.00"));
    assert!(amounts.contains(&"-$65.20"));

    let coffee = transactions::query_sections(
        &conn,
        &leaf(&["spendwise", "tx", "list", "--search", "COFFEE", "--sort", "amount-asc"]),
        now(),
    )
    .unwrap();
    assert_eq!(coffee.len(), 1);
    assert_eq!(coffee[0].items[0].title, "Morning Coffee");

    // the CLI trims padding around the search text
    let padded = transactions::query_sections(
        &conn,
        &leaf(&["spendwise", "tx", "list", "--search", "  coffee  "]),
        now(),
    )
    .unwrap();
    assert_eq!(padded.len(), 1);
    assert_eq!(padded[0].items[0].title, "Morning Coffee");

    let food = transactions::query_sections(
        &conn,
        &leaf(&["spendwise", "tx", "list", "--category-prefix", "food", "--filter", "income"]),
        now(),
    )
    .unwrap();
    assert!(food.is_empty());
}
