// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::Catalog;
use crate::db;
use crate::engine::query::{QueryOptions, SortOrder, TypeFilter, query};
use crate::models::{CategoryKey, CategoryKind, Transaction};
use crate::utils::{fmt_signed, maybe_print_json, now, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let now = now();
    match m.subcommand() {
        Some(("add", sub)) => {
            let tx = add(conn, sub, now)?;
            println!("Recorded {} '{}' ({}) id={}", tx.amount, tx.title, tx.category, tx.id);
        }
        Some(("list", sub)) => list(conn, sub, now)?,
        Some(("edit", sub)) => {
            let tx = edit(conn, sub, now)?;
            println!("Updated {} '{}' ({})", tx.id, tx.title, tx.category);
        }
        Some(("rm", sub)) => {
            let tx = remove(conn, sub)?;
            println!("Removed {} '{}'", tx.id, tx.title);
        }
        _ => {}
    }
    Ok(())
}

fn kind_for(sub: &clap::ArgMatches, catalog: &Catalog, category: &CategoryKey) -> Option<CategoryKind> {
    match sub.get_one::<String>("type").map(String::as_str) {
        Some("income") => Some(CategoryKind::Income),
        Some("expense") => Some(CategoryKind::Expense),
        _ => catalog.kind(category.as_str()),
    }
}

fn date_for(sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<Option<NaiveDateTime>> {
    match sub.get_one::<String>("date") {
        Some(s) => Ok(Some(parse_date(s)?.and_time(now.time()))),
        None => Ok(None),
    }
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<Transaction> {
    let catalog = db::load_catalog(conn)?;
    let mut ledger = db::load_ledger(conn, &catalog)?;

    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = CategoryKey::new(sub.get_one::<String>("category").unwrap().trim());
    let kind = kind_for(sub, &catalog, &category).unwrap_or(CategoryKind::Expense);
    let title = sub
        .get_one::<String>("title")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| catalog.display_label(category.as_str()));

    let tx = Transaction {
        id: ledger.next_transaction_id(now),
        title,
        amount: kind.signed(amount),
        category,
        date: date_for(sub, now)?.unwrap_or(now),
        receipt_image_uri: sub.get_one::<String>("receipt").cloned(),
    };
    ledger.add_transaction(tx.clone())?;
    db::save_ledger(conn, &ledger)?;
    info!(id = %tx.id, "transaction recorded");
    Ok(tx)
}

pub fn edit(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<Transaction> {
    let catalog = db::load_catalog(conn)?;
    let mut ledger = db::load_ledger(conn, &catalog)?;
    let id = sub.get_one::<String>("id").unwrap().trim();
    let current = ledger
        .find_transaction(id)
        .cloned()
        .ok_or_else(|| anyhow!("Transaction '{}' not found", id))?;

    let category = sub
        .get_one::<String>("category")
        .map(|s| CategoryKey::new(s.trim()))
        .unwrap_or_else(|| current.category.clone());
    let magnitude = match sub.get_one::<String>("amount") {
        Some(s) => parse_decimal(s)?,
        None => current.amount,
    };
    // the sign only changes when asked to
    let kind = match sub.get_one::<String>("type") {
        Some(_) => kind_for(sub, &catalog, &category),
        None => None,
    }
    .unwrap_or_else(|| CategoryKind::of_amount(current.amount));

    let updated = Transaction {
        id: current.id.clone(),
        title: sub
            .get_one::<String>("title")
            .map(|s| s.trim().to_string())
            .unwrap_or(current.title),
        amount: kind.signed(magnitude),
        category,
        date: date_for(sub, now)?.unwrap_or(current.date),
        receipt_image_uri: sub
            .get_one::<String>("receipt")
            .cloned()
            .or(current.receipt_image_uri),
    };
    ledger.edit_transaction(id, updated.clone())?;
    db::save_ledger(conn, &ledger)?;
    Ok(updated)
}

pub fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<Transaction> {
    let catalog = db::load_catalog(conn)?;
    let mut ledger = db::load_ledger(conn, &catalog)?;
    let removed = ledger.delete_transaction(sub.get_one::<String>("id").unwrap().trim())?;
    db::save_ledger(conn, &ledger)?;
    Ok(removed)
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub title: String,
    pub category: String,
    pub amount: String,
    pub receipt: String,
}

#[derive(Serialize)]
pub struct SectionRows {
    pub title: String,
    pub items: Vec<TransactionRow>,
}

pub fn options_from(sub: &clap::ArgMatches) -> Result<QueryOptions> {
    let filter = sub.get_one::<String>("filter").map(String::as_str).unwrap_or("all");
    let sort = sub.get_one::<String>("sort").map(String::as_str).unwrap_or("date-desc");
    Ok(QueryOptions {
        category_prefix: sub
            .get_one::<String>("category_prefix")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        type_filter: TypeFilter::parse(filter).ok_or_else(|| anyhow!("Unknown filter '{}'", filter))?,
        search_text: sub
            .get_one::<String>("search")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        sort_order: SortOrder::parse(sort).ok_or_else(|| anyhow!("Unknown sort '{}'", sort))?,
    })
}

pub fn query_sections(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Vec<SectionRows>> {
    let catalog = db::load_catalog(conn)?;
    let ledger = db::load_ledger(conn, &catalog)?;
    let symbol = db::load_settings(conn)?.currency_symbol;
    let options = options_from(sub)?;

    let sections = query(&ledger.transactions, &options, now)
        .into_iter()
        .map(|section| SectionRows {
            title: section.title,
            items: section
                .items
                .into_iter()
                .map(|t| TransactionRow {
                    id: t.id.clone(),
                    date: t.date.format("%b %-d").to_string(),
                    title: t.title.clone(),
                    category: catalog.display_label(t.category.as_str()),
                    amount: fmt_signed(&t.amount, &symbol),
                    receipt: t.receipt_image_uri.clone().unwrap_or_default(),
                })
                .collect(),
        })
        .collect();
    Ok(sections)
}

fn list(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let sections = query_sections(conn, sub, now)?;
    if maybe_print_json(json_flag, jsonl_flag, &sections)? {
        return Ok(());
    }
    if sections.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }
    let sort = options_from(sub)?.sort_order;
    println!("Sorted by: {}", sort.label());
    for section in sections {
        println!("{}", section.title);
        let rows: Vec<Vec<String>> = section
            .items
            .into_iter()
            .map(|r| vec![r.id, r.date, r.title, r.category, r.amount])
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Title", "Category", "Amount"], rows)
        );
    }
    Ok(())
}
