// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::engine::budget::{BudgetProgress, progress_all};
use crate::models::{BudgetPeriod, CategoryKey};
use crate::utils::{fmt_money, maybe_print_json, now, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::info;

const BAR_WIDTH: u32 = 20;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let catalog = db::load_catalog(conn)?;
            let mut ledger = db::load_ledger(conn, &catalog)?;
            let removed = ledger.remove_budget(sub.get_one::<String>("category").unwrap().trim())?;
            db::save_ledger(conn, &ledger)?;
            println!("Removed budget for {}", removed.category);
        }
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let catalog = db::load_catalog(conn)?;
    let mut ledger = db::load_ledger(conn, &catalog)?;
    let category = CategoryKey::new(sub.get_one::<String>("category").unwrap().trim());
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let period = sub
        .get_one::<String>("period")
        .map(|s| BudgetPeriod::from_label(s))
        .unwrap_or_default();
    ledger.set_budget(category.clone(), amount, period)?;
    db::save_ledger(conn, &ledger)?;
    info!(category = %category, %amount, %period, "budget set");
    println!("Budget set for {} = {} ({})", category, amount, period);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let catalog = db::load_catalog(conn)?;
    let ledger = db::load_ledger(conn, &catalog)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ledger.budgets)? {
        return Ok(());
    }
    let symbol = db::load_settings(conn)?.currency_symbol;
    let data = ledger
        .budgets
        .iter()
        .map(|b| {
            vec![
                catalog.display_label(b.category.as_str()),
                fmt_money(&b.amount, &symbol),
                b.period.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Limit", "Period"], data));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BudgetStatusRow {
    pub label: String,
    pub period: BudgetPeriod,
    #[serde(flatten)]
    pub progress: BudgetProgress,
}

pub fn status_rows(conn: &Connection, now: NaiveDateTime) -> Result<Vec<BudgetStatusRow>> {
    let catalog = db::load_catalog(conn)?;
    let ledger = db::load_ledger(conn, &catalog)?;
    let settings = db::load_settings(conn)?;
    let progress = progress_all(
        &ledger.budgets,
        &ledger.transactions,
        now,
        settings.week_starts_on,
    );
    Ok(ledger
        .budgets
        .iter()
        .zip(progress)
        .map(|(b, p)| BudgetStatusRow {
            label: catalog.display_label(b.category.as_str()),
            period: b.period,
            progress: p,
        })
        .collect())
}

fn progress_bar(ratio: Decimal) -> String {
    let filled = (ratio * Decimal::from(BAR_WIDTH))
        .round()
        .to_u32()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled as usize),
        ".".repeat((BAR_WIDTH - filled) as usize)
    )
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let rows = status_rows(conn, now())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let symbol = db::load_settings(conn)?.currency_symbol;
    let data = rows
        .iter()
        .map(|r| {
            let p = &r.progress;
            vec![
                r.label.clone(),
                r.period.to_string(),
                format!("{} / {}", fmt_money(&p.spent, &symbol), fmt_money(&p.limit, &symbol)),
                progress_bar(p.display_ratio()),
                if p.is_over_budget { "OVER".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Budget", "Period", "Spent", "Progress", ""], data)
    );
    Ok(())
}
