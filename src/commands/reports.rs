// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::engine::aggregate::{Totals, sum_by_type, total_balance};
use crate::engine::compare::{MonthlyComparison, compare, percent_change};
use crate::engine::period::start_of_month;
use crate::engine::rollup::{MAX_BUCKETS, RollupSlice, rollup};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, now, parse_month, pretty_table};
use anyhow::Result;
use chrono::{Months, NaiveDateTime};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let now = now();
    match m.subcommand() {
        Some(("overview", sub)) => print_overview(conn, sub, now)?,
        Some(("compare", sub)) => print_comparison(conn, sub, now)?,
        Some(("spending", sub)) => print_spending(conn, sub, now)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Overview {
    pub user_name: String,
    pub balance: Decimal,
    pub totals: Totals,
    pub savings: Decimal,
    pub this_month: Vec<RollupSlice>,
}

pub fn overview(conn: &Connection, now: NaiveDateTime) -> Result<Overview> {
    let catalog = db::load_catalog(conn)?;
    let ledger = db::load_ledger(conn, &catalog)?;
    let settings = db::load_settings(conn)?;
    let totals = sum_by_type(&ledger.transactions, None, None);
    let month_start = start_of_month(now);
    let this_month = rollup(
        ledger.transactions.iter().filter(|t| t.date >= month_start),
        MAX_BUCKETS,
    );
    Ok(Overview {
        user_name: settings.user_name,
        balance: total_balance(&ledger.transactions),
        totals,
        savings: totals.net(),
        this_month,
    })
}

fn print_overview(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let ov = overview(conn, now)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ov)? {
        return Ok(());
    }
    let symbol = db::load_settings(conn)?.currency_symbol;
    println!("{}", ov.user_name);
    println!(
        "{}",
        pretty_table(
            &["Total Balance", "Income", "Expenses", "Savings"],
            vec![vec![
                fmt_money(&ov.balance, &symbol),
                fmt_money(&ov.totals.income, &symbol),
                fmt_money(&ov.totals.expenses.abs(), &symbol),
                fmt_money(&ov.savings, &symbol),
            ]],
        )
    );
    println!("Spending breakdown, this month");
    print_slices(&ov.this_month, &symbol);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    #[serde(flatten)]
    pub months: MonthlyComparison,
    pub income_change: Decimal,
    pub expense_change: Decimal,
}

pub fn comparison(conn: &Connection, now: NaiveDateTime) -> Result<ComparisonReport> {
    let catalog = db::load_catalog(conn)?;
    let ledger = db::load_ledger(conn, &catalog)?;
    let months = compare(&ledger.transactions, now);
    Ok(ComparisonReport {
        income_change: percent_change(months.current.income, months.previous.income),
        expense_change: percent_change(
            months.current.expenses.abs(),
            months.previous.expenses.abs(),
        ),
        months,
    })
}

fn print_comparison(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let report = comparison(conn, now)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let symbol = db::load_settings(conn)?.currency_symbol;
    let cur = report.months.current;
    let prev = report.months.previous;
    let data = vec![
        vec![
            "Income".to_string(),
            fmt_money(&cur.income, &symbol),
            fmt_money(&prev.income, &symbol),
            fmt_percent(&report.income_change),
        ],
        vec![
            "Expenses".to_string(),
            fmt_money(&cur.expenses.abs(), &symbol),
            fmt_money(&prev.expenses.abs(), &symbol),
            fmt_percent(&report.expense_change),
        ],
        vec![
            "Savings".to_string(),
            fmt_money(&cur.net(), &symbol),
            fmt_money(&prev.net(), &symbol),
            String::new(),
        ],
    ];
    println!(
        "{}",
        pretty_table(&["", "This month", "Last month", "Change"], data)
    );
    Ok(())
}

/// Expense roll-up for one calendar month (default: the current one).
pub fn spending(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Vec<RollupSlice>> {
    let catalog = db::load_catalog(conn)?;
    let ledger = db::load_ledger(conn, &catalog)?;
    let start = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => start_of_month(now),
    };
    let end = start.checked_add_months(Months::new(1));
    Ok(rollup(
        ledger
            .transactions
            .iter()
            .filter(|t| t.date >= start && end.is_none_or(|e| t.date < e)),
        MAX_BUCKETS,
    ))
}

fn print_spending(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let slices = spending(conn, sub, now)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &slices)? {
        return Ok(());
    }
    let symbol = db::load_settings(conn)?.currency_symbol;
    print_slices(&slices, &symbol);
    Ok(())
}

fn print_slices(slices: &[RollupSlice], symbol: &str) {
    if slices.is_empty() {
        println!("No spending data for this period.");
        return;
    }
    let data = slices
        .iter()
        .map(|s| {
            let drill = match s.drill_down_prefix() {
                Some(prefix) => format!("tx list --category-prefix {}", prefix),
                None => "tx list".to_string(),
            };
            vec![
                s.key.clone(),
                fmt_money(&s.amount, symbol),
                format!("{}%", s.percentage),
                drill,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Share", "Drill down"], data)
    );
}
