// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value document store. Each collection is one JSON document under a
//! fixed key, read and written whole.

use anyhow::{Context, Result};
use chrono::{Days, Months, NaiveDateTime};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::ledger::Ledger;
use crate::models::{Budget, BudgetPeriod, CategoryEntry, CategoryKey, Settings, Transaction};

pub const TRANSACTIONS_KEY: &str = "@transactions_data";
pub const BUDGETS_KEY: &str = "@app_budgets";
pub const SETTINGS_KEY: &str = "@app_settings";
pub const CATEGORIES_KEY: &str = "@app_categories";

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendwise", "spendwise"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendwise.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    debug!(path = %path.display(), "document store ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS documents(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

pub fn load_doc<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM documents WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(s) => {
            let v = serde_json::from_str(&s)
                .with_context(|| format!("Corrupt document '{}'", key))?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

pub fn save_doc<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO documents(key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, json],
    )?;
    debug!(key, bytes = json.len(), "document saved");
    Ok(())
}

pub fn load_settings(conn: &Connection) -> Result<Settings> {
    Ok(load_doc(conn, SETTINGS_KEY)?.unwrap_or_default())
}

pub fn save_settings(conn: &Connection, settings: &Settings) -> Result<()> {
    save_doc(conn, SETTINGS_KEY, settings)
}

pub fn load_catalog(conn: &Connection) -> Result<Catalog> {
    let custom: Vec<CategoryEntry> = load_doc(conn, CATEGORIES_KEY)?.unwrap_or_default();
    Ok(Catalog::new(custom))
}

pub fn save_catalog(conn: &Connection, catalog: &Catalog) -> Result<()> {
    save_doc(conn, CATEGORIES_KEY, catalog.custom_entries())
}

/// Reads both collections; untitled transactions get their category label.
pub fn load_ledger(conn: &Connection, catalog: &Catalog) -> Result<Ledger> {
    let mut transactions: Vec<Transaction> =
        load_doc(conn, TRANSACTIONS_KEY)?.unwrap_or_default();
    let budgets: Vec<Budget> = load_doc(conn, BUDGETS_KEY)?.unwrap_or_default();
    catalog.fill_missing_titles(&mut transactions);
    debug!(
        transactions = transactions.len(),
        budgets = budgets.len(),
        "ledger loaded"
    );
    Ok(Ledger::new(transactions, budgets))
}

pub fn save_ledger(conn: &Connection, ledger: &Ledger) -> Result<()> {
    save_doc(conn, TRANSACTIONS_KEY, &ledger.transactions)?;
    save_doc(conn, BUDGETS_KEY, &ledger.budgets)
}

/// Writes a small sample ledger when neither collection exists yet.
/// Returns whether anything was written.
pub fn seed_demo(conn: &Connection, now: NaiveDateTime) -> Result<bool> {
    let has_tx = load_doc::<serde_json::Value>(conn, TRANSACTIONS_KEY)?.is_some();
    let has_budgets = load_doc::<serde_json::Value>(conn, BUDGETS_KEY)?.is_some();
    if has_tx || has_budgets {
        return Ok(false);
    }
    let yesterday = now.checked_sub_days(Days::new(1)).unwrap_or(now);
    let last_month = now.checked_sub_months(Months::new(1)).unwrap_or(now);
    let tx = |id: &str, title: &str, category: &str, amount: i64, date: NaiveDateTime| {
        Transaction {
            id: id.to_string(),
            title: title.to_string(),
            amount: Decimal::new(amount, 2),
            category: CategoryKey::new(category),
            date,
            receipt_image_uri: None,
        }
    };
    let transactions = vec![
        tx("1", "Fresh Foods Market", "food_groceries", -6520, now),
        tx("2", "Acme Corp", "salary", 350000, now),
        tx("3", "Morning Coffee", "food_restaurants", -450, yesterday),
        tx("4", "City Power", "utils_electricity", -8900, last_month),
        tx("5", "Acme Corp", "salary", 340000, last_month),
    ];
    let budget = |category: &str, amount: i64| Budget {
        category: CategoryKey::new(category),
        amount: Decimal::new(amount, 0),
        period: BudgetPeriod::Monthly,
    };
    let budgets = vec![
        budget("food_groceries", 400),
        budget("transport_gas", 150),
        budget("ent_movies", 200),
    ];
    save_ledger(conn, &Ledger::new(transactions, budgets))?;
    info!("seeded demo ledger");
    Ok(true)
}
