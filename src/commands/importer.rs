// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::Ledger;
use crate::models::{CategoryKey, Transaction};
use crate::utils::parse_decimal;
use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use rusqlite::Connection;
use std::collections::HashSet;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let n = import_transactions(conn, sub)?;
            println!("Restored {} transactions", n);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Replaces the whole transaction collection with the backup's contents.
pub fn import_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<usize> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();

    let mut restored = match fmt.as_str() {
        "json" => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
            serde_json::from_str::<Vec<Transaction>>(&raw)
                .with_context(|| format!("Invalid backup {}", path))?
        }
        "csv" => read_csv(path)?,
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    };

    let mut seen = HashSet::new();
    for t in &restored {
        if !seen.insert(t.id.as_str()) {
            bail!("Duplicate transaction id '{}' in {}", t.id, path);
        }
    }

    let catalog = db::load_catalog(conn)?;
    catalog.fill_missing_titles(&mut restored);
    let current = db::load_ledger(conn, &catalog)?;
    let n = restored.len();
    db::save_ledger(conn, &Ledger::new(restored, current.budgets))?;
    info!(count = n, path, "transactions restored");
    Ok(n)
}

fn read_csv(path: &str) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;
    let mut out = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let id = rec.get(0).context("id missing")?.trim().to_string();
        let date_raw = rec.get(1).context("date missing")?.trim();
        let title = rec.get(2).unwrap_or("").trim().to_string();
        let category = rec.get(3).context("category missing")?.trim();
        let amount_raw = rec.get(4).context("amount missing")?.trim();
        let receipt = rec
            .get(5)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let date = NaiveDateTime::parse_from_str(date_raw, "%Y-%m-%dT%H:%M:%S")
            .with_context(|| format!("Invalid transaction date '{}'", date_raw))?;
        let amount = parse_decimal(amount_raw)
            .with_context(|| format!("Invalid amount '{}' for {}", amount_raw, id))?;
        out.push(Transaction {
            id,
            title,
            amount,
            category: CategoryKey::new(category),
            date,
            receipt_image_uri: receipt,
        });
    }
    Ok(out)
}
