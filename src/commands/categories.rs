// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::CategoryKind;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut catalog = db::load_catalog(conn)?;
            let entry = catalog.add_category(sub.get_one::<String>("name").unwrap())?;
            db::save_catalog(conn, &catalog)?;
            println!("Added category '{}' ({})", entry.label, entry.key);
        }
        Some(("list", sub)) => {
            let catalog = db::load_catalog(conn)?;
            let entries = catalog.entries();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
                let data = entries
                    .iter()
                    .map(|e| {
                        let kind = match e.kind {
                            CategoryKind::Income => "income",
                            CategoryKind::Expense => "expense",
                        };
                        vec![e.key.to_string(), e.label.clone(), kind.to_string()]
                    })
                    .collect();
                println!("{}", pretty_table(&["Key", "Label", "Type"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
